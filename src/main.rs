use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use ndarray::Axis;
use rand::SeedableRng;
use rand::rngs::StdRng;

use cassi_hsi_rs::hyperspectral::{
    DatasetConfig, HyperspectralDataset, TiffCompression, TiffConfig, TiffExporter,
    WavelengthRange, generate_mask_block, image_formation,
};
use cassi_hsi_rs::logger;

use tracing::info;

/// Simulates a CASSI sensor frame for one catalog patch.
#[derive(Parser, Debug)]
#[command(name = "cassi-sim", version)]
struct Args {
    /// CSV catalog describing the patches
    #[arg(long)]
    catalog: PathBuf,

    /// Catalog row to simulate
    #[arg(long, default_value_t = 0)]
    index: usize,

    #[arg(long, default_value_t = 400)]
    min_wavelength: u32,

    #[arg(long, default_value_t = 700)]
    max_wavelength: u32,

    #[arg(long, default_value_t = 10)]
    step: u32,

    /// Seed for the coded aperture
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output path of the simulated measurement
    #[arg(long, default_value = "measurement.tiff")]
    measurement: PathBuf,

    /// Output path of the false-colour channel montage
    #[arg(long, default_value = "channels.tiff")]
    panels: PathBuf,

    /// none, lzw, deflate-fast, deflate or deflate-best
    #[arg(long, default_value = "none")]
    compression: TiffCompression,
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    info!("Starting cassi-sim...");

    let wavelengths = WavelengthRange::new(args.min_wavelength, args.max_wavelength, args.step)?;
    let config = DatasetConfig::builder().wavelengths(wavelengths).build();
    let dataset = HyperspectralDataset::open(&args.catalog, config)
        .with_context(|| format!("loading catalog {}", args.catalog.display()))?;

    info!("Dataset loaded: {} entries, {} images", dataset.len(), dataset.cached_image_count());

    let patch = dataset.get(args.index)?;
    let (channels, height, width) = patch.dim();
    info!("Patch {}: {} channels, {}x{}", args.index, channels, width, height);

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mask = generate_mask_block(height, width, channels, &mut rng)?;

    let cube = patch.insert_axis(Axis(0));
    let measurement = image_formation(cube.view(), &mask)?;

    let exporter = TiffExporter::new(TiffConfig::builder().compression(args.compression).build());
    exporter.export_measurement(measurement.view(), &args.measurement)?;

    let nanometres: Vec<f32> = wavelengths.wavelengths().map(|w| w as f32).collect();
    exporter.export_channels(cube.view(), &nanometres, &args.panels)?;

    info!(
        "Simulation complete: {} and {}",
        args.measurement.display(),
        args.panels.display()
    );
    Ok(())
}
