use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use ndarray::Array3;
use tracing::{debug, info, instrument};

use crate::hyperspectral::common::error::{HsiError, Result};
use crate::hyperspectral::dataset::catalog::{parse_catalog, read_catalog};
use crate::hyperspectral::dataset::patch::extract_patch;
use crate::hyperspectral::dataset::types::{CacheRetention, DatasetConfig, DatasetEntry};
use crate::hyperspectral::decode::{ExrDecoder, ImageDecoder, ImageFormat, PngDecoder};
use crate::hyperspectral::spectral::HyperspectralCube;

/// Catalog-driven patch dataset.
///
/// Source images are decoded once per name and kept in memory; every entry is
/// served from that cache. `reload` needs `&mut self` and `get` only `&self`, so
/// sharing a dataset across threads takes a single lock around the whole value.
pub struct HyperspectralDataset<E: ImageDecoder = ExrDecoder, P: ImageDecoder = PngDecoder> {
    exr: E,
    png: P,
    config: DatasetConfig,
    entries: Vec<DatasetEntry>,
    images: HashMap<String, HyperspectralCube>,
}

impl HyperspectralDataset<ExrDecoder, PngDecoder> {
    /// Creates an empty dataset using the file-backed decoders.
    pub fn new(config: DatasetConfig) -> Result<Self> {
        Self::with_decoders(ExrDecoder, PngDecoder, config)
    }

    /// Creates a dataset and loads `catalog` into it.
    pub fn open<Q: AsRef<Path>>(catalog: Q, config: DatasetConfig) -> Result<Self> {
        let mut dataset = Self::new(config)?;
        dataset.reload(catalog)?;
        Ok(dataset)
    }
}

impl<E: ImageDecoder, P: ImageDecoder> HyperspectralDataset<E, P> {
    pub fn with_decoders(exr: E, png: P, config: DatasetConfig) -> Result<Self> {
        config.wavelengths.validate()?;
        Ok(Self {
            exr,
            png,
            config,
            entries: Vec::new(),
            images: HashMap::new(),
        })
    }

    /// Replaces the entry list with the rows of `catalog` and decodes every
    /// image not already cached. On error the previous entry list is kept.
    #[instrument(skip(self, catalog), fields(path = %catalog.as_ref().display()))]
    pub fn reload<Q: AsRef<Path>>(&mut self, catalog: Q) -> Result<()> {
        let entries = read_catalog(catalog)?;
        self.install(entries)
    }

    /// Same as [`reload`](Self::reload) for an in-memory catalog.
    pub fn reload_from_reader<R: Read>(&mut self, reader: R) -> Result<()> {
        let entries = parse_catalog(reader)?;
        self.install(entries)
    }

    fn install(&mut self, entries: Vec<DatasetEntry>) -> Result<()> {
        let expected = self.config.wavelengths.channel_count();

        for entry in &entries {
            if self.images.contains_key(&entry.name) {
                continue;
            }

            info!(name = %entry.name, format = %entry.format, "Loading image");
            let cube = {
                let _span = tracing::info_span!("decode_image", name = %entry.name).entered();
                self.decode(entry)?
            };
            if cube.channels() != expected {
                return Err(HsiError::ShapeMismatch(format!(
                    "{} decoded to {} channels, expected {}",
                    entry.name,
                    cube.channels(),
                    expected
                )));
            }
            info!(
                name = %entry.name,
                height = cube.height(),
                width = cube.width(),
                bytes = cube.nbytes(),
                "Image loaded"
            );
            self.images.insert(entry.name.clone(), cube);
        }

        if self.config.cache_retention == CacheRetention::DropUnreferenced {
            let referenced: HashSet<&str> = entries.iter().map(|e| e.name.as_str()).collect();
            let before = self.images.len();
            self.images.retain(|name, _| referenced.contains(name.as_str()));
            debug!("Evicted {} unreferenced images", before - self.images.len());
        }

        info!(
            entries = entries.len(),
            images = self.images.len(),
            "Catalog loaded"
        );
        self.entries = entries;
        Ok(())
    }

    fn decode(&self, entry: &DatasetEntry) -> Result<HyperspectralCube> {
        let wavelengths = &self.config.wavelengths;
        match entry.format {
            ImageFormat::Exr => self.exr.decode(&entry.dir, &entry.name, wavelengths),
            ImageFormat::Png => self.png.decode(&entry.dir, &entry.name, wavelengths),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Patch `index` as a `(C, side, side)` array.
    pub fn get(&self, index: usize) -> Result<Array3<f32>> {
        let entry = self.entries.get(index).ok_or(HsiError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })?;
        let cube = self.images.get(&entry.name).ok_or_else(|| {
            HsiError::DecodeError(format!("image {} is not loaded", entry.name))
        })?;
        extract_patch(cube, entry)
    }

    pub fn entries(&self) -> &[DatasetEntry] {
        &self.entries
    }

    pub fn cached_image_count(&self) -> usize {
        self.images.len()
    }

    pub fn is_cached(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    pub fn channels(&self) -> usize {
        self.config.wavelengths.channel_count()
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }
}
