use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cassi_hsi_rs::hyperspectral::dataset::resize_bilinear;
use cassi_hsi_rs::hyperspectral::visualize::{measurement_to_gray, render_channels};
use cassi_hsi_rs::hyperspectral::{
    Autoencoder, AutoencoderConfig, generate_mask_block, image_formation, image_formation_adjoint,
};
use ndarray::{Array3, Array4};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn generate_mock_cube(channels: usize, height: usize, width: usize) -> Array3<f32> {
    Array3::from_shape_fn((channels, height, width), |(c, y, x)| {
        ((c * 7 + y * 3 + x) % 256) as f32 / 255.0
    })
}

fn benchmark_mask_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("mask_generation");

    for (side, label) in [(64, "64x64"), (128, "128x128"), (256, "256x256")] {
        group.bench_with_input(BenchmarkId::from_parameter(label), &side, |b, &side| {
            let mut rng = StdRng::seed_from_u64(0);
            b.iter(|| generate_mask_block(black_box(side), side, 31, &mut rng));
        });
    }

    group.finish();
}

fn benchmark_image_formation(c: &mut Criterion) {
    let mut group = c.benchmark_group("image_formation");
    let mut rng = StdRng::seed_from_u64(0);

    for (batch, label) in [(1, "batch_1"), (4, "batch_4")] {
        let mask = generate_mask_block(128, 128, 31, &mut rng).unwrap();
        let cube = Array4::from_shape_fn((batch, 31, 128, 128), |(n, c, y, x)| {
            ((n + c + y + x) % 17) as f32
        });

        group.bench_with_input(BenchmarkId::new("forward", label), &cube, |b, cube| {
            b.iter(|| image_formation(black_box(cube.view()), &mask));
        });

        let measurement = image_formation(cube.view(), &mask).unwrap();
        group.bench_with_input(BenchmarkId::new("adjoint", label), &measurement, |b, measurement| {
            b.iter(|| image_formation_adjoint(black_box(measurement.view()), &mask));
        });
    }

    group.finish();
}

fn benchmark_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("resize_bilinear");
    let cube = generate_mock_cube(31, 200, 200);

    for (side, label) in [(64, "down_64"), (256, "up_256")] {
        group.bench_with_input(BenchmarkId::from_parameter(label), &side, |b, &side| {
            b.iter(|| resize_bilinear(black_box(cube.view()), side, side));
        });
    }

    group.finish();
}

fn benchmark_rendering(c: &mut Criterion) {
    let cube = generate_mock_cube(31, 128, 128);
    let wavelengths: Vec<f32> = (0..31).map(|i| 400.0 + 10.0 * i as f32).collect();
    let measurement = generate_mock_cube(1, 128, 128).insert_axis(ndarray::Axis(0));

    c.bench_function("render_channels", |b| {
        b.iter(|| render_channels(black_box(cube.view()), &wavelengths));
    });
    c.bench_function("measurement_to_gray", |b| {
        b.iter(|| measurement_to_gray(black_box(measurement.view())));
    });
}

fn benchmark_autoencoder(c: &mut Criterion) {
    let config = AutoencoderConfig {
        height: 32,
        width: 32,
        in_channels: 31,
        out_channels: 64,
        filter_size: 3,
        layers: 2,
    };
    let mut rng = StdRng::seed_from_u64(0);
    let model = Autoencoder::new(config, &mut rng).unwrap();
    let input = generate_mock_cube(31, 32, 32).insert_axis(ndarray::Axis(0));

    c.bench_function("autoencoder_forward_32x32", |b| {
        b.iter(|| model.forward(black_box(input.view())));
    });
}

criterion_group!(
    benches,
    benchmark_mask_generation,
    benchmark_image_formation,
    benchmark_resize,
    benchmark_rendering,
    benchmark_autoencoder
);
criterion_main!(benches);
