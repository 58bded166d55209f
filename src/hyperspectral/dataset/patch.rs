//! Patch extraction and resampling.

use ndarray::{Array3, ArrayView3, s};
use tracing::{debug, instrument};

use crate::hyperspectral::common::error::{HsiError, Result};
use crate::hyperspectral::dataset::types::DatasetEntry;
use crate::hyperspectral::spectral::HyperspectralCube;

/// One output sample along an axis: up to two source taps and their weights.
/// Taps falling outside the source read the constant 0 and are dropped.
#[derive(Debug, Clone, Copy)]
struct Taps {
    taps: [(usize, f32); 2],
    count: usize,
}

fn axis_taps(input: usize, output: usize) -> Vec<Taps> {
    let ratio = input as f64 / output as f64;
    (0..output)
        .map(|o| {
            let coord = (o as f64 + 0.5) * ratio - 0.5;
            let base = coord.floor();
            let frac = coord - base;
            let base = base as isize;

            let mut taps = Taps {
                taps: [(0, 0.0); 2],
                count: 0,
            };
            for (index, weight) in [(base, 1.0 - frac), (base + 1, frac)] {
                if weight > 0.0 && index >= 0 && (index as usize) < input {
                    taps.taps[taps.count] = (index as usize, weight as f32);
                    taps.count += 1;
                }
            }
            taps
        })
        .collect()
}

/// Bilinear resize of the two spatial axes of a `(C, H, W)` array with a
/// constant zero boundary. Pixel centres are aligned, so resizing to the input
/// size returns the input unchanged.
pub fn resize_bilinear(source: ArrayView3<'_, f32>, height: usize, width: usize) -> Array3<f32> {
    let (channels, in_height, in_width) = source.dim();
    let rows = axis_taps(in_height, height);
    let cols = axis_taps(in_width, width);

    let mut output = Array3::<f32>::zeros((channels, height, width));
    for c in 0..channels {
        let band = source.index_axis(ndarray::Axis(0), c);
        for (y, row_taps) in rows.iter().enumerate() {
            for (x, col_taps) in cols.iter().enumerate() {
                let mut value = 0.0f32;
                for &(r, wr) in &row_taps.taps[..row_taps.count] {
                    for &(q, wc) in &col_taps.taps[..col_taps.count] {
                        value += wr * wc * band[[r, q]];
                    }
                }
                output[[c, y, x]] = value;
            }
        }
    }
    output
}

/// Cuts the window described by `entry` out of `cube`, resizes it to
/// `(side, side)` and mirrors it horizontally when requested.
#[instrument(level = "debug", skip(cube, entry), fields(name = %entry.name))]
pub fn extract_patch(cube: &HyperspectralCube, entry: &DatasetEntry) -> Result<Array3<f32>> {
    let size = entry.window_size();
    let (height, width) = (cube.height(), cube.width());

    let fits = |origin: usize, extent: usize| size <= extent && origin <= extent - size;
    if !fits(entry.row, height) || !fits(entry.col, width) {
        return Err(HsiError::OutOfBounds {
            row: entry.row,
            col: entry.col,
            size,
            height,
            width,
        });
    }

    let view = cube.view();
    let window = view.slice(s![.., entry.row..entry.row + size, entry.col..entry.col + size]);
    let patch = if size == entry.side {
        window.to_owned()
    } else {
        resize_bilinear(window, entry.side, entry.side)
    };

    debug!(
        name = %entry.name,
        window = size,
        side = entry.side,
        flip = entry.flip,
        "Extracted patch"
    );

    if entry.flip {
        Ok(patch.slice(s![.., .., ..;-1]).to_owned())
    } else {
        Ok(patch)
    }
}
