//! Image formation model.
//!
//! A CASSI sensor frame is the wavelength integral of the cube multiplied by
//! the sheared mask. Both operators here are pure: inputs are borrowed as views
//! and fresh arrays are returned.

use ndarray::{Array4, ArrayView4, Axis};

use crate::hyperspectral::cassi::mask::MaskBlock;
use crate::hyperspectral::common::error::{HsiError, Result};

fn check_spatial(kind: &str, dim: (usize, usize, usize, usize), mask: &MaskBlock) -> Result<()> {
    let (_, _, height, width) = dim;
    if (height, width) != (mask.height(), mask.width()) {
        return Err(HsiError::ShapeMismatch(format!(
            "{} is {}x{}, mask block is {}x{}",
            kind,
            height,
            width,
            mask.height(),
            mask.width()
        )));
    }
    Ok(())
}

/// Simulated sensor capture of a `(N, C, H, W)` batch: the mask block is
/// broadcast over the batch, multiplied in and summed over channels, giving
/// `(N, 1, H, W)`. No normalization is applied.
pub fn image_formation(cube: ArrayView4<'_, f32>, mask: &MaskBlock) -> Result<Array4<f32>> {
    check_spatial("cube", cube.dim(), mask)?;
    if cube.dim().1 != mask.channels() {
        return Err(HsiError::ShapeMismatch(format!(
            "cube has {} channels, mask block has {}",
            cube.dim().1,
            mask.channels()
        )));
    }

    let block = mask.view().insert_axis(Axis(0));
    let coded = &cube * &block;
    Ok(coded.sum_axis(Axis(1)).insert_axis(Axis(1)))
}

/// Transpose of [`image_formation`]: spreads a `(N, 1, H, W)` measurement back
/// over the channels, weighted by each channel's mask. This is the gradient of
/// `<image_formation(x), measurement>` with respect to `x`.
pub fn image_formation_adjoint(measurement: ArrayView4<'_, f32>, mask: &MaskBlock) -> Result<Array4<f32>> {
    check_spatial("measurement", measurement.dim(), mask)?;
    if measurement.dim().1 != 1 {
        return Err(HsiError::ShapeMismatch(format!(
            "measurement must have a single channel, got {}",
            measurement.dim().1
        )));
    }

    let block = mask.view().insert_axis(Axis(0));
    Ok(&measurement * &block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hyperspectral::cassi::mask::{CodedApertureMask, generate_mask_block};
    use ndarray::{Array4, array};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_cube(rng: &mut StdRng, dim: (usize, usize, usize, usize)) -> Array4<f32> {
        Array4::from_shape_fn(dim, |_| rng.random_range(-1.0f32..1.0))
    }

    #[test]
    fn test_output_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let mask = generate_mask_block(6, 10, 5, &mut rng).unwrap();
        let cube = random_cube(&mut rng, (1, 5, 6, 10));
        let measurement = image_formation(cube.view(), &mask).unwrap();
        assert_eq!(measurement.dim(), (1, 1, 6, 10));
    }

    #[test]
    fn test_sums_unmasked_intensities() {
        // 2 columns, 3 channels -> 4 mask columns, crop start 2
        let mask = CodedApertureMask::from_array(array![[1.0, 0.0, 1.0, 1.0]]);
        let block = MaskBlock::from_mask(&mask, 2, 3).unwrap();
        // shifts -1, 0, 1 over columns [2, 4)
        assert_eq!(
            block.view().to_owned(),
            array![[[1.0, 0.0]], [[1.0, 1.0]], [[0.0, 1.0]]]
        );

        let cube = Array4::from_shape_vec(
            (1, 3, 1, 2),
            vec![1.0, 2.0, 10.0, 20.0, 100.0, 200.0],
        )
        .unwrap();
        let measurement = image_formation(cube.view(), &block).unwrap();
        assert_eq!(measurement.into_raw_vec_and_offset().0, vec![11.0, 220.0]);
    }

    #[test]
    fn test_linearity() {
        let mut rng = StdRng::seed_from_u64(9);
        let mask = generate_mask_block(8, 8, 6, &mut rng).unwrap();
        let x = random_cube(&mut rng, (1, 6, 8, 8));
        let y = random_cube(&mut rng, (1, 6, 8, 8));
        let (a, b) = (0.75f32, -2.5f32);

        let combined = &x * a + &y * b;
        let lhs = image_formation(combined.view(), &mask).unwrap();
        let rhs = image_formation(x.view(), &mask).unwrap() * a
            + image_formation(y.view(), &mask).unwrap() * b;

        for (l, r) in lhs.iter().zip(rhs.iter()) {
            assert!((l - r).abs() < 1e-4, "{} vs {}", l, r);
        }
    }

    #[test]
    fn test_adjoint_identity() {
        let mut rng = StdRng::seed_from_u64(21);
        let mask = generate_mask_block(7, 9, 5, &mut rng).unwrap();
        let x = random_cube(&mut rng, (2, 5, 7, 9));
        let y = random_cube(&mut rng, (2, 1, 7, 9));

        let ax = image_formation(x.view(), &mask).unwrap();
        let aty = image_formation_adjoint(y.view(), &mask).unwrap();
        assert_eq!(aty.dim(), (2, 5, 7, 9));

        let lhs: f32 = (&ax * &y).sum();
        let rhs: f32 = (&x * &aty).sum();
        assert!((lhs - rhs).abs() < 1e-3, "{} vs {}", lhs, rhs);
    }

    #[test]
    fn test_batch_broadcast() {
        let mut rng = StdRng::seed_from_u64(4);
        let mask = generate_mask_block(4, 4, 4, &mut rng).unwrap();
        let cube = random_cube(&mut rng, (3, 4, 4, 4));
        let batch = image_formation(cube.view(), &mask).unwrap();
        assert_eq!(batch.dim(), (3, 1, 4, 4));

        let second = cube.slice(ndarray::s![1..2, .., .., ..]);
        let single = image_formation(second, &mask).unwrap();
        assert_eq!(batch.slice(ndarray::s![1..2, .., .., ..]), single.view());
    }

    #[test]
    fn test_shape_mismatch() {
        let mut rng = StdRng::seed_from_u64(2);
        let mask = generate_mask_block(4, 4, 4, &mut rng).unwrap();
        let wrong_channels = Array4::<f32>::zeros((1, 3, 4, 4));
        let wrong_size = Array4::<f32>::zeros((1, 4, 5, 4));
        assert!(matches!(image_formation(wrong_channels.view(), &mask), Err(HsiError::ShapeMismatch(_))));
        assert!(matches!(image_formation(wrong_size.view(), &mask), Err(HsiError::ShapeMismatch(_))));

        let two_channel = Array4::<f32>::zeros((1, 2, 4, 4));
        assert!(matches!(
            image_formation_adjoint(two_channel.view(), &mask),
            Err(HsiError::ShapeMismatch(_))
        ));
    }
}
