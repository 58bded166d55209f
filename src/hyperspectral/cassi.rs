//! CASSI simulation module
//!
//! Coded-aperture mask generation with per-channel dispersion shear, and the
//! image formation model that integrates a masked cube into one sensor frame.

pub mod mask;
pub mod forward;

pub use mask::{CodedApertureMask, MaskBlock, channel_shift, crop_start, generate_mask_block};
pub use forward::{image_formation, image_formation_adjoint};
