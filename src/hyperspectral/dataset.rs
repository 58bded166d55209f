//! Patch dataset module
//!
//! This module reads a CSV catalog of patch descriptions, decodes every source
//! image it references once, and serves fixed-size `(C, side, side)` patches.

mod catalog;
mod loader;
mod patch;
pub mod types;


pub use catalog::{parse_catalog, read_catalog};
pub use loader::HyperspectralDataset;
pub use patch::{extract_patch, resize_bilinear};
pub use types::{CacheRetention, DatasetConfig, DatasetConfigBuilder, DatasetEntry};
