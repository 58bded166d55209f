//! Common utilities module
//!
//! This module contains shared utilities used across the hyperspectral pipeline.

pub mod error;

pub use error::{HsiError, Result};
