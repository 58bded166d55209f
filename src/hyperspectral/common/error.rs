use thiserror::Error;

#[derive(Error, Debug)]
pub enum HsiError {
    #[error("Unsupported image format: '{0}'")]
    UnsupportedFormat(String),

    #[error("Malformed catalog entry at line {line}: {reason}")]
    MalformedEntry { line: u64, reason: String },

    #[error("Index {index} out of range for dataset of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Patch window {size}x{size} at ({row}, {col}) exceeds image of size {height}x{width}")]
    OutOfBounds {
        row: usize,
        col: usize,
        size: usize,
        height: usize,
        width: usize,
    },

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode spectral image: {0}")]
    DecodeError(String),

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HsiError>;
