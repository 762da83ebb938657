use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum LyzengaError {
    #[error("{what}: expected length {expected}, found {found}")]
    LengthMismatch {
        what: String,
        expected: usize,
        found: usize,
    },

    #[error("{what}: expected shape {expected:?}, found {found:?}")]
    ShapeMismatch {
        what: String,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    #[error("At least 2 bands are required to build the rotation matrix, got {0}")]
    TooFewBands(usize),

    #[error("No bands were provided")]
    EmptyInput,

    #[error("Radiance minus deep water offset is not positive ({value}) in band {band} at pixel {pixel}")]
    NumericDomain { band: usize, pixel: usize, value: f64 },

    #[error("Pixel index {index} is out of range for {len} pixels")]
    PixelIndexOutOfRange { index: usize, len: usize },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, LyzengaError>;
