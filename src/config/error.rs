use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("At least one band must be configured")]
    EmptyBands,

    #[error("Deep water offset of band {band} is not a finite number")]
    NonFiniteOffset { band: usize },

    #[error("Band name '{0}' is used more than once")]
    DuplicateBandName(String),
}
