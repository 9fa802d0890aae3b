use thiserror::Error;

/// Errors that can occur while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised by a bundled-resource store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),
}

/// Failure indicators a classifier may report instead of a label
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Failed to load reference data: {0}")]
    Assets(#[from] AssetError),

    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    #[error("Classification failed: {0}")]
    Failed(String),
}
