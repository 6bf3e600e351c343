//! Error types for Glide

use thiserror::Error;

/// The main error type for Glide operations
#[derive(Debug, Error)]
pub enum GlideError {
    #[error("Degenerate keyframe set: need at least 2 keyframes, got {0}")]
    DegenerateKeyframes(usize),

    #[error("Missing asset: {0}")]
    MissingAsset(String),

    #[error("Clip not found: {0}")]
    ClipNotFound(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Animation error: {0}")]
    AnimationError(String),

    #[error("Runtime error: {0}")]
    RuntimeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

/// Result type alias for Glide operations
pub type Result<T> = std::result::Result<T, GlideError>;

impl From<toml::de::Error> for GlideError {
    fn from(err: toml::de::Error) -> Self {
        GlideError::TomlParseError(err.to_string())
    }
}
