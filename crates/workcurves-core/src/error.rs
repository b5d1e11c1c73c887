//! Core error types for workcurves-core.
//!
//! Aggregation failures live in [`CurveError`], configuration failures in
//! [`ConfigError`]. Both fold into [`CoreError`] together with the IO and
//! serialization errors raised at the file boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for workcurves-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Curve aggregation and dataset shape errors
    #[error("Curve error: {0}")]
    Curve(#[from] CurveError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while building datasets or aggregating curves.
///
/// All of them are fatal to a run: no partial curve collection is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// A numeric parameter was non-positive or not finite
    #[error("Invalid parameter '{name}': {value} (must be a positive number)")]
    InvalidParameter { name: &'static str, value: f64 },

    /// No day records to aggregate
    #[error("Dataset is empty: at least one day record is required")]
    EmptyDataset,

    /// Rows are not 24 wide, or the self-report vector does not match the row count
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
}

impl CurveError {
    /// Check that `value` is a positive finite number.
    pub fn ensure_positive(name: &'static str, value: f64) -> Result<f64, CurveError> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(CurveError::InvalidParameter { name, value })
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
