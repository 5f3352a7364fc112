//! Error types for expat-tax
//!
//! Configuration mistakes made by the caller (a `key_by` path that does not
//! lead to a string, an empty key path) are reported as errors and propagated
//! to the host untouched. Empty or odd queries are never errors.

use thiserror::Error;

use crate::tax::TaxYearError;

/// Errors that can occur in expat-tax
#[derive(Debug, Error)]
pub enum ExpatError {
    /// The `key_by` path of a search widget resolved to something other than a string
    #[error("keyBy must refer to a property in result that is of type string (keyBy is {key_path}, found {found})")]
    KeyNotString { key_path: String, found: &'static str },

    /// A key path with no segments was configured
    #[error("Key path must not be empty")]
    EmptyKeyPath,

    /// An item could not be turned into a value tree for key lookup
    #[error("Failed to serialize search item: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tax year validation errors
    #[error("Tax year error: {0}")]
    TaxYear(#[from] TaxYearError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("Config serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl ExpatError {
    /// Whether this error signals caller misconfiguration rather than bad input.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ExpatError::KeyNotString { .. } | ExpatError::EmptyKeyPath)
    }
}

/// Result type alias for expat-tax operations
pub type ExpatResult<T> = Result<T, ExpatError>;
