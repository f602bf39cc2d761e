//! Error types for the crowdsift-rs library.
//!
//! Configuration, I/O and parsing failures raised while building a compiler or
//! compiling results all surface as [`CrowdsiftError`]. Datastore failures keep
//! the datastore's own error type and are never folded into this enum.

use std::io;

use thiserror::Error;

/// Main result type for crowdsift operations.
pub type Result<T> = std::result::Result<T, CrowdsiftError>;

/// Error type for configuration, compilation and report I/O.
#[derive(Error, Debug)]
pub enum CrowdsiftError {
    /// I/O related errors (reading result folders, writing reports)
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Malformed result files
    #[error("Parse error: {message}")]
    Parse {
        /// Error description
        message: String,
        /// File path where error occurred
        file_path: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data type being serialized
        data_type: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
        /// Field or input that failed validation
        field: Option<String>,
    },
}

impl CrowdsiftError {
    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new parse error tied to a result file
    pub fn parse_in_file(message: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            file_path: Some(file_path.into()),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// The configuration field this error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Config { field, .. } | Self::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    /// Whether this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

impl From<io::Error> for CrowdsiftError {
    fn from(err: io::Error) -> Self {
        Self::io("I/O operation failed", err)
    }
}

impl From<serde_json::Error> for CrowdsiftError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {err}"),
            data_type: Some("JSON".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for CrowdsiftError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            data_type: Some("YAML".to_string()),
            source: Some(Box::new(err)),
        }
    }
}
