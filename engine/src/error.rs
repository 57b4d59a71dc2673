//! Engine error handling
//!
//! Wraps the core's validation and configuration errors together with the
//! I/O and parsing failures of the host layer. Every variant maps to a
//! stable error code so an API layer can render it without matching on
//! messages.

use carbon_tracker_shared::{ConfigurationError, ValidationError};
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("No record for {0}")]
    RecordNotFound(NaiveDate),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML output error: {0}")]
    TomlOutput(#[from] toml::ser::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error detail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl EngineError {
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Validation(_) => "VALIDATION_ERROR",
            EngineError::Configuration(_) => "CONFIGURATION_ERROR",
            EngineError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            EngineError::RecordNotFound(_) => "NOT_FOUND",
            EngineError::Io(_) => "IO_ERROR",
            EngineError::Json(_) | EngineError::Toml(_) | EngineError::Csv(_) => "PARSE_ERROR",
            EngineError::TomlOutput(_) => "SERIALIZE_ERROR",
            EngineError::Settings(_) => "SETTINGS_ERROR",
            EngineError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Render for an external caller. Internal failures are logged and
    /// reported without their details.
    pub fn detail(&self) -> ErrorDetail {
        let (message, field) = match self {
            EngineError::Validation(err) => (err.user_message(), Some(err.field.clone())),
            EngineError::Internal(msg) => {
                error!("Internal error: {}", msg);
                ("An internal error occurred".to_string(), None)
            }
            other => (other.to_string(), None),
        };

        ErrorDetail {
            code: self.code().to_string(),
            message,
            field,
        }
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
