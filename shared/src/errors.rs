//! Error types for the carbon tracking core

use thiserror::Error;

use crate::validation::get_field_display_label;

/// A rejected activity quantity.
///
/// Raised before any formula runs; quantities are never silently clamped.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", get_field_display_label(&self.field), self.message)
    }
}

/// Bad reference data detected while loading the badge catalog or factor tables.
///
/// These are fatal at startup rather than mis-evaluating at run time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Duplicate badge id: {0}")]
    DuplicateBadgeId(String),

    #[error("Badge {badge_id} has unrecognized criteria kind: {kind}")]
    UnknownCriteriaKind { badge_id: String, kind: String },

    #[error("Badge at position {0} has an empty id")]
    EmptyBadgeId(usize),

    #[error("Invalid emission factor {path}: {value}")]
    InvalidFactor { path: String, value: f64 },

    #[error("Malformed catalog: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("transport.distance", "cannot be negative");
        assert_eq!(err.to_string(), "transport.distance: cannot be negative");
        assert_eq!(err.user_message(), "Travel Distance: cannot be negative");
    }

    #[test]
    fn test_configuration_error_display() {
        let err = ConfigurationError::DuplicateBadgeId("green_week".to_string());
        assert_eq!(err.to_string(), "Duplicate badge id: green_week");

        let err = ConfigurationError::UnknownCriteriaKind {
            badge_id: "mystery".to_string(),
            kind: "telepathy".to_string(),
        };
        assert!(err.to_string().contains("telepathy"));
    }
}
