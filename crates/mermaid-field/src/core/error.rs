//! Core error types for diagram field processing
//!
//! This module defines the error types shared by the presentation selector,
//! the modal resolver and the client-side renderer.

use thiserror::Error;

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DiagramFieldError>;

/// Core error types for diagram field processing
#[derive(Error, Debug)]
pub enum DiagramFieldError {
    #[error("Entity not found: {entity_type} {entity_id}")]
    EntityNotFound {
        entity_type: String,
        entity_id: String,
    },

    #[error("Field not found: {field_name} on {entity_type} {entity_id}")]
    FieldNotFound {
        entity_type: String,
        entity_id: String,
        field_name: String,
    },

    #[error("Delta out of range: {delta} for field {field_name} with {count} item(s)")]
    DeltaOutOfRange {
        field_name: String,
        delta: usize,
        count: usize,
    },

    #[error("Invalid route: {message}")]
    InvalidRoute { message: String },

    #[error("Invalid settings: {message}")]
    InvalidSettings { message: String },

    #[error("Render error: {message}")]
    RenderFailure { message: String },

    #[error("Missing capability: {capability}")]
    MissingCapability { capability: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl DiagramFieldError {
    /// Create a new invalid route error
    pub fn invalid_route(message: impl Into<String>) -> Self {
        Self::InvalidRoute {
            message: message.into(),
        }
    }

    /// Create a new invalid settings error
    pub fn invalid_settings(message: impl Into<String>) -> Self {
        Self::InvalidSettings {
            message: message.into(),
        }
    }

    /// Create a new render failure
    pub fn render_failure(message: impl Into<String>) -> Self {
        Self::RenderFailure {
            message: message.into(),
        }
    }

    /// Create a new missing capability error
    pub fn missing_capability(capability: impl Into<String>) -> Self {
        Self::MissingCapability {
            capability: capability.into(),
        }
    }

    /// True for the entity, field and delta lookup failures of a modal request
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::EntityNotFound { .. } | Self::FieldNotFound { .. } | Self::DeltaOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_not_found() {
        let error = DiagramFieldError::EntityNotFound {
            entity_type: "node".to_string(),
            entity_id: "42".to_string(),
        };
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Entity not found"));
        assert!(error_msg.contains("node 42"));
        assert!(error.is_not_found());
    }

    #[test]
    fn test_delta_out_of_range() {
        let error = DiagramFieldError::DeltaOutOfRange {
            field_name: "field_diagram".to_string(),
            delta: 3,
            count: 1,
        };
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("field_diagram"));
        assert!(error_msg.contains("3"));
        assert!(error.is_not_found());
    }

    #[test]
    fn test_render_failure_is_not_a_lookup_failure() {
        let error = DiagramFieldError::render_failure("Parse error on line 1");
        assert!(format!("{}", error).contains("Render error"));
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_io_error_conversion() {
        use std::io;
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: DiagramFieldError = io_err.into();
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("IO error"));
        assert!(error_msg.contains("File not found"));
        assert!(!error.is_not_found());
    }
}
