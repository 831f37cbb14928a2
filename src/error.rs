//! Error types for gradcheck operations.
//!
//! This module defines [`GradcheckError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `GradcheckError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `GradcheckError::Other`) for unexpected errors
//! - Requirement evaluation never fails; only loading and persistence do

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for gradcheck operations.
#[derive(Debug, Error)]
pub enum GradcheckError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a configuration or requirement document.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// The course catalog could not be read or parsed.
    #[error("Failed to load catalog at {path}: {message}")]
    CatalogError { path: PathBuf, message: String },

    /// A course id or code is not present in the catalog.
    #[error("Unknown course: {key}")]
    UnknownCourse { key: String },

    /// Fetching a remote requirement definition failed.
    #[error("Failed to fetch {url}: {message}")]
    RemoteFetchError { url: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for gradcheck operations.
pub type Result<T> = std::result::Result<T, GradcheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = GradcheckError::ConfigNotFound {
            path: PathBuf::from("/foo/config.yml"),
        };
        assert!(err.to_string().contains("/foo/config.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = GradcheckError::ConfigParseError {
            path: PathBuf::from("/requirements.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/requirements.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn config_validation_error_displays_message() {
        let err = GradcheckError::ConfigValidationError {
            message: "duplicate id 'basic'".into(),
        };
        assert!(err.to_string().contains("duplicate id 'basic'"));
    }

    #[test]
    fn catalog_error_displays_path_and_message() {
        let err = GradcheckError::CatalogError {
            path: PathBuf::from("courses.json"),
            message: "expected an array".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("courses.json"));
        assert!(msg.contains("expected an array"));
    }

    #[test]
    fn unknown_course_displays_key() {
        let err = GradcheckError::UnknownCourse {
            key: "INT-1-A1-1000-999".into(),
        };
        assert!(err.to_string().contains("INT-1-A1-1000-999"));
    }

    #[test]
    fn remote_fetch_error_displays_url() {
        let err = GradcheckError::RemoteFetchError {
            url: "https://example.com/req.yml".into(),
            message: "HTTP 404".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/req.yml"));
        assert!(msg.contains("HTTP 404"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: GradcheckError = io_err.into();
        assert!(matches!(err, GradcheckError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(GradcheckError::ConfigValidationError {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
