//! Error types for the Mini Shop API client.
//!
//! This module contains error types used throughout the crate for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use mini_shop_api::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("");
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme (e.g., 'https://api.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Environment name is not recognised.
    #[error("Invalid environment '{value}'. Expected one of 'dev', 'test' or 'prod'.")]
    InvalidEnvironment {
        /// The value that failed to parse.
        value: String,
    },

    /// A path setting does not start with '/'.
    #[error("Invalid path '{path}'. Paths must start with '/'.")]
    InvalidPath {
        /// The offending path.
        path: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}
