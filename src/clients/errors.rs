//! HTTP-specific error types.
//!
//! # Error Handling
//!
//! The request pipeline resolves every HTTP status and business code. Only
//! two things make it fail:
//!
//! - [`InvalidHttpRequestError`]: the request failed validation before sending
//! - a transport failure (unreachable host, timeout), surfaced as
//!   [`HttpError::Network`]
//!
//! File uploads have their own error type, [`UploadError`], because they
//! interpret the business envelope themselves.
//!
//! # Example
//!
//! ```rust,ignore
//! use mini_shop_api::clients::{HttpClient, HttpError, HttpRequest, HttpMethod};
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Status {}: {}", response.code, response.body),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Error returned when a request fails validation.
///
/// Raised before anything is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The path does not start with '/'.
    #[error("Request path '{path}' must start with '/'.")]
    RelativePath {
        /// The offending path.
        path: String,
    },

    /// A GET payload is not a JSON object and cannot become a query string.
    #[error("Cannot use {method} with a non-object payload; query parameters must be a JSON object.")]
    QueryNotObject {
        /// The HTTP method of the request.
        method: String,
    },
}

/// Unified error type for the request pipeline.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Errors raised by multipart file uploads.
#[derive(Debug, Error)]
pub enum UploadError {
    /// No credential token is stored.
    #[error("Not logged in. Please log in before uploading.")]
    NotLoggedIn,

    /// The local file could not be read.
    #[error("Failed to read '{}': {source}", path.display())]
    File {
        /// The local file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Network or connection error.
    #[error("Upload failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not a JSON envelope.
    #[error("Failed to parse upload response")]
    Parse,

    /// The server reported a business error.
    #[error("{message}")]
    Rejected {
        /// Business error code.
        code: i64,
        /// Server message, or a generic one when absent.
        message: String,
    },
}
