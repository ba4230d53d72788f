//! Error types for endpoint operations.
//!
//! The pipeline resolves every status and business code; the endpoint layer
//! turns them into typed results. [`ApiResponse`] performs that mapping:
//!
//! - **401**: [`ApiError::Unauthorized`], the session could not be restored
//! - **Other non-2xx**: [`ApiError::Status`]
//! - **Business code other than 0**: [`ApiError::Business`]
//! - **Body not an envelope, or `data` missing or of the wrong shape**:
//!   [`ApiError::Malformed`]
//!
//! # Example
//!
//! ```rust,ignore
//! use mini_shop_api::resources::ApiError;
//!
//! match client.cart().list().await {
//!     Ok(items) => println!("{items}"),
//!     Err(ApiError::Business { code, message }) => println!("{code}: {message}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::auth::{LoginError, StorageError};
use crate::clients::{Envelope, HttpError, HttpResponse, UploadError, GENERIC_RELOGIN_MESSAGE};

/// Error type for endpoint operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A file upload failed.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// The server answered 401 and the session could not be restored.
    #[error("{message}")]
    Unauthorized {
        /// Server message, or a generic one.
        message: String,
    },

    /// The server answered with a non-2xx status.
    #[error("Request failed with status {code}: {message}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Server message, or the raw body.
        message: String,
    },

    /// The server reported a business error.
    #[error("{message}")]
    Business {
        /// Business error code.
        code: i64,
        /// Server message, or a generic one.
        message: String,
    },

    /// The response did not have the expected shape.
    #[error("Malformed response: {reason}")]
    Malformed {
        /// What was wrong.
        reason: String,
    },

    /// An explicit login was rejected.
    #[error(transparent)]
    Login(#[from] LoginError),

    /// The session could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A request payload could not be serialized.
    #[error("Failed to serialize request payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl ApiError {
    /// Returns the business code, if this is a business error.
    #[must_use]
    pub const fn business_code(&self) -> Option<i64> {
        match self {
            Self::Business { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns `true` if the error means the user must log in.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. } | Self::Upload(UploadError::NotLoggedIn)
        ) || matches!(self.business_code(), Some(crate::clients::SESSION_INVALID_CODE))
    }
}

/// Conversions from a pipeline response into endpoint results.
pub trait ApiResponse {
    /// Checks status and business code and returns the envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for 401, other non-2xx statuses, non-envelope
    /// bodies and non-zero business codes.
    fn into_envelope(self) -> Result<Envelope, ApiError>;

    /// Deserializes the envelope's `data` into `T`.
    ///
    /// # Errors
    ///
    /// As [`ApiResponse::into_envelope`], plus [`ApiError::Malformed`] when
    /// `data` is missing or does not match `T`.
    fn into_data<T: DeserializeOwned>(self) -> Result<T, ApiError>
    where
        Self: Sized,
    {
        let data = self.into_envelope()?.data.ok_or_else(|| ApiError::Malformed {
            reason: "response has no data".to_string(),
        })?;
        serde_json::from_value(data).map_err(|e| ApiError::Malformed {
            reason: e.to_string(),
        })
    }

    /// Like [`ApiResponse::into_data`] but accepts a missing `data` as `null`.
    ///
    /// # Errors
    ///
    /// As [`ApiResponse::into_envelope`].
    fn into_value(self) -> Result<Value, ApiError>
    where
        Self: Sized,
    {
        Ok(self.into_envelope()?.data.unwrap_or(Value::Null))
    }

    /// Checks the response and discards its payload.
    ///
    /// # Errors
    ///
    /// As [`ApiResponse::into_envelope`].
    fn into_ack(self) -> Result<(), ApiError>
    where
        Self: Sized,
    {
        self.into_envelope().map(|_| ())
    }
}

impl ApiResponse for HttpResponse {
    fn into_envelope(self) -> Result<Envelope, ApiError> {
        let message = self.message().filter(|m| !m.is_empty()).map(str::to_string);

        if self.code == 401 {
            return Err(ApiError::Unauthorized {
                message: message.unwrap_or_else(|| GENERIC_RELOGIN_MESSAGE.to_string()),
            });
        }

        if !self.is_ok() {
            return Err(ApiError::Status {
                code: self.code,
                message: message.unwrap_or_else(|| self.body.to_string()),
            });
        }

        let envelope = self.envelope().ok_or_else(|| ApiError::Malformed {
            reason: "response body is not an envelope".to_string(),
        })?;

        if !envelope.is_success() {
            return Err(ApiError::Business {
                code: envelope.code,
                message: message.unwrap_or_else(|| "Request failed".to_string()),
            });
        }

        Ok(envelope)
    }
}
