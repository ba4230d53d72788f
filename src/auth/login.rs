//! Validation of login endpoint responses.
//!
//! Both silent recovery and the explicit login action call the same
//! endpoint. A response only counts as a login when every piece is there:
//! status 200, a rotation header carrying the new token, a successful
//! business envelope and an identity payload with a user id. Anything less
//! is rejected as a whole so callers never store half a session.

use serde::Deserialize;
use thiserror::Error;

use crate::auth::identity::{Identity, UserId};
use crate::clients::HttpResponse;

/// Reasons a login response was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// The endpoint answered with a non-200 status.
    #[error("Login endpoint returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The response carried no `X-Token` header.
    #[error("Login response did not include a token header")]
    MissingToken,

    /// The body was not a business envelope.
    #[error("Login response body is not a valid envelope")]
    MalformedBody,

    /// The envelope reported a business error.
    #[error("Login rejected with code {code}: {message}")]
    Rejected {
        /// Business error code.
        code: i64,
        /// Server message, possibly empty.
        message: String,
    },

    /// The envelope had no usable identity payload.
    #[error("Login response did not include a user identity")]
    MissingIdentity,
}

#[derive(Debug, Deserialize)]
struct LoginPayload {
    user_id: Option<UserId>,
    nickname: Option<String>,
    avatar: Option<String>,
}

/// A validated login: the new token and the identity it belongs to.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginSession {
    /// The credential token from the rotation header.
    pub token: String,
    /// The identity from the envelope's `data`.
    pub identity: Identity,
}

impl std::fmt::Debug for LoginSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginSession")
            .field("token", &"*****")
            .field("identity", &self.identity)
            .finish()
    }
}

impl LoginSession {
    /// Validates a login endpoint response.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError`] describing the first missing piece.
    pub fn from_response(response: &HttpResponse) -> Result<Self, LoginError> {
        if response.code != 200 {
            return Err(LoginError::Status {
                status: response.code,
            });
        }

        let token = response
            .rotated_token()
            .ok_or(LoginError::MissingToken)?
            .to_string();

        let envelope = response.envelope().ok_or(LoginError::MalformedBody)?;
        if !envelope.is_success() {
            return Err(LoginError::Rejected {
                code: envelope.code,
                message: envelope.message.unwrap_or_default(),
            });
        }

        let payload = envelope
            .data
            .filter(serde_json::Value::is_object)
            .and_then(|data| serde_json::from_value::<LoginPayload>(data).ok())
            .ok_or(LoginError::MissingIdentity)?;
        let id = payload.user_id.ok_or(LoginError::MissingIdentity)?;

        Ok(Self {
            token,
            identity: Identity::new(id, payload.nickname, payload.avatar),
        })
    }
}
