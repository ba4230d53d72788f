//! User account endpoints.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::auth::{Identity, LoginSession};
use crate::clients::HttpClient;
use crate::resources::{to_payload, ApiError, ApiResponse};

/// Form field carrying the avatar file.
pub const AVATAR_FIELD: &str = "file";

/// Profile changes. Unset fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// New nickname.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// Avatar URL, as returned by [`UserApi::upload_avatar`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// User endpoints, obtained from [`HttpClient::user`].
#[derive(Debug, Clone, Copy)]
pub struct UserApi<'a> {
    client: &'a HttpClient,
}

impl<'a> UserApi<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Logs in with a platform one-time code and stores the new session.
    ///
    /// Token, identity and login-history flag are written together.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Login`] when the response does not carry a
    /// complete session, [`ApiError::Storage`] when it cannot be persisted,
    /// and [`ApiError::Http`] on transport failures.
    pub async fn login(&self, code: &str) -> Result<Identity, ApiError> {
        let path = self.client.config().login_path().to_string();
        let response = self
            .client
            .post(&path, Some(json!({ "code": code })), false)
            .await?;

        let login = LoginSession::from_response(&response)?;
        self.client
            .session()
            .establish(&login.token, &login.identity)?;

        tracing::info!(user_id = %login.identity.id, "Logged in");
        Ok(login.identity)
    }

    /// Updates the profile.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures.
    pub async fn update_info(&self, update: &ProfileUpdate) -> Result<Value, ApiError> {
        self.client
            .post("/api/user/update", Some(to_payload(update)?), true)
            .await?
            .into_value()
    }

    /// Fetches the account balance, in yuan.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures, and
    /// [`ApiError::Malformed`] when a success response carries no data.
    pub async fn balance(&self) -> Result<Value, ApiError> {
        self.client
            .get("/api/user/balance", None, true)
            .await?
            .into_data()
    }

    /// Uploads a new avatar and returns the server data, normally the
    /// avatar URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Upload`]; see
    /// [`HttpClient::upload_file`](crate::clients::HttpClient::upload_file).
    pub async fn upload_avatar(&self, file_path: impl AsRef<Path>) -> Result<Value, ApiError> {
        Ok(self
            .client
            .upload_file("/api/user/upload-avatar", AVATAR_FIELD, file_path)
            .await?)
    }
}
