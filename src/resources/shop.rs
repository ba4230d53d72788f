//! Shop endpoints.

use serde_json::{json, Value};

use crate::clients::HttpClient;
use crate::resources::{ApiError, ApiResponse};

/// Shop endpoints, obtained from [`HttpClient::shops`].
#[derive(Debug, Clone, Copy)]
pub struct ShopApi<'a> {
    client: &'a HttpClient,
}

impl<'a> ShopApi<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Lists the shops. Sent without credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures, and
    /// [`ApiError::Malformed`] when a success response carries no data.
    pub async fn list(&self) -> Result<Value, ApiError> {
        self.client
            .get("/api/shop/list", Some(json!({})), false)
            .await?
            .into_data()
    }
}
