//! Draft endpoints.
//!
//! Drafts collect products before an inquiry is submitted; see
//! [`InquirySubmission::draft_ids`](crate::resources::InquirySubmission).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::HttpClient;
use crate::resources::{to_payload, ApiError, ApiResponse};

/// A product to put in the drafts.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DraftItemInput {
    /// Product to add.
    pub product_id: u64,
    /// Fractional quantities are allowed.
    pub quantity: f64,
}

/// A new quantity for a draft line.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DraftItemUpdate {
    /// Draft line to change.
    pub draft_id: u64,
    /// Quantity, fractional units allowed.
    pub quantity: f64,
}

/// Draft endpoints, obtained from [`HttpClient::drafts`].
#[derive(Debug, Clone, Copy)]
pub struct DraftApi<'a> {
    client: &'a HttpClient,
}

impl<'a> DraftApi<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Lists the draft lines.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures, and
    /// [`ApiError::Malformed`] when a success response carries no data.
    pub async fn list(&self) -> Result<Value, ApiError> {
        self.client.get("/api/draft/list", None, true).await?.into_data()
    }

    /// Adds a product to the drafts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures.
    pub async fn add(&self, item: &DraftItemInput) -> Result<Value, ApiError> {
        self.client
            .post("/api/draft/add", Some(to_payload(item)?), true)
            .await?
            .into_value()
    }

    /// Changes a draft line.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures.
    pub async fn update(&self, update: &DraftItemUpdate) -> Result<Value, ApiError> {
        self.client
            .post("/api/draft/update", Some(to_payload(update)?), true)
            .await?
            .into_value()
    }

    /// Removes a draft line.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures.
    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/api/draft/delete/{id}"), true)
            .await?
            .into_ack()
    }
}
