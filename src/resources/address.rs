//! Shipping address endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::clients::HttpClient;
use crate::resources::{ApiError, ApiResponse};

/// A new shipping address.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AddressInput {
    /// Name of the recipient.
    pub recipient_name: String,
    /// Phone number of the recipient.
    pub recipient_phone: String,
    /// Province.
    pub province: String,
    /// City.
    pub city: String,
    /// District.
    pub district: String,
    /// Street and house number.
    pub detail: String,
    /// Makes this the default address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

/// Changes to an existing address. Unset fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AddressUpdate {
    /// Address to change.
    pub address_id: u64,
    /// Name of the recipient.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_name: Option<String>,
    /// Phone number of the recipient.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_phone: Option<String>,
    /// Province.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// District.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    /// Street and house number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Makes this the default address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

/// Address endpoints, obtained from [`HttpClient::addresses`].
#[derive(Debug, Clone, Copy)]
pub struct AddressApi<'a> {
    client: &'a HttpClient,
}

impl<'a> AddressApi<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Lists the user's addresses.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures, and
    /// [`ApiError::Malformed`] when a success response carries no data.
    pub async fn list(&self) -> Result<Value, ApiError> {
        self.client
            .get("/api/address/list", None, true)
            .await?
            .into_data()
    }

    /// Fetches one address.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures, and
    /// [`ApiError::Malformed`] when a success response carries no data.
    pub async fn detail(&self, id: u64) -> Result<Value, ApiError> {
        self.client
            .get(&format!("/api/address/detail/{id}"), None, true)
            .await?
            .into_data()
    }

    /// Creates an address. The payload is sent wrapped as `{ "data": ... }`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures.
    pub async fn create(&self, address: &AddressInput) -> Result<Value, ApiError> {
        self.client
            .post("/api/address/create", Some(json!({ "data": address })), true)
            .await?
            .into_value()
    }

    /// Marks an address as the default one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures.
    pub async fn set_default(&self, id: u64) -> Result<(), ApiError> {
        self.client
            .post(&format!("/api/address/set_default/{id}"), None, true)
            .await?
            .into_ack()
    }

    /// Updates an address. The payload is sent wrapped as `{ "data": ... }`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures.
    pub async fn update(&self, update: &AddressUpdate) -> Result<Value, ApiError> {
        self.client
            .post("/api/address/update", Some(json!({ "data": update })), true)
            .await?
            .into_value()
    }

    /// Deletes an address.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures.
    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/api/address/delete/{id}"), true)
            .await?
            .into_ack()
    }
}
