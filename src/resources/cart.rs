//! Shopping cart endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::HttpClient;
use crate::resources::{to_payload, ApiError, ApiResponse};

/// An item to put in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CartItemInput {
    /// Product to add.
    pub product_id: u64,
    /// Defaults to 1 on the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// The server may fall back to the user's default shop.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop_id: Option<u64>,
}

/// A new quantity for a cart line.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CartItemUpdate {
    /// Cart line to change.
    pub cart_id: u64,
    /// New quantity.
    pub quantity: u32,
}

/// Cart endpoints, obtained from [`HttpClient::cart`].
#[derive(Debug, Clone, Copy)]
pub struct CartApi<'a> {
    client: &'a HttpClient,
}

impl<'a> CartApi<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Lists the cart lines.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures, and
    /// [`ApiError::Malformed`] when a success response carries no data.
    pub async fn list(&self) -> Result<Value, ApiError> {
        self.client.get("/api/cart/list", None, true).await?.into_data()
    }

    /// Adds a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures.
    pub async fn add(&self, item: &CartItemInput) -> Result<Value, ApiError> {
        self.client
            .post("/api/cart/add", Some(to_payload(item)?), true)
            .await?
            .into_value()
    }

    /// Changes the quantity of a cart line.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures.
    pub async fn update(&self, update: &CartItemUpdate) -> Result<Value, ApiError> {
        self.client
            .post("/api/cart/update", Some(to_payload(update)?), true)
            .await?
            .into_value()
    }

    /// Removes a cart line.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures.
    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/api/cart/delete/{id}"), true)
            .await?
            .into_ack()
    }
}
