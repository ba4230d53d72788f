//! Order endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::clients::HttpClient;
use crate::resources::{to_payload, ApiError, ApiResponse};

/// Status filter for [`OrderApi::list`], sent as its numeric code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(into = "u8", try_from = "u8")]
pub enum OrderStatus {
    /// Every order.
    #[default]
    All,
    /// Orders awaiting payment.
    PendingPayment,
    /// Paid and completed orders.
    Completed,
}

impl From<OrderStatus> for u8 {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::All => 0,
            OrderStatus::PendingPayment => 1,
            OrderStatus::Completed => 2,
        }
    }
}

impl TryFrom<u8> for OrderStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::All),
            1 => Ok(Self::PendingPayment),
            2 => Ok(Self::Completed),
            other => Err(format!("unknown order status {other}")),
        }
    }
}

/// Creates an order from cart lines or from a single product.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Checkout {
    /// Cart lines to check out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_ids: Option<Vec<u64>>,
    /// Product to order directly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,
    /// Quantity of the product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// The default address is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_id: Option<u64>,
    /// Note left for the seller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

/// Filters for [`OrderApi::list`]. Times are sent as Unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OrderListParams {
    /// Only orders in this status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    /// Page number, starting at 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Items per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Only entries created at or after this time.
    #[serde(
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub start_time: Option<DateTime<Utc>>,
    /// Only entries created before this time.
    #[serde(
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub end_time: Option<DateTime<Utc>>,
}

/// Order endpoints, obtained from [`HttpClient::orders`].
#[derive(Debug, Clone, Copy)]
pub struct OrderApi<'a> {
    client: &'a HttpClient,
}

impl<'a> OrderApi<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Creates an order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures.
    pub async fn checkout(&self, checkout: &Checkout) -> Result<Value, ApiError> {
        self.client
            .post("/api/order/checkout", Some(to_payload(checkout)?), true)
            .await?
            .into_value()
    }

    /// Lists orders.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures, and
    /// [`ApiError::Malformed`] when a success response carries no data.
    pub async fn list(&self, params: &OrderListParams) -> Result<Value, ApiError> {
        self.client
            .get("/api/order/list", Some(to_payload(params)?), true)
            .await?
            .into_data()
    }

    /// Fetches one order by its number.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures, and
    /// [`ApiError::Malformed`] when a success response carries no data.
    pub async fn detail(&self, order_no: &str) -> Result<Value, ApiError> {
        self.client
            .get(
                "/api/order/detail",
                Some(json!({ "order_no": order_no })),
                true,
            )
            .await?
            .into_data()
    }

    /// Soft-deletes an order.
    ///
    /// The order number in the query identifies the order; `id` only fills
    /// the path segment and defaults to 0.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures.
    pub async fn delete(&self, order_no: &str, id: Option<u64>) -> Result<(), ApiError> {
        let path = format!(
            "/api/order/delete/{}?order_no={}",
            id.unwrap_or(0),
            urlencoding::encode(order_no)
        );
        self.client.delete(&path, true).await?.into_ack()
    }

    /// Puts the products of an order back into the cart.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures.
    pub async fn rebuy(&self, order_no: &str) -> Result<Value, ApiError> {
        let path = format!("/api/order/rebuy?order_no={}", urlencoding::encode(order_no));
        self.client.post(&path, None, true).await?.into_value()
    }
}
