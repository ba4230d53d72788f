//! Payment endpoints. Amounts are in yuan.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::HttpClient;
use crate::resources::{to_payload, ApiError, ApiResponse};

/// Settles an order from balance and offline payment.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PayConfirmation {
    /// Order being paid.
    pub order_no: String,
    /// Part paid from the account balance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_amount: Option<f64>,
    /// Part paid offline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offline_amount: Option<f64>,
}

/// Pays an order from balance plus an online payment; the server splits
/// the amount.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CombinedPayment {
    /// Order being paid.
    pub order_no: String,
    /// Platform login code; required when part of the amount is paid online.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Expected total, checked by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    /// Note attached to the payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Bonus granted with a recharge, sent as its numeric code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(into = "u8", try_from = "u8")]
pub enum GiftType {
    /// Extra balance; requires [`Recharge::gift_amount`].
    Balance,
    /// A virtual item.
    VirtualItem,
}

impl From<GiftType> for u8 {
    fn from(gift: GiftType) -> Self {
        match gift {
            GiftType::Balance => 1,
            GiftType::VirtualItem => 2,
        }
    }
}

impl TryFrom<u8> for GiftType {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Balance),
            2 => Ok(Self::VirtualItem),
            other => Err(format!("unknown gift type {other}")),
        }
    }
}

/// Pre-orders a balance recharge.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Recharge {
    /// Platform login code.
    pub code: String,
    /// Must be positive.
    pub amount: f64,
    /// Kind of gift granted with the recharge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gift_type: Option<GiftType>,
    /// Value of the gift.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gift_amount: Option<f64>,
}

/// Payment endpoints, obtained from [`HttpClient::pay`].
#[derive(Debug, Clone, Copy)]
pub struct PayApi<'a> {
    client: &'a HttpClient,
}

impl<'a> PayApi<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Confirms a balance and offline payment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures.
    pub async fn confirm(&self, payment: &PayConfirmation) -> Result<Value, ApiError> {
        self.client
            .post("/api/pay/confirm", Some(to_payload(payment)?), true)
            .await?
            .into_value()
    }

    /// Starts a combined payment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures, and
    /// [`ApiError::Malformed`] when a success response carries no data.
    pub async fn combined(&self, payment: &CombinedPayment) -> Result<Value, ApiError> {
        self.client
            .post("/api/pay/combined", Some(to_payload(payment)?), true)
            .await?
            .into_data()
    }

    /// Pre-orders a recharge. The returned data carries `pay_params` for the
    /// host payment sheet.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures, and
    /// [`ApiError::Malformed`] when a success response carries no data.
    pub async fn recharge(&self, recharge: &Recharge) -> Result<Value, ApiError> {
        self.client
            .post("/api/pay/recharge", Some(to_payload(recharge)?), true)
            .await?
            .into_data()
    }
}
