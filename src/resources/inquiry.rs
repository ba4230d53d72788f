//! Inquiry endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::clients::HttpClient;
use crate::resources::{to_payload, ApiError, ApiResponse};

/// A new inquiry, either from drafts or for a single product.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct InquirySubmission {
    /// Draft lines to turn into an inquiry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft_ids: Option<Vec<u64>>,
    /// Product to inquire about directly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,
    /// Fractional quantities are allowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
}

impl InquirySubmission {
    /// Submits the given drafts.
    #[must_use]
    pub fn from_drafts(draft_ids: Vec<u64>) -> Self {
        Self {
            draft_ids: Some(draft_ids),
            ..Self::default()
        }
    }

    /// Submits a single product.
    #[must_use]
    pub fn for_product(product_id: u64, quantity: f64) -> Self {
        Self {
            product_id: Some(product_id),
            quantity: Some(quantity),
            ..Self::default()
        }
    }
}

/// Filters for [`InquiryApi::list`]. Times are sent as Unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct InquiryListParams {
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

/// Inquiry endpoints, obtained from [`HttpClient::inquiries`].
#[derive(Debug, Clone, Copy)]
pub struct InquiryApi<'a> {
    client: &'a HttpClient,
}

impl<'a> InquiryApi<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Fetches one inquiry by its number.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures, and
    /// [`ApiError::Malformed`] when a success response carries no data.
    pub async fn detail(&self, inquiry_no: &str) -> Result<Value, ApiError> {
        self.client
            .get(
                "/api/inquiry/detail",
                Some(json!({ "inquiry_no": inquiry_no })),
                true,
            )
            .await?
            .into_data()
    }

    /// Submits an inquiry.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures.
    pub async fn submit(&self, submission: &InquirySubmission) -> Result<Value, ApiError> {
        self.client
            .post("/api/inquiry/submit", Some(to_payload(submission)?), true)
            .await?
            .into_value()
    }

    /// Lists inquiries.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or business failures, and
    /// [`ApiError::Malformed`] when a success response carries no data.
    pub async fn list(&self, params: &InquiryListParams) -> Result<Value, ApiError> {
        self.client
            .get("/api/inquiry/list", Some(to_payload(params)?), true)
            .await?
            .into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_list_params_send_unix_seconds() {
        let params = InquiryListParams {
            page: Some(1),
            start_time: Some(Utc.timestamp_opt(1_700_000_000, 0).unwrap()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"page": 1, "start_time": 1_700_000_000})
        );
    }

    #[test]
    fn test_submission_constructors() {
        assert_eq!(
            serde_json::to_value(InquirySubmission::from_drafts(vec![1, 2])).unwrap(),
            json!({"draft_ids": [1, 2]})
        );
        assert_eq!(
            serde_json::to_value(InquirySubmission::for_product(5, 2.5)).unwrap(),
            json!({"product_id": 5, "quantity": 2.5})
        );
    }
}
