//! Product catalog endpoints.
//!
//! The catalog is public. The token is attached only when one is stored, in
//! which case the server personalizes the listing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clients::HttpClient;
use crate::resources::{ApiError, ApiResponse};

/// Category id of the hot-selling listing.
pub const HOT_CATEGORY_ID: u64 = 100;

/// Default page size of [`ProductApi::list`].
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Filters for [`ProductApi::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductListParams {
    /// Shop to list products from.
    pub shop_id: Option<u64>,
    /// Search keyword; trimmed, ignored when blank.
    pub name: Option<String>,
    /// See [`HOT_CATEGORY_ID`].
    pub category_id: Option<u64>,
    /// Defaults to 1.
    pub page: Option<u32>,
    /// Defaults to [`DEFAULT_PAGE_SIZE`].
    pub page_size: Option<u32>,
}

impl ProductListParams {
    /// Returns the query parameters in wire order.
    #[must_use]
    pub fn to_query(&self) -> Value {
        let mut params = Map::new();
        if let Some(shop_id) = self.shop_id {
            params.insert("shop_id".to_string(), shop_id.into());
        }
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            params.insert("name".to_string(), name.into());
        }
        if let Some(category_id) = self.category_id {
            params.insert("category_id".to_string(), category_id.into());
        }
        params.insert(
            "page".to_string(),
            self.page.filter(|p| *p > 0).unwrap_or(1).into(),
        );
        params.insert(
            "page_size".to_string(),
            self.page_size
                .filter(|s| *s > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .into(),
        );
        Value::Object(params)
    }
}

/// One page of the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ProductPage {
    /// Categories shown alongside the listing.
    pub categories: Vec<Value>,
    /// Products on this page.
    pub products: Vec<Value>,
    /// Whether another page follows.
    pub has_more: bool,
    /// Total number of products matching the filters.
    pub total: u64,
    /// Page number, starting at 1.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
    /// The category the page was filtered by, if any.
    pub current_category: Option<Value>,
}

/// Product endpoints, obtained from [`HttpClient::products`].
#[derive(Debug, Clone, Copy)]
pub struct ProductApi<'a> {
    client: &'a HttpClient,
}

impl<'a> ProductApi<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Fetches one page of products.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] when the server still answers 401
    /// after the pipeline handled the session, [`ApiError::Malformed`] when
    /// the page data is missing, and other [`ApiError`] variants on
    /// transport, status or business failures.
    pub async fn list(&self, params: &ProductListParams) -> Result<ProductPage, ApiError> {
        let requires_auth = self.client.session().is_logged_in();
        self.client
            .get("/api/product/list", Some(params.to_query()), requires_auth)
            .await?
            .into_data()
    }
}
