//! Typed endpoint modules.
//!
//! Each area of the shop API is a small handle borrowing the
//! [`HttpClient`], so every call goes through the same pipeline:
//!
//! | Handle | Accessor | Paths |
//! |---|---|---|
//! | [`AddressApi`] | [`HttpClient::addresses`] | `/api/address/*` |
//! | [`CartApi`] | [`HttpClient::cart`] | `/api/cart/*` |
//! | [`DraftApi`] | [`HttpClient::drafts`] | `/api/draft/*` |
//! | [`InquiryApi`] | [`HttpClient::inquiries`] | `/api/inquiry/*` |
//! | [`OrderApi`] | [`HttpClient::orders`] | `/api/order/*` |
//! | [`PayApi`] | [`HttpClient::pay`] | `/api/pay/*` |
//! | [`ProductApi`] | [`HttpClient::products`] | `/api/product/list` |
//! | [`ShopApi`] | [`HttpClient::shops`] | `/api/shop/list` |
//! | [`UserApi`] | [`HttpClient::user`] | `/api/login`, `/api/user/*` |
//!
//! Request payloads are typed structs; response data the server does not
//! document is returned as [`serde_json::Value`].
//!
//! # Example
//!
//! ```rust,ignore
//! use mini_shop_api::resources::{CartItemInput, ProductListParams};
//!
//! let page = client.products().list(&ProductListParams::default()).await?;
//! client
//!     .cart()
//!     .add(&CartItemInput { product_id: 7, quantity: Some(2), shop_id: None })
//!     .await?;
//! ```

mod address;
mod cart;
mod draft;
mod errors;
mod inquiry;
mod order;
mod pay;
mod product;
mod shop;
mod user;

use serde::Serialize;
use serde_json::Value;

use crate::clients::HttpClient;

pub use address::{AddressApi, AddressInput, AddressUpdate};
pub use cart::{CartApi, CartItemInput, CartItemUpdate};
pub use draft::{DraftApi, DraftItemInput, DraftItemUpdate};
pub use errors::{ApiError, ApiResponse};
pub use inquiry::{InquiryApi, InquiryListParams, InquirySubmission};
pub use order::{Checkout, OrderApi, OrderListParams, OrderStatus};
pub use pay::{CombinedPayment, GiftType, PayApi, PayConfirmation, Recharge};
pub use product::{ProductApi, ProductListParams, ProductPage, DEFAULT_PAGE_SIZE, HOT_CATEGORY_ID};
pub use shop::ShopApi;
pub use user::{ProfileUpdate, UserApi, AVATAR_FIELD};

pub(crate) fn to_payload<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    Ok(serde_json::to_value(value)?)
}

impl HttpClient {
    /// Address endpoints.
    #[must_use]
    pub const fn addresses(&self) -> AddressApi<'_> {
        AddressApi::new(self)
    }

    /// Cart endpoints.
    #[must_use]
    pub const fn cart(&self) -> CartApi<'_> {
        CartApi::new(self)
    }

    /// Draft endpoints.
    #[must_use]
    pub const fn drafts(&self) -> DraftApi<'_> {
        DraftApi::new(self)
    }

    /// Inquiry endpoints.
    #[must_use]
    pub const fn inquiries(&self) -> InquiryApi<'_> {
        InquiryApi::new(self)
    }

    /// Order endpoints.
    #[must_use]
    pub const fn orders(&self) -> OrderApi<'_> {
        OrderApi::new(self)
    }

    /// Payment endpoints.
    #[must_use]
    pub const fn pay(&self) -> PayApi<'_> {
        PayApi::new(self)
    }

    /// Product endpoints.
    #[must_use]
    pub const fn products(&self) -> ProductApi<'_> {
        ProductApi::new(self)
    }

    /// Shop endpoints.
    #[must_use]
    pub const fn shops(&self) -> ShopApi<'_> {
        ShopApi::new(self)
    }

    /// User endpoints.
    #[must_use]
    pub const fn user(&self) -> UserApi<'_> {
        UserApi::new(self)
    }
}
