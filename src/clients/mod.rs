//! HTTP client types for the shop API.
//!
//! This module provides the request pipeline every endpoint goes through.
//! It handles request/response processing, credential attachment, token
//! rotation and session recovery.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async pipeline for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`Envelope`]: The `{ code, message, data }` business envelope
//! - [`HttpMethod`]: Supported HTTP methods
//!
//! # Example
//!
//! ```rust,ignore
//! use mini_shop_api::{HttpClient, HttpMethod, HttpRequest};
//! use serde_json::json;
//!
//! let request = HttpRequest::builder(HttpMethod::Post, "/api/cart/add")
//!     .payload(json!({"product_id": 7, "quantity": 1}))
//!     .build()
//!     .unwrap();
//!
//! let response = client.request(request).await?;
//! ```
//!
//! # Invalid Sessions
//!
//! A response is treated as a sign of an invalid session when its status is
//! 401 or its body carries business code `-1`:
//!
//! - The client first tries to recover silently with a platform login code
//! - On success the original request is sent once more, with the new token
//! - On failure the stored session is cleared, the user is asked to log in,
//!   and the original response is returned

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, InvalidHttpRequestError, UploadError};
pub use http_client::{
    relogin_modal, HttpClient, GENERIC_RELOGIN_MESSAGE, LOGIN_LATER_HINT,
    LOGIN_LATER_HINT_DURATION, MAX_SILENT_RETRIES, SDK_VERSION,
};
pub use http_request::{query_string, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{
    Envelope, HttpResponse, SESSION_INVALID_CODE, SUCCESS_CODE, TOKEN_HEADER,
};
