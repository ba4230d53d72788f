//! HTTP request descriptors.
//!
//! This module provides the [`HttpRequest`] type and its builder. A request
//! is a path, a verb, an optional JSON payload and an authentication flag;
//! the pipeline turns it into the actual network call.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET; the payload becomes the query string.
    Get,
    /// HTTP POST; the payload becomes the JSON body.
    Post,
    /// HTTP PUT; the payload becomes the JSON body.
    Put,
    /// HTTP PATCH; the payload becomes the JSON body.
    Patch,
    /// HTTP DELETE; no payload is sent.
    Delete,
}

impl HttpMethod {
    /// Returns `true` for verbs whose payload is sent as a request body.
    #[must_use]
    pub const fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Patch => write!(f, "PATCH"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A request to be sent through the pipeline.
///
/// Use [`HttpRequest::builder`] to construct requests.
///
/// # Example
///
/// ```rust
/// use mini_shop_api::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "/api/order/list")
///     .payload(json!({"page": 2, "page_size": 10}))
///     .build()
///     .unwrap();
///
/// assert!(request.requires_auth);
/// assert_eq!(request.target(), "/api/order/list?page=2&page_size=10");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path (relative to the base URL), starting with '/'.
    pub path: String,
    /// The payload: query parameters for GET, JSON body for write verbs.
    pub payload: Option<Value>,
    /// Whether the stored credential token is attached.
    pub requires_auth: bool,
    /// Additional headers to include in the request.
    pub extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `path` does not start with '/'
    /// - `http_method` is `Get` and `payload` is not a JSON object
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if !self.path.starts_with('/') {
            return Err(InvalidHttpRequestError::RelativePath {
                path: self.path.clone(),
            });
        }

        if self.http_method == HttpMethod::Get
            && self.payload.as_ref().is_some_and(|p| !p.is_object())
        {
            return Err(InvalidHttpRequestError::QueryNotObject {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }

    /// Returns the path to request, with the query string appended for GET.
    ///
    /// Paths that already carry a query keep it; the payload pairs follow
    /// with '&'.
    #[must_use]
    pub fn target(&self) -> String {
        let query = match (&self.http_method, &self.payload) {
            (HttpMethod::Get, Some(Value::Object(params))) => query_string(params),
            _ => String::new(),
        };

        if query.is_empty() {
            self.path.clone()
        } else if self.path.contains('?') {
            format!("{}&{query}", self.path)
        } else {
            format!("{}?{query}", self.path)
        }
    }

    /// Returns the JSON body to send, if any.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        if self.http_method.has_body() {
            self.payload.as_ref()
        } else {
            None
        }
    }
}

/// Serializes parameters as `key=value` pairs joined by '&'.
///
/// Keys and values are percent-encoded and keep their insertion order. An
/// empty map yields an empty string.
///
/// # Example
///
/// ```rust
/// use mini_shop_api::clients::query_string;
/// use serde_json::json;
///
/// let params = json!({"a": 1, "b": "x y"});
/// assert_eq!(query_string(params.as_object().unwrap()), "a=1&b=x%20y");
/// ```
#[must_use]
pub fn query_string(params: &Map<String, Value>) -> String {
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&query_value(value))
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

// Floats with no fractional part render as integers (`1.0` becomes `1`).
// Every byte outside `A-Z a-z 0-9 - . _ ~` is percent-encoded, `!'()*` included.
fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => n
            .as_f64()
            .map_or_else(|| n.to_string(), |f| f.to_string()),
        Value::Array(items) => items.iter().map(query_value).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    payload: Option<Value>,
    requires_auth: bool,
    extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            payload: None,
            requires_auth: true,
            extra_headers: None,
        }
    }

    /// Sets the payload.
    #[must_use]
    pub fn payload(mut self, payload: impl Into<Value>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Sets whether the stored credential token is attached (default: `true`).
    #[must_use]
    pub const fn requires_auth(mut self, requires_auth: bool) -> Self {
        self.requires_auth = requires_auth;
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            payload: self.payload,
            requires_auth: self.requires_auth,
            extra_headers: self.extra_headers,
        };
        request.verify()?;
        Ok(request)
    }
}
