//! HTTP response types.
//!
//! This module provides the [`HttpResponse`] type and the [`Envelope`] view
//! of its body, plus the checks the pipeline runs on every response: token
//! rotation and session invalidity.

use std::collections::HashMap;

use serde_json::Value;

/// Response header carrying a rotated credential token.
pub const TOKEN_HEADER: &str = "x-token";

/// Business code meaning success.
pub const SUCCESS_CODE: i64 = 0;

/// Business code meaning the session is not authenticated.
pub const SESSION_INVALID_CODE: i64 = -1;

/// The business envelope wrapping every API response body.
///
/// ```json
/// { "code": 0, "message": "ok", "data": { } }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope {
    /// Business code: `0` success, `-1` unauthenticated, anything else an
    /// ordinary business error.
    pub code: i64,
    /// Human-readable message, if any.
    pub message: Option<String>,
    /// Payload; `None` when absent or `null`.
    pub data: Option<Value>,
}

impl Envelope {
    /// Reads an envelope from a JSON body.
    ///
    /// Returns `None` unless the body is an object with an integer `code`.
    #[must_use]
    pub fn from_body(body: &Value) -> Option<Self> {
        let object = body.as_object()?;
        let code = object.get("code")?.as_i64()?;
        let message = object
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        let data = object.get("data").filter(|d| !d.is_null()).cloned();

        Some(Self {
            code,
            message,
            data,
        })
    }

    /// Returns `true` if the business code reports success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// An HTTP response from the API.
///
/// Header names are stored lowercased; a header may have several values.
/// The body holds parsed JSON, the raw text as a JSON string when it is not
/// JSON, or `null` when it is empty.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers.
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`. Header names are lowercased.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Value) -> Self {
        let headers = headers
            .into_iter()
            .fold(HashMap::new(), |mut acc: HashMap<String, Vec<String>>, (k, v)| {
                acc.entry(k.to_ascii_lowercase()).or_default().extend(v);
                acc
            });

        Self {
            code,
            headers,
            body,
        }
    }

    /// Reads status, headers and body from a reqwest response.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the body cannot be read in full.
    pub(crate) async fn from_reqwest(res: reqwest::Response) -> Result<Self, reqwest::Error> {
        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;
        Ok(Self::new(code, headers, parse_body(&body_text)))
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, matching the name case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
    }

    /// Returns the rotated credential token from the `X-Token` header.
    ///
    /// Empty header values are ignored.
    #[must_use]
    pub fn rotated_token(&self) -> Option<&str> {
        self.header(TOKEN_HEADER).filter(|token| !token.is_empty())
    }

    /// Returns the body as a business envelope, if it is one.
    #[must_use]
    pub fn envelope(&self) -> Option<Envelope> {
        Envelope::from_body(&self.body)
    }

    /// Returns the business code of the body, if any.
    #[must_use]
    pub fn business_code(&self) -> Option<i64> {
        self.body.get("code").and_then(Value::as_i64)
    }

    /// Returns the human-readable message of the body, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }

    /// Returns `true` if the response signals an invalid session.
    ///
    /// That is exactly: status 401, or a body object whose business code is
    /// [`SESSION_INVALID_CODE`]. Other business errors never qualify,
    /// whatever their message says.
    #[must_use]
    pub fn is_session_invalid(&self) -> bool {
        self.code == 401
            || (self.body.is_object() && self.business_code() == Some(SESSION_INVALID_CODE))
    }
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
