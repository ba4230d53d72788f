//! The authenticated request pipeline.
//!
//! This module provides the [`HttpClient`] type. Every API call of the crate
//! goes through [`HttpClient::request`], which attaches the stored
//! credential token, keeps rotated tokens, and handles invalid sessions by
//! recovering silently, retrying once, and prompting the user as a last
//! resort.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use crate::auth::{SessionStore, SilentRecovery};
use crate::clients::errors::{HttpError, UploadError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{ApiConfig, BaseUrl};
use crate::platform::{Modal, Platform, Toast};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// How many times a request is re-sent after a successful silent recovery.
pub const MAX_SILENT_RETRIES: u32 = 1;

/// Generic server message that is replaced by the prompt's own wording.
pub const GENERIC_RELOGIN_MESSAGE: &str = "Please log in again";

/// Toast shown when the user declines the relogin prompt.
pub const LOGIN_LATER_HINT: &str = "Some features require login";

/// Display time of [`LOGIN_LATER_HINT`].
pub const LOGIN_LATER_HINT_DURATION: Duration = Duration::from_millis(2000);

/// Default message of a rejected upload.
const UPLOAD_FAILED_MESSAGE: &str = "Upload failed";

/// The request pipeline.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Default headers including User-Agent
/// - `Authorization: Bearer` attachment for authenticated requests
/// - Token rotation through the `X-Token` response header
/// - Silent session recovery with a single bounded retry
/// - The relogin prompt when recovery fails
///
/// HTTP statuses and business codes never turn into errors here; the
/// caller receives the response and interprets it.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use mini_shop_api::{ApiConfig, BaseUrl, HttpClient, SessionStore};
///
/// let config = ApiConfig::builder()
///     .base_url(BaseUrl::new("https://shop.example.com")?)
///     .build()?;
/// let client = HttpClient::new(config, SessionStore::in_memory(), platform);
///
/// let response = client.get("/api/cart/list", None, true).await?;
/// println!("{}", response.body);
/// ```
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    config: ApiConfig,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    session: SessionStore,
    platform: Arc<dyn Platform>,
    recovery: Arc<SilentRecovery>,
    /// Set while a relogin modal is on screen.
    prompting: AtomicBool,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new client.
    ///
    /// # Arguments
    ///
    /// * `config` - Base URL, login path and route, User-Agent prefix
    /// * `session` - The shared session store
    /// * `platform` - Host primitives used by recovery and the relogin prompt
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: ApiConfig, session: SessionStore, platform: Arc<dyn Platform>) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Mini Shop API Library v{SDK_VERSION} | Rust {rust_version} | {}",
            config.environment()
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        let recovery = Arc::new(SilentRecovery::new(
            client.clone(),
            &config,
            session.clone(),
            Arc::clone(&platform),
        ));

        Self {
            client,
            config,
            default_headers,
            session,
            platform,
            recovery,
            prompting: AtomicBool::new(false),
        }
    }

    /// Returns the configuration of this client.
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        self.config.base_url()
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the session store shared with the recovery agent.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Returns the host platform.
    #[must_use]
    pub fn platform(&self) -> &dyn Platform {
        self.platform.as_ref()
    }

    /// Returns the silent recovery agent.
    #[must_use]
    pub fn recovery(&self) -> &SilentRecovery {
        &self.recovery
    }

    /// Sends a request through the pipeline.
    ///
    /// This method handles:
    /// - Request validation
    /// - Token attachment and rotation
    /// - Silent recovery and one retry on an invalid session
    /// - The relogin prompt when recovery fails
    ///
    /// When recovery fails the stored session is cleared and the original
    /// invalid response is returned.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A network error occurs (`Network`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let mut retries_left = MAX_SILENT_RETRIES;
        loop {
            let response = self.send_once(&request).await?;

            if !response.is_session_invalid() {
                return Ok(response);
            }

            if retries_left == 0 {
                tracing::debug!(
                    path = %request.path,
                    "Session still invalid after retry, returning response"
                );
                return Ok(response);
            }
            retries_left -= 1;

            if self.recovery.attempt_recovery().await {
                tracing::debug!(path = %request.path, "Retrying request after session recovery");
                continue;
            }

            self.invalidate_and_prompt(&response).await;
            return Ok(response);
        }
    }

    /// Sends a GET request; `query` becomes the query string.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn get(
        &self,
        path: &str,
        query: Option<Value>,
        requires_auth: bool,
    ) -> Result<HttpResponse, HttpError> {
        let mut builder = HttpRequest::builder(HttpMethod::Get, path).requires_auth(requires_auth);
        if let Some(query) = query {
            builder = builder.payload(query);
        }
        self.request(builder.build()?).await
    }

    /// Sends a POST request; a missing body is sent as `{}`.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn post(
        &self,
        path: &str,
        body: Option<Value>,
        requires_auth: bool,
    ) -> Result<HttpResponse, HttpError> {
        self.write(HttpMethod::Post, path, body, requires_auth).await
    }

    /// Sends a PUT request; a missing body is sent as `{}`.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn put(
        &self,
        path: &str,
        body: Option<Value>,
        requires_auth: bool,
    ) -> Result<HttpResponse, HttpError> {
        self.write(HttpMethod::Put, path, body, requires_auth).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn delete(&self, path: &str, requires_auth: bool) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Delete, path)
            .requires_auth(requires_auth)
            .build()?;
        self.request(request).await
    }

    async fn write(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        requires_auth: bool,
    ) -> Result<HttpResponse, HttpError> {
        let request = HttpRequest::builder(method, path)
            .payload(body.unwrap_or_else(|| json!({})))
            .requires_auth(requires_auth)
            .build()?;
        self.request(request).await
    }

    /// Uploads a local file as a multipart form.
    ///
    /// The file is sent under the form field `field`, authenticated with the
    /// stored token. The response must be a business envelope; its `data`
    /// is returned on success.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError`] if:
    /// - no token is stored (`NotLoggedIn`, nothing is sent)
    /// - the local file cannot be read (`File`)
    /// - a network error occurs (`Network`)
    /// - the body is not an envelope (`Parse`)
    /// - the envelope reports a business error (`Rejected`)
    pub async fn upload_file(
        &self,
        path: &str,
        field: &str,
        file_path: impl AsRef<Path>,
    ) -> Result<Value, UploadError> {
        let token = self.session.token().ok_or(UploadError::NotLoggedIn)?;

        let file_path = file_path.as_ref();
        let bytes = tokio::fs::read(file_path)
            .await
            .map_err(|source| UploadError::File {
                path: file_path.to_path_buf(),
                source,
            })?;
        let file_name = file_path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part(field.to_string(), part);

        let mut req_builder = self.client.post(self.config.base_url().join(path));
        for (key, value) in &self.default_headers {
            // reqwest sets the multipart boundary itself
            if !key.eq_ignore_ascii_case("content-type") {
                req_builder = req_builder.header(key, value);
            }
        }

        tracing::debug!(path, field, "Uploading file");
        let res = req_builder.bearer_auth(token).multipart(form).send().await?;
        let response = HttpResponse::from_reqwest(res).await?;
        self.store_rotated_token(&response);

        let envelope = response.envelope().ok_or(UploadError::Parse)?;
        if envelope.is_success() {
            return Ok(envelope.data.unwrap_or(Value::Null));
        }

        Err(UploadError::Rejected {
            code: envelope.code,
            message: envelope
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| UPLOAD_FAILED_MESSAGE.to_string()),
        })
    }

    async fn send_once(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = self.config.base_url().join(&request.target());

        let mut req_builder = self.client.request(request.http_method.as_reqwest(), &url);
        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                req_builder = req_builder.header(key, value);
            }
        }

        // The store is never read for anonymous requests.
        if request.requires_auth {
            if let Some(token) = self.session.token() {
                req_builder = req_builder.bearer_auth(token);
            }
        }

        if let Some(body) = request.body() {
            req_builder = req_builder.body(body.to_string());
        }

        tracing::debug!(
            method = %request.http_method,
            path = %request.path,
            requires_auth = request.requires_auth,
            "Dispatching request"
        );
        let res = req_builder.send().await?;
        let response = HttpResponse::from_reqwest(res).await?;
        self.store_rotated_token(&response);

        Ok(response)
    }

    fn store_rotated_token(&self, response: &HttpResponse) {
        if let Some(token) = response.rotated_token() {
            tracing::debug!("Storing rotated credential token");
            if let Err(e) = self.session.set_token(token) {
                tracing::warn!("Failed to store rotated token: {e}");
            }
        }
    }

    /// Clears the session and asks the user to log in again.
    async fn invalidate_and_prompt(&self, response: &HttpResponse) {
        let logged_in_before = self.session.has_logged_in();
        if let Err(e) = self.session.clear() {
            tracing::warn!("Failed to clear the session: {e}");
        }

        let Some(_guard) = PromptGuard::acquire(&self.prompting) else {
            tracing::debug!("Relogin prompt already on screen, skipping");
            return;
        };

        let modal = relogin_modal(logged_in_before, response.message());
        let accepted = match self.platform.show_modal(&modal).await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!("Relogin prompt failed: {e}");
                false
            }
        };

        if accepted {
            if let Err(e) = self.platform.navigate_to(self.config.login_route()) {
                tracing::warn!("Navigation to the login page failed: {e}");
            }
        } else {
            self.platform
                .show_toast(&Toast::text(LOGIN_LATER_HINT).with_duration(LOGIN_LATER_HINT_DURATION));
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", self.config.base_url())
            .field("default_headers", &self.default_headers)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

/// Builds the relogin modal.
///
/// The server message is shown unless it is absent, empty or the generic
/// [`GENERIC_RELOGIN_MESSAGE`]; wording otherwise depends on whether the
/// user has logged in before.
#[must_use]
pub fn relogin_modal(logged_in_before: bool, message: Option<&str>) -> Modal {
    let (title, fallback) = if logged_in_before {
        ("Session expired", "Your session has expired. Log in again?")
    } else {
        (
            "Login required",
            "You are not logged in yet. Register and log in?",
        )
    };

    let content = message
        .filter(|m| !m.is_empty() && *m != GENERIC_RELOGIN_MESSAGE)
        .unwrap_or(fallback);

    Modal {
        title: title.to_string(),
        content: content.to_string(),
        confirm_text: "Log in".to_string(),
        cancel_text: "Later".to_string(),
    }
}

/// Holds the prompt flag; releases it on drop.
struct PromptGuard<'a>(&'a AtomicBool);

impl<'a> PromptGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for PromptGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::PlatformError;
    use async_trait::async_trait;

    struct NoPlatform;

    #[async_trait]
    impl Platform for NoPlatform {
        async fn login_code(&self) -> Result<String, PlatformError> {
            Err(PlatformError::Unavailable {
                capability: "login",
            })
        }
        async fn show_modal(&self, _modal: &Modal) -> Result<bool, PlatformError> {
            Ok(false)
        }
        fn show_toast(&self, _toast: &Toast) {}
        fn navigate_to(&self, _route: &str) -> Result<(), PlatformError> {
            Ok(())
        }
        async fn show_action_sheet(&self, _items: &[String]) -> Result<usize, PlatformError> {
            Err(PlatformError::Cancelled)
        }
        fn make_phone_call(&self, _number: &str) -> Result<(), PlatformError> {
            Ok(())
        }
        fn set_clipboard(&self, _text: &str) -> Result<(), PlatformError> {
            Ok(())
        }
    }

    fn create_client(prefix: Option<&str>) -> HttpClient {
        let mut builder =
            ApiConfig::builder().base_url(BaseUrl::new("https://shop.example.com/").unwrap());
        if let Some(prefix) = prefix {
            builder = builder.user_agent_prefix(prefix);
        }
        HttpClient::new(
            builder.build().unwrap(),
            SessionStore::in_memory(),
            Arc::new(NoPlatform),
        )
    }

    #[test]
    fn test_client_construction() {
        let client = create_client(None);
        assert_eq!(client.base_url().as_ref(), "https://shop.example.com");
        assert_eq!(
            client.recovery().login_url(),
            "https://shop.example.com/api/login"
        );
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = create_client(None);
        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("Mini Shop API Library v"));
        assert!(user_agent.contains("Rust"));
        assert!(user_agent.ends_with("| prod"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let client = create_client(Some("MyShop/2.1"));
        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyShop/2.1 | "));
    }

    #[test]
    fn test_json_headers() {
        let client = create_client(None);
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
        assert_eq!(
            client.default_headers().get("Content-Type"),
            Some(&"application/json".to_string())
        );
        assert!(client.default_headers().get("Authorization").is_none());
    }

    #[test]
    fn test_relogin_modal_wording_for_returning_user() {
        let modal = relogin_modal(true, None);
        assert_eq!(modal.title, "Session expired");
        assert_eq!(modal.content, "Your session has expired. Log in again?");
        assert_eq!(modal.confirm_text, "Log in");
        assert_eq!(modal.cancel_text, "Later");
    }

    #[test]
    fn test_relogin_modal_wording_for_new_user() {
        let modal = relogin_modal(false, Some(GENERIC_RELOGIN_MESSAGE));
        assert_eq!(modal.title, "Login required");
        assert_eq!(
            modal.content,
            "You are not logged in yet. Register and log in?"
        );
    }

    #[test]
    fn test_relogin_modal_prefers_server_message() {
        assert_eq!(
            relogin_modal(true, Some("Account signed in elsewhere")).content,
            "Account signed in elsewhere"
        );
        assert_eq!(
            relogin_modal(true, Some("")).content,
            "Your session has expired. Log in again?"
        );
    }

    #[test]
    fn test_prompt_guard_is_exclusive_and_released() {
        let flag = AtomicBool::new(false);
        {
            let first = PromptGuard::acquire(&flag);
            assert!(first.is_some());
            assert!(PromptGuard::acquire(&flag).is_none());
        }
        assert!(PromptGuard::acquire(&flag).is_some());
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
