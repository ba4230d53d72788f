//! Configuration types for the Mini Shop API client.
//!
//! # Overview
//!
//! - [`ApiConfig`]: The configuration struct holding all client settings
//! - [`ApiConfigBuilder`]: A builder for constructing [`ApiConfig`] instances
//! - [`BaseUrl`]: A validated API base URL
//! - [`Environment`]: The deployment label (`dev`, `test`, `prod`)
//!
//! # Example
//!
//! ```rust
//! use mini_shop_api::{ApiConfig, BaseUrl, Environment};
//!
//! let config = ApiConfig::builder()
//!     .base_url(BaseUrl::new("https://api.example.com").unwrap())
//!     .environment(Environment::Test)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.login_path(), "/api/login");
//! ```

mod environment;
mod newtypes;

pub use environment::Environment;
pub use newtypes::BaseUrl;

use crate::error::ConfigError;

/// Default path of the unauthenticated login endpoint.
pub const DEFAULT_LOGIN_PATH: &str = "/api/login";

/// Default application route of the interactive login screen.
pub const DEFAULT_LOGIN_ROUTE: &str = "/pages/user/login";

/// Configuration for the Mini Shop API client.
///
/// `ApiConfig` is `Clone`, `Send`, and `Sync`; it is passed explicitly to
/// the clients that need it. There is no global configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    base_url: BaseUrl,
    environment: Environment,
    login_path: String,
    login_route: String,
    user_agent_prefix: Option<String>,
}

impl ApiConfig {
    /// Creates a new builder for constructing an `ApiConfig`.
    #[must_use]
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::new()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the deployment environment label.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Returns the path of the silent login endpoint.
    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Returns the route the user is sent to when they accept the relogin prompt.
    #[must_use]
    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ApiConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiConfig>();
};

/// Builder for constructing [`ApiConfig`] instances.
///
/// `base_url` is required. All other fields have defaults:
///
/// - `environment`: [`Environment::Prod`]
/// - `login_path`: [`DEFAULT_LOGIN_PATH`]
/// - `login_route`: [`DEFAULT_LOGIN_ROUTE`]
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    base_url: Option<BaseUrl>,
    environment: Option<Environment>,
    login_path: Option<String>,
    login_route: Option<String>,
    user_agent_prefix: Option<String>,
}

impl ApiConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the deployment environment label.
    #[must_use]
    pub const fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Overrides the silent login endpoint path.
    #[must_use]
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = Some(path.into());
        self
    }

    /// Overrides the route of the interactive login screen.
    #[must_use]
    pub fn login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = Some(route.into());
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ApiConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set,
    /// and [`ConfigError::InvalidPath`] if `login_path` or `login_route` do
    /// not start with `/`.
    pub fn build(self) -> Result<ApiConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        let login_path = self
            .login_path
            .unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_string());
        let login_route = self
            .login_route
            .unwrap_or_else(|| DEFAULT_LOGIN_ROUTE.to_string());

        for path in [&login_path, &login_route] {
            if !path.starts_with('/') {
                return Err(ConfigError::InvalidPath { path: path.clone() });
            }
        }

        Ok(ApiConfig {
            base_url,
            environment: self.environment.unwrap_or_default(),
            login_path,
            login_route,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
