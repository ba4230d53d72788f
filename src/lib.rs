//! # Mini Shop API
//!
//! A Rust client for the shop mini-app API, providing type-safe
//! configuration, session handling, and an authenticated request pipeline
//! behind typed endpoint modules.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ApiConfig`] and [`ApiConfigBuilder`]
//! - A persistent session store (token, identity, login history) via [`SessionStore`]
//! - Silent session recovery from a platform login code via [`SilentRecovery`]
//! - An async request pipeline with token rotation and a single bounded
//!   retry via [`HttpClient`]
//! - Typed endpoints for addresses, cart, drafts, inquiries, orders,
//!   payment, products, shops and the user account via [`resources`]
//! - A customer-service contact sheet via [`support::contact_service`]
//!
//! Everything the client needs from the host (login codes, dialogs,
//! navigation, clipboard) goes through the [`Platform`] trait.
//!
//! ## Quick Start
//!
//! ```rust
//! use mini_shop_api::{ApiConfig, BaseUrl, Environment};
//!
//! let config = ApiConfig::builder()
//!     .base_url(BaseUrl::new("https://shop.example.com").unwrap())
//!     .environment(Environment::Test)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.login_path(), "/api/login");
//! ```
//!
//! ## Sessions
//!
//! The session lives in a [`KeyValueStore`]. [`FileStore`] keeps it across
//! restarts; [`MemoryStore`] is process-local:
//!
//! ```rust
//! use std::sync::Arc;
//! use mini_shop_api::{Identity, MemoryStore, SessionStore, UserId};
//!
//! let session = SessionStore::new(Arc::new(MemoryStore::new()));
//! session
//!     .establish("token-value", &Identity::new(UserId::Number(7), None, None))
//!     .unwrap();
//!
//! assert!(session.is_logged_in());
//! assert!(session.has_logged_in());
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mini_shop_api::{HttpClient, SessionStore};
//! use mini_shop_api::resources::ProductListParams;
//!
//! let client = HttpClient::new(config, SessionStore::in_memory(), Arc::new(MyPlatform));
//!
//! // Typed endpoints
//! let page = client.products().list(&ProductListParams::default()).await?;
//!
//! // Or the raw pipeline
//! let response = client.get("/api/cart/list", None, true).await?;
//! ```
//!
//! ## Invalid Sessions
//!
//! A 401 status or business code `-1` marks the session invalid. The client
//! recovers silently and retries the request once; if recovery fails it
//! clears the session, asks the user to log in, and hands back the original
//! response.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod platform;
pub mod resources;
pub mod support;

// Re-export public types at crate root for convenience
pub use auth::{
    FileStore, Identity, KeyValueStore, LoginError, LoginSession, MemoryStore, SessionSnapshot,
    SessionStore, SilentRecovery, StorageError, UserId,
};
pub use config::{ApiConfig, ApiConfigBuilder, BaseUrl, Environment};
pub use error::ConfigError;
pub use platform::{Modal, Platform, PlatformError, Toast, ToastIcon};

// Re-export HTTP client types
pub use clients::{
    Envelope, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    InvalidHttpRequestError, UploadError,
};

pub use resources::{ApiError, ApiResponse};
