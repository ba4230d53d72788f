//! Session and credential handling.
//!
//! # Overview
//!
//! - [`KeyValueStore`], [`MemoryStore`], [`FileStore`]: storage primitives
//! - [`SessionStore`]: typed access to token, identity and login-history flag
//! - [`Identity`], [`UserId`]: the cached identity of the logged-in user
//! - [`LoginSession`], [`LoginError`]: validation of login responses
//! - [`SilentRecovery`]: re-login from a platform one-time code
//!
//! # Lifecycle
//!
//! A session is established by [`SessionStore::establish`] after an
//! explicit login or a successful silent recovery. The server may rotate the
//! token at any time through the `X-Token` response header. When the
//! session becomes invalid and silent recovery fails, the pipeline clears
//! all three fields with [`SessionStore::clear`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use mini_shop_api::{MemoryStore, SessionStore};
//!
//! let session = SessionStore::new(Arc::new(MemoryStore::new()));
//! assert!(session.token().is_none());
//! ```

mod identity;
mod login;
mod recovery;
pub mod session;
mod storage;

pub use identity::{Identity, UserId};
pub use login::{LoginError, LoginSession};
pub use recovery::SilentRecovery;
pub use session::{SessionSnapshot, SessionStore};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
