//! Identity of the logged-in user.
//!
//! This module provides the [`Identity`] record cached next to the credential
//! token, plus the [`UserId`] type that accepts the server's numeric or
//! string identifiers.
//!
//! # Example
//!
//! ```rust
//! use mini_shop_api::{Identity, UserId};
//!
//! let identity = Identity::new(UserId::Number(42), None, None);
//! assert_eq!(identity.nickname, Identity::DEFAULT_NICKNAME);
//! assert_eq!(identity.avatar, Identity::DEFAULT_AVATAR);
//!
//! let json = serde_json::to_value(&identity).unwrap();
//! assert_eq!(json["id"], 42);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A user identifier as issued by the server.
///
/// The login endpoint has returned both numeric and string identifiers, so
/// both are accepted and preserved as-is.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    /// Numeric identifier.
    Number(u64),
    /// String identifier.
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// The logged-in user's cached identity.
///
/// Written together with the credential token on login or silent recovery,
/// and cleared together with it when the session is invalidated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Server-side user identifier.
    pub id: UserId,

    /// Display name.
    pub nickname: String,

    /// Avatar image address.
    pub avatar: String,
}

impl Identity {
    /// Nickname used when the server does not provide one.
    pub const DEFAULT_NICKNAME: &'static str = "WeChat user";

    /// Avatar used when the server does not provide one.
    pub const DEFAULT_AVATAR: &'static str = "/static/images/default-avatar.png";

    /// Creates an identity, substituting defaults for missing or empty
    /// nickname and avatar.
    #[must_use]
    pub fn new(id: UserId, nickname: Option<String>, avatar: Option<String>) -> Self {
        Self {
            id,
            nickname: nickname
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| Self::DEFAULT_NICKNAME.to_string()),
            avatar: avatar
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| Self::DEFAULT_AVATAR.to_string()),
        }
    }
}
