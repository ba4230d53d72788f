//! Host platform primitives.
//!
//! The client never renders UI or talks to the mini-program runtime
//! directly. Everything it needs from the host (a one-time login code, a
//! modal, a toast, navigation, an action sheet, a phone call, the
//! clipboard) goes through the [`Platform`] trait so the host application
//! can plug in its own implementation and tests can plug in a recorder.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors reported by platform primitives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The primitive is not supported on this host.
    #[error("Platform capability unavailable: {capability}")]
    Unavailable {
        /// Name of the missing capability.
        capability: &'static str,
    },

    /// The user dismissed the interaction without choosing.
    #[error("Interaction cancelled by the user")]
    Cancelled,

    /// The primitive failed.
    #[error("Platform call failed: {message}")]
    Failed {
        /// Message reported by the host.
        message: String,
    },
}

/// A two-button modal dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Modal {
    /// Dialog title.
    pub title: String,
    /// Dialog body text.
    pub content: String,
    /// Label of the confirming button.
    pub confirm_text: String,
    /// Label of the dismissing button.
    pub cancel_text: String,
}

/// Icon shown next to a toast message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastIcon {
    /// Plain text only.
    None,
    /// Success tick.
    Success,
}

/// A transient informational notice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Notice text.
    pub title: String,
    /// Icon next to the text.
    pub icon: ToastIcon,
    /// How long the notice stays visible.
    pub duration: Duration,
}

impl Toast {
    /// Default display time of a toast.
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(1500);

    /// Creates a plain toast with the default duration.
    #[must_use]
    pub fn text(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: ToastIcon::None,
            duration: Self::DEFAULT_DURATION,
        }
    }

    /// Creates a success toast with the default duration.
    #[must_use]
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            icon: ToastIcon::Success,
            ..Self::text(title)
        }
    }

    /// Overrides the display duration.
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Host capabilities used by the client.
///
/// Implementations must be `Send + Sync`; the pipeline holds them behind an
/// `Arc` and may call them from concurrently running requests.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Requests a one-time login code from the host identity provider.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if no code can be obtained.
    async fn login_code(&self) -> Result<String, PlatformError>;

    /// Shows a modal and waits for the user's choice.
    ///
    /// Returns `true` when the confirming button was pressed.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the modal cannot be shown.
    async fn show_modal(&self, modal: &Modal) -> Result<bool, PlatformError>;

    /// Shows a transient notice. Fire and forget.
    fn show_toast(&self, toast: &Toast);

    /// Navigates to an application route.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if navigation fails.
    fn navigate_to(&self, route: &str) -> Result<(), PlatformError>;

    /// Shows an action sheet and returns the index of the tapped item.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Cancelled`] if the sheet was dismissed.
    async fn show_action_sheet(&self, items: &[String]) -> Result<usize, PlatformError>;

    /// Starts a phone call.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the call cannot be placed.
    fn make_phone_call(&self, number: &str) -> Result<(), PlatformError>;

    /// Copies text to the clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the clipboard is unavailable.
    fn set_clipboard(&self, text: &str) -> Result<(), PlatformError>;
}
