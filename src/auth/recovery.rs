//! Silent session recovery.
//!
//! When the pipeline sees an invalid session it asks [`SilentRecovery`] to
//! log in again without user interaction: a one-time code from the host
//! platform is posted to the login endpoint, and a complete response
//! re-establishes the session.
//!
//! # Coalescing
//!
//! Several in-flight requests can hit an invalid session at the same time.
//! Attempts are serialized behind an async mutex; a caller that started
//! waiting while another attempt was running reuses that attempt's outcome
//! instead of burning a second login code.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::json;
use tokio::sync::Mutex;

use crate::auth::login::LoginSession;
use crate::auth::session::SessionStore;
use crate::clients::HttpResponse;
use crate::config::ApiConfig;
use crate::platform::Platform;

#[derive(Debug, Default)]
struct LastAttempt {
    generation: u64,
    recovered: bool,
}

/// Re-establishes a session from a platform login code.
///
/// # Thread Safety
///
/// `SilentRecovery` is `Send + Sync` and is shared between all requests of a
/// client through an `Arc`.
pub struct SilentRecovery {
    client: reqwest::Client,
    login_url: String,
    session: SessionStore,
    platform: Arc<dyn Platform>,
    generation: AtomicU64,
    last: Mutex<LastAttempt>,
}

// Verify SilentRecovery is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SilentRecovery>();
};

impl SilentRecovery {
    /// Creates a recovery agent posting to the configured login endpoint.
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        config: &ApiConfig,
        session: SessionStore,
        platform: Arc<dyn Platform>,
    ) -> Self {
        Self {
            client,
            login_url: config.base_url().join(config.login_path()),
            session,
            platform,
            generation: AtomicU64::new(0),
            last: Mutex::new(LastAttempt::default()),
        }
    }

    /// Returns the login endpoint URL.
    #[must_use]
    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// Attempts to recover the session. Never fails.
    ///
    /// Returns `true` when a new token, identity and login-history flag have
    /// been stored. Returns `false` without touching the session store
    /// otherwise.
    pub async fn attempt_recovery(&self) -> bool {
        let observed = self.generation.load(Ordering::Acquire);
        let mut last = self.last.lock().await;

        if last.generation != observed {
            tracing::debug!(
                recovered = last.recovered,
                "Reusing outcome of a concurrent session recovery"
            );
            return last.recovered;
        }

        let recovered = self.recover().await;
        last.generation += 1;
        last.recovered = recovered;
        self.generation.store(last.generation, Ordering::Release);
        recovered
    }

    async fn recover(&self) -> bool {
        let code = match self.platform.login_code().await {
            Ok(code) if !code.is_empty() => code,
            Ok(_) => {
                tracing::warn!("Silent recovery aborted: platform returned an empty login code");
                return false;
            }
            Err(e) => {
                tracing::warn!("Silent recovery aborted: {e}");
                return false;
            }
        };

        let sent = self
            .client
            .post(&self.login_url)
            .json(&json!({ "code": code }))
            .send()
            .await;
        let response = match sent {
            Ok(res) => HttpResponse::from_reqwest(res).await,
            Err(e) => Err(e),
        };
        let response = match response {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Silent recovery request failed: {e}");
                return false;
            }
        };

        let login = match LoginSession::from_response(&response) {
            Ok(login) => login,
            Err(e) => {
                tracing::warn!("Silent recovery rejected: {e}");
                return false;
            }
        };

        if let Err(e) = self.session.establish(&login.token, &login.identity) {
            tracing::warn!("Silent recovery could not persist the session: {e}");
            return false;
        }

        tracing::info!(user_id = %login.identity.id, "Session silently recovered");
        true
    }
}

impl std::fmt::Debug for SilentRecovery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SilentRecovery")
            .field("login_url", &self.login_url)
            .finish_non_exhaustive()
    }
}
