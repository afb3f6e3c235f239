use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::auth::credential::Credential;
use crate::auth::fetcher::{FetchError, TokenFetcher};
use crate::utils::constants::DEFAULT_SAFETY_MARGIN_SECS;

/// Lazy-refreshing cache for a single bearer token.
///
/// Serves the cached token while it stays clear of expiry by the safety
/// margin and otherwise refreshes through the fetcher. Concurrent callers
/// hitting the expiry boundary are collapsed onto one in-flight fetch: the
/// winner publishes the new credential and the waiters pick it up without
/// issuing their own round trip.
///
/// A failed fetch leaves the cache untouched and surfaces the error to the
/// caller. An expired credential is never served as a fallback.
#[derive(Debug)]
pub struct TokenCache<F> {
    fetcher: F,
    safety_margin_seconds: u64,
    current: RwLock<Option<Credential>>,
    /// Serializes the slow path. Held for the whole fetch-and-store step.
    refresh_gate: Mutex<()>,
}

impl<F: TokenFetcher> TokenCache<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_safety_margin(fetcher, DEFAULT_SAFETY_MARGIN_SECS)
    }

    pub fn with_safety_margin(fetcher: F, safety_margin_seconds: u64) -> Self {
        Self {
            fetcher,
            safety_margin_seconds,
            current: RwLock::new(None),
            refresh_gate: Mutex::new(()),
        }
    }

    /// Return a token that is valid for at least the safety margin,
    /// fetching a fresh one when the cached credential no longer is.
    pub async fn get_token(&self) -> Result<String, FetchError> {
        if let Some(token) = self.cached_if_fresh().await {
            return Ok(token);
        }

        let _gate = self.refresh_gate.lock().await;

        // Another caller may have refreshed while we waited for the gate.
        if let Some(token) = self.cached_if_fresh().await {
            return Ok(token);
        }

        let issued = self.fetcher.fetch_token().await?;
        let credential = Credential::issued_now(issued);
        let token = credential.access_token.clone();
        debug!(expires_at = credential.expires_at, "access token refreshed");
        *self.current.write().await = Some(credential);
        Ok(token)
    }

    /// Snapshot of the cached credential, fresh or not.
    pub async fn current(&self) -> Option<Credential> {
        self.current.read().await.clone()
    }

    async fn cached_if_fresh(&self) -> Option<String> {
        self.current
            .read()
            .await
            .as_ref()
            .filter(|credential| credential.is_fresh(self.safety_margin_seconds))
            .map(|credential| credential.access_token.clone())
    }
}
