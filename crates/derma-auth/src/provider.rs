//! The auth-token collaborator consumed by submission and remote storage.

use std::future::Future;

use crate::expiry::{EXPIRY_BUFFER_SECS, is_near_expiry};
use crate::token_store::{TokenSource, TokenStore};

/// Supplies an optional bearer token.
///
/// `None` means "send the request anonymously"; providers never fail.
pub trait TokenProvider {
    fn bearer_token(&self) -> impl Future<Output = Option<String>> + Send;
}

/// Fixed token, or none. Used for anonymous runs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenProvider(Option<String>);

impl StaticTokenProvider {
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self(token.filter(|t| !t.trim().is_empty()))
    }

    #[must_use]
    pub const fn anonymous() -> Self {
        Self(None)
    }
}

impl TokenProvider for StaticTokenProvider {
    fn bearer_token(&self) -> impl Future<Output = Option<String>> + Send {
        std::future::ready(self.0.clone())
    }
}

/// Resolves the stored token. Priority: keyring → configured → file.
///
/// Candidates that expire within [`EXPIRY_BUFFER_SECS`] are skipped.
#[derive(Debug, Clone)]
pub struct StoredTokenProvider {
    store: TokenStore,
    configured: Option<String>,
}

impl StoredTokenProvider {
    #[must_use]
    pub fn new(store: TokenStore, configured: Option<String>) -> Self {
        Self {
            store,
            configured: configured.filter(|t| !t.trim().is_empty()),
        }
    }

    /// First usable token and where it came from.
    #[must_use]
    pub fn resolve(&self) -> Option<(String, TokenSource)> {
        let candidates = [
            (self.store.load_keyring(), TokenSource::Keyring),
            (self.configured.clone(), TokenSource::Config),
            (self.store.load_file(), TokenSource::File),
        ];

        for (token, source) in candidates {
            let Some(token) = token else { continue };
            if is_near_expiry(&token, EXPIRY_BUFFER_SECS) {
                tracing::warn!(
                    %source,
                    "stored token expires within {EXPIRY_BUFFER_SECS}s — log in again",
                );
                continue;
            }
            return Some((token, source));
        }
        None
    }
}

impl TokenProvider for StoredTokenProvider {
    /// Keyring and file lookups block, so they run on the blocking pool.
    fn bearer_token(&self) -> impl Future<Output = Option<String>> + Send {
        let provider = self.clone();
        async move {
            match tokio::task::spawn_blocking(move || provider.resolve()).await {
                Ok(resolved) => resolved.map(|(token, _)| token),
                Err(error) => {
                    tracing::warn!(%error, "token lookup task failed; continuing anonymously");
                    None
                }
            }
        }
    }
}
