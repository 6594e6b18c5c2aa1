use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "derma-cli";
const KEYRING_USER: &str = "id-token";
const CREDENTIALS_FILE_NAME: &str = "credentials";

/// Where a loaded token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Keyring,
    Config,
    File,
}

impl TokenSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyring => "keyring",
            Self::Config => "config",
            Self::File => "file",
        }
    }
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persistent bearer-token storage: OS keychain first, credentials file as
/// fallback.
#[derive(Debug, Clone)]
pub struct TokenStore {
    keyring_service: Option<String>,
    credentials_path: PathBuf,
}

impl TokenStore {
    /// Store backed by the OS keychain and `~/.derma/credentials`.
    ///
    /// The keyring service defaults to `"derma-cli"`; override it with
    /// `DERMA_KEYRING_SERVICE` to keep test runs away from real credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the home directory is unknown.
    pub fn new() -> Result<Self, AuthError> {
        let home = dirs::home_dir().ok_or_else(|| {
            AuthError::TokenStoreError("home directory not found — cannot store credentials".into())
        })?;
        let service = std::env::var("DERMA_KEYRING_SERVICE")
            .unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string());
        Ok(Self {
            keyring_service: Some(service),
            credentials_path: home.join(".derma").join(CREDENTIALS_FILE_NAME),
        })
    }

    /// Store that never touches the keychain.
    #[must_use]
    pub fn file_only(credentials_path: impl Into<PathBuf>) -> Self {
        Self {
            keyring_service: None,
            credentials_path: credentials_path.into(),
        }
    }

    #[must_use]
    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    /// Store a token in the OS keychain, falling back to the credentials file.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if both keyring and file storage fail.
    pub fn store(&self, token: &str) -> Result<(), AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::InvalidToken("token is empty".into()));
        }

        if let Some(entry) = self.keyring_entry() {
            match entry.set_password(token) {
                Ok(()) => return Ok(()),
                Err(error) => tracing::warn!(%error, "keyring store failed; falling back to file"),
            }
        }
        self.store_file(token)
    }

    /// Load a token. Priority: keyring → file.
    #[must_use]
    pub fn load(&self) -> Option<(String, TokenSource)> {
        self.load_keyring()
            .map(|token| (token, TokenSource::Keyring))
            .or_else(|| self.load_file().map(|token| (token, TokenSource::File)))
    }

    /// Where the token [`Self::load`] would return lives, if any.
    #[must_use]
    pub fn source(&self) -> Option<TokenSource> {
        self.load().map(|(_, source)| source)
    }

    /// Delete stored credentials from keyring and file.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the credentials file cannot be removed.
    pub fn delete(&self) -> Result<(), AuthError> {
        if let Some(entry) = self.keyring_entry() {
            // May not exist.
            let _ = entry.delete_credential();
        }

        let path = &self.credentials_path;
        if path.exists() {
            fs::remove_file(path).map_err(|e| {
                AuthError::TokenStoreError(format!("failed to delete {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }

    pub(crate) fn load_keyring(&self) -> Option<String> {
        let entry = self.keyring_entry()?;
        entry
            .get_password()
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    }

    pub(crate) fn load_file(&self) -> Option<String> {
        fs::read_to_string(&self.credentials_path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn keyring_entry(&self) -> Option<keyring::Entry> {
        let service = self.keyring_service.as_deref()?;
        match keyring::Entry::new(service, KEYRING_USER) {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::debug!(%error, "keyring unavailable");
                None
            }
        }
    }

    fn store_file(&self, token: &str) -> Result<(), AuthError> {
        let path = &self.credentials_path;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }
        fs::write(path, token)
            .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::TokenStoreError(format!("chmod {}: {e}", path.display()))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_credentials_path_is_under_home() {
        let store = TokenStore::new().expect("should resolve");
        assert!(store.credentials_path().ends_with(".derma/credentials"));
    }

    #[test]
    fn file_store_load_delete_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = TokenStore::file_only(tmp.path().join("nested").join("credentials"));

        store.store("  test_token_abc123\n").expect("store");
        assert_eq!(
            store.load(),
            Some(("test_token_abc123".to_string(), TokenSource::File))
        );

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(store.credentials_path())
                .expect("metadata")
                .permissions()
                .mode()
                & 0o777;
            assert_eq!(mode, 0o600, "credentials file should be 0600");
        }

        assert_eq!(store.source(), Some(TokenSource::File));

        store.delete().expect("delete");
        assert!(store.load().is_none());
        assert!(store.source().is_none());
        // Deleting twice is fine.
        store.delete().expect("second delete");
    }

    #[test]
    fn whitespace_only_file_is_ignored() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("credentials");
        fs::write(&path, "   \n  ").expect("write");

        let store = TokenStore::file_only(path);
        assert!(store.load().is_none());
    }

    #[test]
    fn empty_token_is_rejected() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = TokenStore::file_only(tmp.path().join("credentials"));
        assert!(matches!(store.store(" "), Err(AuthError::InvalidToken(_))));
    }
}
