//! Bearer-token settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Identity token, normally supplied as `DERMA_AUTH__TOKEN`.
    #[serde(default)]
    pub token: String,
}

impl AuthConfig {
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        let token = self.token.trim();
        if token.is_empty() { None } else { Some(token) }
    }
}
