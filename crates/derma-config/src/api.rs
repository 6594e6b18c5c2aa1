//! Analysis backend connection settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_analyze_path() -> String {
    "/api/v1/analyze/skin".to_string()
}

fn default_health_path() -> String {
    "/health/".to_string()
}

fn default_surveys_path() -> String {
    "/api/v1/auth/surveys".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "derma/0.1".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Backend origin, e.g. `https://api.example.com`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the multipart analysis endpoint.
    #[serde(default = "default_analyze_path")]
    pub analyze_path: String,

    #[serde(default = "default_health_path")]
    pub health_path: String,

    /// Base path of the authenticated survey endpoints.
    #[serde(default = "default_surveys_path")]
    pub surveys_path: String,

    /// Whole-request timeout. `0` disables it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            analyze_path: default_analyze_path(),
            health_path: default_health_path(),
            surveys_path: default_surveys_path(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Join `base_url` and `path` without doubling or dropping the slash.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    #[must_use]
    pub fn analyze_url(&self) -> String {
        self.url(&self.analyze_path)
    }

    #[must_use]
    pub fn health_url(&self) -> String {
        self.url(&self.health_path)
    }

    #[must_use]
    pub fn surveys_url(&self) -> String {
        self.url(&self.surveys_path)
    }

    #[must_use]
    pub const fn timeout(&self) -> Option<std::time::Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(std::time::Duration::from_secs(self.timeout_secs))
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::invalid("api.base_url", "must not be empty"));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "api.base_url",
                format!("'{base}' is not an http(s) URL"),
            ));
        }
        Ok(())
    }
}
