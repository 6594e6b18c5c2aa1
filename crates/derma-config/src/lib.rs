//! # derma-config
//!
//! Layered configuration loading for derma using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`DERMA_*` prefix, `__` as separator)
//! 2. Project-level `.derma/config.toml`
//! 3. User-level `~/.config/derma/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `DERMA_API__BASE_URL` -> `api.base_url`,
//! `DERMA_AUTH__TOKEN` -> `auth.token`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use derma_config::DermaConfig;
//!
//! let config = DermaConfig::load_with_dotenv().expect("config");
//! println!("analysis endpoint: {}", config.api.analyze_url());
//! ```

mod api;
mod auth;
mod camera;
mod error;
mod survey;
mod upload;

pub use api::ApiConfig;
pub use auth::AuthConfig;
pub use camera::CameraConfig;
pub use error::ConfigError;
pub use survey::{SurveyBackend, SurveyConfig};
pub use upload::{DEFAULT_MAX_UPLOAD_BYTES, UploadConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DermaConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub survey: SurveyConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl DermaConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".derma/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("DERMA_").split("__"))
    }

    /// Check cross-field constraints figment cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.upload.validate()?;
        self.camera.validate()?;
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("derma").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = DermaConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.auth.token().is_none());
        assert_eq!(config.survey.backend, SurveyBackend::Local);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: DermaConfig = DermaConfig::figment().extract()?;
            assert_eq!(config.upload.max_bytes, DEFAULT_MAX_UPLOAD_BYTES);
            assert_eq!(config.camera.width, 640);
            Ok(())
        });
    }
}
