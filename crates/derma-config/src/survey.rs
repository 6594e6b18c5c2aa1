//! Survey persistence settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which survey store backs the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyBackend {
    /// JSON documents in a local directory, keyed by username.
    #[default]
    Local,
    /// Authenticated REST endpoints on the analysis backend.
    Remote,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SurveyConfig {
    #[serde(default)]
    pub backend: SurveyBackend,

    /// Directory for the local store. Empty means `~/.derma/surveys`.
    #[serde(default)]
    pub dir: String,
}

impl SurveyConfig {
    /// Resolve the local store directory.
    #[must_use]
    pub fn resolved_dir(&self) -> Option<PathBuf> {
        if self.dir.trim().is_empty() {
            dirs::home_dir().map(|home| home.join(".derma").join("surveys"))
        } else {
            Some(PathBuf::from(&self.dir))
        }
    }
}
