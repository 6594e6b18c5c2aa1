//! Medical/lifestyle survey answers.
//!
//! Field names follow the camelCase document shape the web client wrote to
//! local storage, so exported surveys can be imported unchanged.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current survey document version.
pub const SURVEY_VERSION: &str = "1.0";

fn default_version() -> String {
    SURVEY_VERSION.to_string()
}

/// A completed survey for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurveyData {
    pub username: String,
    #[serde(default)]
    pub medical_history: MedicalHistory,
    #[serde(default)]
    pub skin_info: SkinInfo,
    pub basic_info: BasicInfo,
    pub completed_at: DateTime<Utc>,
    #[serde(default = "default_version")]
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicalHistory {
    pub allergies: Vec<String>,
    pub chronic_conditions: Vec<String>,
    pub current_medications: Vec<String>,
    pub cosmetic_procedures: Vec<String>,
    pub previous_reactions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SkinInfo {
    pub has_used_skincare: bool,
    pub skin_type: SkinType,
    pub previous_reactions: Vec<String>,
    pub cosmetic_procedures: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub age: u8,
    #[serde(default)]
    pub is_pregnant: bool,
    #[serde(default)]
    pub sun_exposure: SunExposure,
    #[serde(default)]
    pub family_history: Vec<String>,
    #[serde(default)]
    pub genetic_conditions: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SkinType {
    Oily,
    Dry,
    Combination,
    Sensitive,
    Normal,
    #[default]
    Unknown,
}

impl SkinType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Oily => "oily",
            Self::Dry => "dry",
            Self::Combination => "combination",
            Self::Sensitive => "sensitive",
            Self::Normal => "normal",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SkinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SunExposure {
    Minimal,
    #[default]
    Moderate,
    Frequent,
    Excessive,
}

impl SunExposure {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Moderate => "moderate",
            Self::Frequent => "frequent",
            Self::Excessive => "excessive",
        }
    }
}

impl fmt::Display for SunExposure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
