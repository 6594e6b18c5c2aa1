//! Client-side upload constraints.

use derma_core::ImageMime;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// 10 MiB. Also the hard ceiling; configuration can only lower it.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

const fn default_max_bytes() -> u64 {
    DEFAULT_MAX_UPLOAD_BYTES
}

fn default_accepted_types() -> Vec<String> {
    ["image/jpeg", "image/jpg", "image/png", "image/webp"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadConfig {
    /// Size ceiling for selected files, in bytes.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,

    /// Accepted MIME types.
    #[serde(default = "default_accepted_types")]
    pub accepted_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            accepted_types: default_accepted_types(),
        }
    }
}

impl UploadConfig {
    /// Whether a declared MIME type is both recognized and allowed.
    #[must_use]
    pub fn accepts(&self, mime: &str) -> bool {
        let mime = mime.trim();
        ImageMime::from_mime(mime).is_some()
            && self
                .accepted_types
                .iter()
                .any(|accepted| accepted.eq_ignore_ascii_case(mime))
    }

    /// Effective size limit: `max_bytes`, never above 10 MiB.
    #[must_use]
    pub fn ceiling(&self) -> u64 {
        self.max_bytes.min(DEFAULT_MAX_UPLOAD_BYTES)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bytes == 0 {
            return Err(ConfigError::invalid("upload.max_bytes", "must be greater than zero"));
        }
        if self.max_bytes > DEFAULT_MAX_UPLOAD_BYTES {
            return Err(ConfigError::invalid(
                "upload.max_bytes",
                format!(
                    "{} exceeds the {DEFAULT_MAX_UPLOAD_BYTES}-byte upload ceiling",
                    self.max_bytes
                ),
            ));
        }
        if let Some(unknown) = self
            .accepted_types
            .iter()
            .find(|mime| ImageMime::from_mime(mime).is_none())
        {
            return Err(ConfigError::invalid(
                "upload.accepted_types",
                format!("unsupported image type '{unknown}'"),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_accept_common_web_formats() {
        let config = UploadConfig::default();
        assert_eq!(config.max_bytes, 10_485_760);
        assert!(config.accepts("image/jpeg"));
        assert!(config.accepts("IMAGE/PNG"));
        assert!(!config.accepts("image/gif"));
        assert!(!config.accepts("text/plain"));
    }

    #[test]
    fn narrowed_list_is_respected() {
        let config = UploadConfig {
            accepted_types: vec!["image/png".into()],
            ..Default::default()
        };
        assert!(!config.accepts("image/jpeg"));
        assert!(config.accepts("image/png"));
    }

    #[test]
    fn unsupported_type_in_list_is_invalid() {
        let config = UploadConfig {
            accepted_types: vec!["image/gif".into()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn ceiling_can_be_lowered_but_not_raised() {
        let lowered = UploadConfig {
            max_bytes: 2 * 1024 * 1024,
            ..Default::default()
        };
        assert!(lowered.validate().is_ok());

        let at_ceiling = UploadConfig::default();
        assert!(at_ceiling.validate().is_ok());

        let raised = UploadConfig {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES + 1,
            ..Default::default()
        };
        assert_eq!(raised.ceiling(), DEFAULT_MAX_UPLOAD_BYTES);
        let err = raised.validate().unwrap_err();
        assert!(
            matches!(&err, ConfigError::InvalidValue { field, .. } if field == "upload.max_bytes"),
            "{err}"
        );
    }
}
