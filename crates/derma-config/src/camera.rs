//! Camera request settings.

use derma_core::CameraFacing;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_width() -> u32 {
    640
}

const fn default_height() -> u32 {
    480
}

const fn default_true() -> bool {
    true
}

const fn default_jpeg_quality() -> u8 {
    90
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CameraConfig {
    /// Ideal frame width requested from the device.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Ideal frame height requested from the device.
    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default)]
    pub facing: CameraFacing,

    /// Flip captures horizontally so they match the mirrored selfie preview.
    #[serde(default = "default_true")]
    pub mirror_capture: bool,

    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            facing: CameraFacing::default(),
            mirror_capture: default_true(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

impl CameraConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::invalid(
                "camera.width/height",
                "dimensions must be non-zero",
            ));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::invalid(
                "camera.jpeg_quality",
                format!("{} is outside 1..=100", self.jpeg_quality),
            ));
        }
        Ok(())
    }
}
