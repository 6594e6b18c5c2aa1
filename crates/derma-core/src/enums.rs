//! Image, acquisition and camera enums shared across derma crates.
//!
//! All enums use `snake_case` serialization. Phase enums expose
//! `allowed_next_states()` so controllers can check a transition before
//! committing to it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ImageMime
// ---------------------------------------------------------------------------

/// Image encodings the analysis service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ImageMime {
    Jpeg,
    Png,
    Webp,
}

impl ImageMime {
    /// Parse a MIME type string. `image/jpg` is accepted as an alias of
    /// `image/jpeg` since some platforms report it.
    #[must_use]
    pub fn from_mime(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// Guess from a file extension (without the dot).
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }
}

impl fmt::Display for ImageMime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ImageSource
// ---------------------------------------------------------------------------

/// Where a captured image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    FileSelection,
    CameraCapture,
}

impl ImageSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FileSelection => "file_selection",
            Self::CameraCapture => "camera_capture",
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AcquisitionPhase
// ---------------------------------------------------------------------------

/// Lifecycle of the media acquisition controller.
///
/// ```text
/// idle → previewing (file picked) → handed_off
///      → camera_requested → camera_active → previewing (captured)
///                         → idle (denied / cancelled)
/// any  → idle (reset)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionPhase {
    Idle,
    CameraRequested,
    CameraActive,
    Previewing,
    HandedOff,
}

impl AcquisitionPhase {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Idle => &[Self::Idle, Self::CameraRequested, Self::Previewing],
            Self::CameraRequested => &[Self::Idle, Self::CameraActive],
            Self::CameraActive => &[Self::Idle, Self::CameraRequested, Self::Previewing],
            Self::Previewing => &[
                Self::Idle,
                Self::CameraRequested,
                Self::Previewing,
                Self::HandedOff,
            ],
            Self::HandedOff => &[Self::Idle],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::CameraRequested => "camera_requested",
            Self::CameraActive => "camera_active",
            Self::Previewing => "previewing",
            Self::HandedOff => "handed_off",
        }
    }
}

impl fmt::Display for AcquisitionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CameraState
// ---------------------------------------------------------------------------

/// State of the hardware camera session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CameraState {
    Closed,
    Requesting,
    Active,
    Failed,
}

impl CameraState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Requesting => "requesting",
            Self::Active => "active",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for CameraState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CameraFacing
// ---------------------------------------------------------------------------

/// Preferred camera orientation. `User` is the front (selfie) camera.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CameraFacing {
    #[default]
    User,
    Environment,
}

impl CameraFacing {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Environment => "environment",
        }
    }
}

impl fmt::Display for CameraFacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
