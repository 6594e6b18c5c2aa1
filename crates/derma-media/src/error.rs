use derma_core::AcquisitionPhase;
use thiserror::Error;

/// Why a selected file was refused. The user can pick another one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unsupported file type '{mime}' (expected JPEG, PNG or WebP)")]
    UnsupportedType { mime: String },

    #[error("file is {size} bytes; the limit is {max} bytes")]
    TooLarge { size: u64, max: u64 },

    #[error("file is empty")]
    Empty,
}

/// Camera access failures. The caller falls back to file selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    #[error("camera permission denied")]
    PermissionDenied,

    #[error("no camera device found")]
    NotFound,

    #[error("camera unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error("cannot {action} while {phase}")]
    InvalidState {
        action: &'static str,
        phase: AcquisitionPhase,
    },

    #[error("camera has not produced a frame yet")]
    FrameNotReady,

    #[error("image encoding failed: {0}")]
    Encode(String),

    #[error("image decoding failed: {0}")]
    Decode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
