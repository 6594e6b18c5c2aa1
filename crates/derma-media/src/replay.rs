use std::path::Path;

use image::RgbImage;
use image::imageops::FilterType;

use crate::device::{CameraDevice, StreamRequest, VideoFrame, VideoStream};
use crate::error::{DeviceError, MediaError};

/// A camera whose feed is a single still image.
///
/// Stands in for hardware on headless machines; the image is scaled to the
/// requested resolution like a real device would deliver it.
#[derive(Debug, Clone)]
pub struct ReplayCamera {
    image: RgbImage,
}

impl ReplayCamera {
    #[must_use]
    pub const fn from_image(image: RgbImage) -> Self {
        Self { image }
    }

    /// Decode a JPEG, PNG or WebP file.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::Io` if the file cannot be read and
    /// `MediaError::Decode` if it is not a supported image.
    pub fn from_path(path: &Path) -> Result<Self, MediaError> {
        let bytes = std::fs::read(path)?;
        let image = image::load_from_memory(&bytes)
            .map_err(|e| MediaError::Decode(format!("{}: {e}", path.display())))?;
        Ok(Self::from_image(image.to_rgb8()))
    }
}

impl CameraDevice for ReplayCamera {
    type Stream = ReplayStream;

    async fn open(&self, request: &StreamRequest) -> Result<ReplayStream, DeviceError> {
        if request.width == 0 || request.height == 0 {
            return Err(DeviceError::Unavailable(format!(
                "cannot deliver {}x{} frames",
                request.width, request.height
            )));
        }
        let scaled = image::imageops::resize(
            &self.image,
            request.width,
            request.height,
            FilterType::Triangle,
        );
        tracing::debug!(
            width = request.width,
            height = request.height,
            facing = %request.facing,
            "replay camera opened"
        );
        Ok(ReplayStream {
            frame: Some(VideoFrame {
                width: scaled.width(),
                height: scaled.height(),
                rgb: scaled.into_raw(),
            }),
        })
    }
}

#[derive(Debug)]
pub struct ReplayStream {
    frame: Option<VideoFrame>,
}

impl VideoStream for ReplayStream {
    fn current_frame(&self) -> Option<VideoFrame> {
        self.frame.clone()
    }

    fn stop(&mut self) {
        self.frame = None;
    }
}
