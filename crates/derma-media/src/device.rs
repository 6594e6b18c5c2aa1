//! Seams between the controller and a physical (or simulated) camera.

use std::future::Future;

use derma_config::CameraConfig;
use derma_core::CameraFacing;

use crate::error::DeviceError;

/// What the controller asks the device for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamRequest {
    pub width: u32,
    pub height: u32,
    pub facing: CameraFacing,
}

impl From<&CameraConfig> for StreamRequest {
    fn from(config: &CameraConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            facing: config.facing,
        }
    }
}

/// One decoded video frame, packed RGB8.
#[derive(Clone, PartialEq, Eq)]
pub struct VideoFrame {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl VideoFrame {
    /// A stream reports zero dimensions until its first frame is decoded.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl std::fmt::Debug for VideoFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("len", &self.rgb.len())
            .finish()
    }
}

/// An open video stream. Exclusively owned; `stop` releases the hardware.
pub trait VideoStream: Send {
    /// The most recent frame, or `None` once stopped.
    fn current_frame(&self) -> Option<VideoFrame>;

    /// Release the device. Must tolerate repeated calls.
    fn stop(&mut self);
}

/// Grants access to a camera.
///
/// `open` may wait indefinitely on an OS permission prompt; dropping the
/// returned future abandons the request.
pub trait CameraDevice {
    type Stream: VideoStream;

    fn open(
        &self,
        request: &StreamRequest,
    ) -> impl Future<Output = Result<Self::Stream, DeviceError>> + Send;
}

/// A machine without a camera. Every request fails with
/// [`DeviceError::NotFound`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCamera;

/// Stream type of [`NoCamera`]; never constructed.
#[derive(Debug)]
pub enum NoStream {}

impl VideoStream for NoStream {
    fn current_frame(&self) -> Option<VideoFrame> {
        match *self {}
    }

    fn stop(&mut self) {
        match *self {}
    }
}

impl CameraDevice for NoCamera {
    type Stream = NoStream;

    fn open(
        &self,
        _request: &StreamRequest,
    ) -> impl Future<Output = Result<NoStream, DeviceError>> + Send {
        std::future::ready(Err(DeviceError::NotFound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_follows_camera_config() {
        let request = StreamRequest::from(&CameraConfig::default());
        assert_eq!((request.width, request.height), (640, 480));
        assert_eq!(request.facing, CameraFacing::User);
    }

    #[tokio::test]
    async fn no_camera_reports_not_found() {
        let request = StreamRequest::from(&CameraConfig::default());
        assert!(matches!(
            NoCamera.open(&request).await,
            Err(DeviceError::NotFound)
        ));
    }
}
