use crate::device::{VideoFrame, VideoStream};

/// An open camera stream, stopped when released or dropped.
#[derive(Debug)]
pub struct CameraSession<S: VideoStream> {
    stream: Option<S>,
}

impl<S: VideoStream> CameraSession<S> {
    pub const fn new(stream: S) -> Self {
        Self {
            stream: Some(stream),
        }
    }

    pub fn frame(&self) -> Option<VideoFrame> {
        self.stream.as_ref().and_then(VideoStream::current_frame)
    }

    pub fn release(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            tracing::debug!("camera stream released");
        }
    }
}

impl<S: VideoStream> Drop for CameraSession<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
