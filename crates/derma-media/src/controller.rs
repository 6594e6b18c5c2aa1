//! The acquisition state machine.
//!
//! The controller owns at most one camera session and at most one preview.
//! Every transition that supersedes either releases it first, and `reset`
//! releases both from any phase.

use derma_config::{CameraConfig, UploadConfig};
use derma_core::{AcquisitionPhase, CameraState, ImageBlob, ImageSource};

use crate::capture::encode_frame;
use crate::device::{CameraDevice, StreamRequest};
use crate::error::MediaError;
use crate::picked::PickedFile;
use crate::preview::Preview;
use crate::session::CameraSession;

/// The acquired image, handed to submission.
#[derive(Debug)]
pub struct CapturedImage {
    pub blob: ImageBlob,
    pub source: ImageSource,
    pub preview: Preview,
}

pub struct MediaAcquisitionController<D: CameraDevice> {
    device: D,
    upload: UploadConfig,
    camera: CameraConfig,
    phase: AcquisitionPhase,
    camera_state: CameraState,
    session: Option<CameraSession<D::Stream>>,
    current: Option<CapturedImage>,
}

impl<D: CameraDevice> MediaAcquisitionController<D> {
    pub const fn new(device: D, upload: UploadConfig, camera: CameraConfig) -> Self {
        Self {
            device,
            upload,
            camera,
            phase: AcquisitionPhase::Idle,
            camera_state: CameraState::Closed,
            session: None,
            current: None,
        }
    }

    pub const fn phase(&self) -> AcquisitionPhase {
        self.phase
    }

    pub const fn camera_state(&self) -> CameraState {
        self.camera_state
    }

    pub const fn has_camera_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.current.as_ref().map(|captured| &captured.preview)
    }

    pub fn image(&self) -> Option<&ImageBlob> {
        self.current.as_ref().map(|captured| &captured.blob)
    }

    pub fn source(&self) -> Option<ImageSource> {
        self.current.as_ref().map(|captured| captured.source)
    }

    /// Accept a user-chosen file.
    ///
    /// On a validation failure nothing changes. Otherwise any open camera
    /// is closed and the previous preview released before the new one is
    /// created.
    ///
    /// # Errors
    ///
    /// `MediaError::Validation` for a bad type or size,
    /// `MediaError::InvalidState` after handoff, `MediaError::Io` if the
    /// preview cannot be written (the controller is then idle).
    pub fn select_file(&mut self, file: PickedFile) -> Result<&Preview, MediaError> {
        self.ensure(AcquisitionPhase::Previewing, "select a file")?;

        let mime = file.validate(&self.upload).inspect_err(|error| {
            tracing::warn!(name = %file.name, %error, "file rejected");
        })?;

        self.close_camera();
        self.release_current();

        let blob = ImageBlob::new(file.data, mime, file.name);
        self.show(blob, ImageSource::FileSelection)
    }

    /// Ask the device for a stream.
    ///
    /// May wait indefinitely on a permission prompt. Dropping the future
    /// abandons the request and leaves the controller idle.
    ///
    /// # Errors
    ///
    /// `MediaError::Device` when access is denied or no camera exists (the
    /// controller is then idle with the camera marked failed),
    /// `MediaError::InvalidState` after handoff.
    pub async fn start_camera(&mut self) -> Result<(), MediaError> {
        self.ensure(AcquisitionPhase::CameraRequested, "start the camera")?;

        self.release_current();
        self.close_camera();
        self.phase = AcquisitionPhase::CameraRequested;
        self.camera_state = CameraState::Requesting;
        tracing::debug!("camera requested");

        let request = StreamRequest::from(&self.camera);
        let pending = PendingRequest {
            phase: &mut self.phase,
            camera_state: &mut self.camera_state,
            armed: true,
        };

        match self.device.open(&request).await {
            Ok(stream) => {
                pending.settle(AcquisitionPhase::CameraActive, CameraState::Active);
                self.session = Some(CameraSession::new(stream));
                tracing::debug!("camera active");
                Ok(())
            }
            Err(error) => {
                pending.settle(AcquisitionPhase::Idle, CameraState::Failed);
                tracing::warn!(%error, "camera unavailable; use file selection instead");
                Err(error.into())
            }
        }
    }

    /// Take a still from the live stream and release the camera.
    ///
    /// # Errors
    ///
    /// `MediaError::InvalidState` outside `CameraActive`,
    /// `MediaError::FrameNotReady` before the first frame has decoded. Both
    /// leave the controller untouched.
    pub fn capture_photo(&mut self) -> Result<&Preview, MediaError> {
        if self.phase != AcquisitionPhase::CameraActive {
            return Err(MediaError::InvalidState {
                action: "capture a photo",
                phase: self.phase,
            });
        }

        let frame = self
            .session
            .as_ref()
            .and_then(CameraSession::frame)
            .filter(|frame| frame.is_ready())
            .ok_or(MediaError::FrameNotReady)?;
        let blob = encode_frame(&frame, self.camera.mirror_capture, self.camera.jpeg_quality)?;

        self.close_camera();
        self.show(blob, ImageSource::CameraCapture)
    }

    /// Abandon the camera. Same effect as [`Self::reset`].
    pub fn cancel_camera(&mut self) {
        self.reset();
    }

    /// Release everything and return to idle. Safe from any phase.
    pub fn reset(&mut self) {
        self.close_camera();
        self.release_current();
        self.camera_state = CameraState::Closed;
        if self.phase != AcquisitionPhase::Idle {
            tracing::debug!(from = %self.phase, "acquisition reset");
        }
        self.phase = AcquisitionPhase::Idle;
    }

    /// Move the previewed image out for submission.
    ///
    /// # Errors
    ///
    /// `MediaError::InvalidState` unless an image is being previewed.
    pub fn handoff(&mut self) -> Result<CapturedImage, MediaError> {
        self.ensure(AcquisitionPhase::HandedOff, "hand off the image")?;
        let captured = self.current.take().ok_or(MediaError::InvalidState {
            action: "hand off the image",
            phase: self.phase,
        })?;
        self.phase = AcquisitionPhase::HandedOff;
        tracing::debug!(source = %captured.source, bytes = captured.blob.len(), "image handed off");
        Ok(captured)
    }

    fn ensure(&self, next: AcquisitionPhase, action: &'static str) -> Result<(), MediaError> {
        if self.phase.can_transition_to(next) {
            Ok(())
        } else {
            Err(MediaError::InvalidState {
                action,
                phase: self.phase,
            })
        }
    }

    fn show(&mut self, blob: ImageBlob, source: ImageSource) -> Result<&Preview, MediaError> {
        let preview = match Preview::create(&blob) {
            Ok(preview) => preview,
            Err(error) => {
                self.phase = AcquisitionPhase::Idle;
                return Err(error.into());
            }
        };
        tracing::debug!(%source, bytes = blob.len(), "previewing");
        self.phase = AcquisitionPhase::Previewing;
        let captured = self.current.insert(CapturedImage {
            blob,
            source,
            preview,
        });
        Ok(&captured.preview)
    }

    fn close_camera(&mut self) {
        if let Some(session) = self.session.take() {
            session.release();
            self.camera_state = CameraState::Closed;
        }
    }

    fn release_current(&mut self) {
        if let Some(captured) = self.current.take() {
            captured.preview.release();
        }
    }
}

impl<D: CameraDevice> std::fmt::Debug for MediaAcquisitionController<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaAcquisitionController")
            .field("phase", &self.phase)
            .field("camera_state", &self.camera_state)
            .field("has_camera_session", &self.session.is_some())
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

/// Returns the controller to idle if a camera request is abandoned.
struct PendingRequest<'a> {
    phase: &'a mut AcquisitionPhase,
    camera_state: &'a mut CameraState,
    armed: bool,
}

impl PendingRequest<'_> {
    fn settle(mut self, phase: AcquisitionPhase, camera_state: CameraState) {
        *self.phase = phase;
        *self.camera_state = camera_state;
        self.armed = false;
    }
}

impl Drop for PendingRequest<'_> {
    fn drop(&mut self) {
        if self.armed {
            *self.phase = AcquisitionPhase::Idle;
            *self.camera_state = CameraState::Closed;
            tracing::debug!("camera request abandoned");
        }
    }
}
