//! # derma-media
//!
//! Obtains the image to analyse, from a file or a live camera.
//!
//! [`MediaAcquisitionController`] enforces the exclusivity rules: the two
//! acquisition paths never overlap, at most one camera stream is open, and
//! at most one [`Preview`] exists. Hardware sits behind [`CameraDevice`] so
//! tests and headless runs can substitute [`ReplayCamera`] or a fake.

pub mod capture;
pub mod controller;
pub mod device;
pub mod error;
pub mod picked;
pub mod preview;
pub mod replay;
pub mod session;

pub use capture::{CAPTURE_FILE_NAME, encode_frame};
pub use controller::{CapturedImage, MediaAcquisitionController};
pub use device::{CameraDevice, NoCamera, NoStream, StreamRequest, VideoFrame, VideoStream};
pub use error::{DeviceError, MediaError, ValidationError};
pub use picked::PickedFile;
pub use preview::Preview;
pub use replay::{ReplayCamera, ReplayStream};
pub use session::CameraSession;
