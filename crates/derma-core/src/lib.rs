//! # derma-core
//!
//! Core domain types shared across the derma crates:
//! - Image blobs, MIME/source enums
//! - Acquisition and camera state enums with transition tables
//! - Survey documents and the context derived from them
//! - Analysis response variants and the canonical assessment

pub mod analysis;
pub mod context;
pub mod enums;
pub mod image;
pub mod survey;

pub use analysis::{AnalysisPayload, Assessment, AssessmentKind, Recommendation};
pub use context::SurveyContext;
pub use enums::{AcquisitionPhase, CameraFacing, CameraState, ImageMime, ImageSource};
pub use image::ImageBlob;
pub use survey::{
    BasicInfo, MedicalHistory, SURVEY_VERSION, SkinInfo, SkinType, SunExposure, SurveyData,
};
