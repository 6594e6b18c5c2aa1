//! # derma-analysis
//!
//! Submits an acquired image to the remote analysis service.
//!
//! - [`SubmissionFlow`]: idle / submitting / succeeded / failed state machine,
//!   one request in flight at a time
//! - [`AnalysisTransport`]: the seam to the service; [`HttpAnalysisClient`]
//!   is the reqwest multipart implementation
//! - [`classify`]: maps responses onto [`AnalysisError`] or an
//!   [`AnalysisResult`] holding both the verbatim JSON and the canonical
//!   [`derma_core::Assessment`]

pub mod classify;
pub mod client;
pub mod error;
pub mod flow;
pub mod transport;

pub use classify::{AnalysisResult, classify};
pub use client::{FILE_FIELD, HttpAnalysisClient, build_http_client};
pub use error::AnalysisError;
pub use flow::{SubmissionFlow, SubmissionStatus};
pub use transport::{AnalysisRequest, AnalysisTransport, TransportResponse};
