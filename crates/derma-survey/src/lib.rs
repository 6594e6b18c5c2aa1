//! # derma-survey
//!
//! Survey persistence behind the [`SurveyStore`] contract, and the
//! derivation of analysis context from a stored survey.
//!
//! Stores:
//! - [`LocalSurveyStore`]: one JSON file per user
//! - [`RemoteSurveyStore`]: the backend's authenticated survey endpoints
//! - [`MemorySurveyStore`]: in-process

pub mod context;
pub mod error;
pub mod local;
pub mod memory;
pub mod remote;
pub mod store;

pub use context::build_context;
pub use error::SurveyError;
pub use local::LocalSurveyStore;
pub use memory::MemorySurveyStore;
pub use remote::RemoteSurveyStore;
pub use store::{SurveyStore, load_context};
