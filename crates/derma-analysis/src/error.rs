use thiserror::Error;

/// Classified submission failures.
///
/// `Clone` so the flow can keep a copy in its `Failed` status while the
/// caller gets its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Submit was called without an image.
    #[error("no image to analyse")]
    Precondition,

    #[error("an analysis is already in progress")]
    AlreadyInProgress,

    /// No response reached us.
    #[error("cannot reach the analysis service: {0}")]
    Connectivity(String),

    /// The service answered with a non-success status.
    #[error("analysis service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// The service answered 2xx with a body we cannot use.
    #[error("analysis failed: unexpected response from the service ({0})")]
    Contract(String),

    #[error("HTTP client setup failed: {0}")]
    Setup(String),
}

impl AnalysisError {
    /// Whether retrying the same request may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Connectivity(_) => true,
            Self::Service { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
