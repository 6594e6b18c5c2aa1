use std::future::Future;

use derma_core::{SurveyContext, SurveyData};

use crate::context::build_context;
use crate::error::SurveyError;

/// Per-user survey persistence.
///
/// Each call is atomic from the caller's point of view: a concurrent reader
/// sees the previous document or the new one, never a partial write.
pub trait SurveyStore {
    /// The saved survey for `username`, or `None` if there is none.
    fn load(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<SurveyData>, SurveyError>> + Send;

    fn save(
        &self,
        username: &str,
        survey: &SurveyData,
    ) -> impl Future<Output = Result<(), SurveyError>> + Send;
}

/// Resolve the analysis context for `username`.
///
/// A missing survey or a failing store yields `None`; submission proceeds
/// without context either way.
pub async fn load_context<S: SurveyStore>(store: &S, username: &str) -> Option<SurveyContext> {
    match store.load(username).await {
        Ok(Some(survey)) => {
            tracing::debug!(username, "survey context attached");
            Some(build_context(&survey))
        }
        Ok(None) => {
            tracing::debug!(username, "no survey on file");
            None
        }
        Err(error) => {
            tracing::warn!(username, %error, "survey load failed; continuing without context");
            None
        }
    }
}

pub(crate) fn validate_username(username: &str) -> Result<&str, SurveyError> {
    let trimmed = username.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_control) {
        return Err(SurveyError::InvalidUser(username.to_string()));
    }
    Ok(trimmed)
}
