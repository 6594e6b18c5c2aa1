use std::future::Future;

use derma_core::{ImageBlob, SurveyContext};

use crate::error::AnalysisError;

/// Everything one analysis call sends.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisRequest<'a> {
    pub image: &'a ImageBlob,
    pub context: Option<&'a SurveyContext>,
    pub token: Option<&'a str>,
}

/// A response that reached us, successful or not. Classification happens
/// in the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Carries one request to the analysis service.
///
/// Implementations return `Err` only for [`AnalysisError::Connectivity`]
/// (or client setup) failures; any HTTP status is a response.
pub trait AnalysisTransport {
    fn send(
        &self,
        request: AnalysisRequest<'_>,
    ) -> impl Future<Output = Result<TransportResponse, AnalysisError>> + Send;
}
