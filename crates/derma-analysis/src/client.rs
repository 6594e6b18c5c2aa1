//! reqwest-based transport for the analysis endpoint.

use derma_config::ApiConfig;
use reqwest::multipart::{Form, Part};

use crate::error::AnalysisError;
use crate::transport::{AnalysisRequest, AnalysisTransport, TransportResponse};

/// Multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    http: reqwest::Client,
    analyze_url: String,
    health_url: String,
}

impl HttpAnalysisClient {
    /// Build a client with the configured user agent and timeout.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Setup` if the reqwest client cannot be built.
    pub fn new(api: &ApiConfig) -> Result<Self, AnalysisError> {
        Ok(Self::with_client(build_http_client(api)?, api))
    }

    /// Reuse an existing reqwest client.
    #[must_use]
    pub fn with_client(http: reqwest::Client, api: &ApiConfig) -> Self {
        Self {
            http,
            analyze_url: api.analyze_url(),
            health_url: api.health_url(),
        }
    }

    #[must_use]
    pub fn analyze_url(&self) -> &str {
        &self.analyze_url
    }

    /// Fetch the service's health document.
    ///
    /// # Errors
    ///
    /// `Connectivity` if the service is unreachable, `Service` for a non-2xx
    /// status, `Contract` if the body is not JSON.
    pub async fn health(&self) -> Result<serde_json::Value, AnalysisError> {
        let resp = self
            .http
            .get(&self.health_url)
            .send()
            .await
            .map_err(connectivity)?;
        let status = resp.status();
        let body = resp.text().await.map_err(connectivity)?;

        if !status.is_success() {
            return Err(AnalysisError::Service {
                status: status.as_u16(),
                message: body,
            });
        }
        serde_json::from_str(&body)
            .map_err(|e| AnalysisError::Contract(format!("health body is not JSON: {e}")))
    }

    fn form(request: &AnalysisRequest<'_>) -> Result<Form, AnalysisError> {
        let image = request.image;
        let part = Part::bytes(image.data.clone())
            .file_name(image.file_name.clone())
            .mime_str(image.mime.as_str())
            .map_err(|e| AnalysisError::Setup(format!("invalid MIME type: {e}")))?;

        let mut form = Form::new().part(FILE_FIELD, part);
        if let Some(context) = request.context {
            for (name, value) in context.form_fields() {
                form = form.text(name, value);
            }
        }
        Ok(form)
    }
}

impl AnalysisTransport for HttpAnalysisClient {
    async fn send(&self, request: AnalysisRequest<'_>) -> Result<TransportResponse, AnalysisError> {
        let form = Self::form(&request)?;

        let mut builder = self.http.post(&self.analyze_url).multipart(form);
        if let Some(token) = request.token {
            builder = builder.bearer_auth(token);
        }

        tracing::debug!(
            url = %self.analyze_url,
            bytes = request.image.len(),
            with_context = request.context.is_some(),
            authenticated = request.token.is_some(),
            "sending analysis request"
        );
        let resp = builder.send().await.map_err(connectivity)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(connectivity)?;
        Ok(TransportResponse { status, body })
    }
}

/// A reqwest client carrying the configured user agent and timeout.
///
/// # Errors
///
/// Returns `AnalysisError::Setup` if TLS or proxy initialisation fails.
pub fn build_http_client(api: &ApiConfig) -> Result<reqwest::Client, AnalysisError> {
    let mut builder = reqwest::Client::builder().user_agent(api.user_agent.as_str());
    if let Some(timeout) = api.timeout() {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| AnalysisError::Setup(e.to_string()))
}

fn connectivity(error: reqwest::Error) -> AnalysisError {
    let detail = if error.is_timeout() {
        format!("request timed out ({error})")
    } else {
        let mut detail = error.to_string();
        let mut source = std::error::Error::source(&error);
        while let Some(cause) = source {
            detail.push_str(": ");
            detail.push_str(&cause.to_string());
            source = cause.source();
        }
        detail
    };
    AnalysisError::Connectivity(detail)
}
