//! Turns a raw transport response into a result or a classified error.

use derma_core::{AnalysisPayload, Assessment};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::transport::TransportResponse;

const EXCERPT_CHARS: usize = 200;

/// A successful analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The service's JSON, verbatim.
    pub raw: serde_json::Value,
    /// `raw` resolved into the canonical shape.
    pub assessment: Assessment,
}

/// Classify `response`.
///
/// # Errors
///
/// `AnalysisError::Service` for a non-2xx status, `AnalysisError::Contract`
/// for a 2xx body that is not JSON, lacks a numeric `confidence` or matches
/// neither payload variant.
pub fn classify(response: TransportResponse) -> Result<AnalysisResult, AnalysisError> {
    let TransportResponse { status, body } = response;

    if !(200..300).contains(&status) {
        return Err(AnalysisError::Service {
            status,
            message: service_message(status, &body),
        });
    }

    let raw: serde_json::Value = serde_json::from_str(&body)
        .map_err(|e| contract_violation(&body, format!("body is not JSON: {e}")))?;

    if raw.get("confidence").and_then(serde_json::Value::as_f64).is_none() {
        return Err(contract_violation(&body, "missing numeric `confidence`".into()));
    }

    let payload = AnalysisPayload::deserialize(&raw)
        .map_err(|e| contract_violation(&body, format!("unrecognised payload shape: {e}")))?;

    Ok(AnalysisResult {
        raw,
        assessment: payload.into(),
    })
}

/// `detail` from a JSON error body, else `HTTP <status>: <reason>`.
fn service_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("detail")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        })
        .filter(|detail| !detail.trim().is_empty())
        .unwrap_or_else(|| {
            let reason = reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|code| code.canonical_reason())
                .unwrap_or("Unknown Status");
            format!("HTTP {status}: {reason}")
        })
}

fn contract_violation(body: &str, reason: String) -> AnalysisError {
    let excerpt: String = body.chars().take(EXCERPT_CHARS).collect();
    tracing::error!(%reason, body = %excerpt, "analysis response violates the expected contract");
    AnalysisError::Contract(reason)
}
