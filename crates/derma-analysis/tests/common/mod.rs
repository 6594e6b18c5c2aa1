//! Scripted transport shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use derma_analysis::{AnalysisError, AnalysisRequest, AnalysisTransport, TransportResponse};
use derma_core::ImageMime;
use tokio::sync::Notify;

/// What the transport saw for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenRequest {
    pub file_name: String,
    pub mime: ImageMime,
    pub bytes: usize,
    pub fields: Vec<(String, String)>,
    pub token: Option<String>,
}

#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<TransportResponse, AnalysisError>>>,
    seen: Mutex<Vec<SeenRequest>>,
    calls: AtomicUsize,
    /// When set, each request signals `started` and then waits on `release`.
    gate: Option<(Arc<Notify>, Arc<Notify>)>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, status: u16, body: &str) -> Self {
        self.push(Ok(TransportResponse::new(status, body)))
    }

    pub fn fail(self, error: AnalysisError) -> Self {
        self.push(Err(error))
    }

    /// Hold requests until `release` is notified; `started` fires once a
    /// request is in flight.
    pub fn gated(mut self) -> (Self, Arc<Notify>, Arc<Notify>) {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        self.gate = Some((Arc::clone(&started), Arc::clone(&release)));
        (self, started, release)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    fn push(self, reply: Result<TransportResponse, AnalysisError>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }
}

impl AnalysisTransport for ScriptedTransport {
    async fn send(&self, request: AnalysisRequest<'_>) -> Result<TransportResponse, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(SeenRequest {
            file_name: request.image.file_name.clone(),
            mime: request.image.mime,
            bytes: request.image.len(),
            fields: request
                .context
                .map(|context| {
                    context
                        .form_fields()
                        .into_iter()
                        .map(|(name, value)| (name.to_string(), value))
                        .collect()
                })
                .unwrap_or_default(),
            token: request.token.map(str::to_string),
        });

        if let Some((started, release)) = &self.gate {
            started.notify_one();
            release.notified().await;
        }

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted reply left")
    }
}

pub const TREATMENT_BODY: &str = r#"{
    "confidence": 92,
    "recommendations": [
        {"treatment": "Dermal Filler", "area": "Nasolabial folds", "severity": "Moderate",
         "volume": "1ml", "estimatedCost": "£350-450"}
    ],
    "totalCost": "£350-450"
}"#;
