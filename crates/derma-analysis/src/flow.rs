//! The submission state machine.
//!
//! ```text
//! idle → submitting → succeeded | failed
//! succeeded | failed → idle (reset) | submitting (new submit)
//! ```
//!
//! At most one request is in flight per flow; a second `submit` is
//! rejected rather than queued. Dropping an in-flight `submit` future
//! cancels it and returns the flow to idle. `reset` during a submission
//! detaches it: the request runs to completion but its result is discarded.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use derma_core::{ImageBlob, SurveyContext};

use crate::classify::{AnalysisResult, classify};
use crate::error::AnalysisError;
use crate::transport::{AnalysisRequest, AnalysisTransport};

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionStatus {
    Idle,
    Submitting,
    Succeeded(AnalysisResult),
    Failed(AnalysisError),
}

impl SubmissionStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
struct FlowState {
    status: SubmissionStatus,
    /// Bumped by every submit and reset; a completion only lands if its
    /// generation is still current.
    generation: u64,
}

pub struct SubmissionFlow<T> {
    transport: T,
    state: Mutex<FlowState>,
}

impl<T: AnalysisTransport + Sync> SubmissionFlow<T> {
    pub const fn new(transport: T) -> Self {
        Self {
            transport,
            state: Mutex::new(FlowState {
                status: SubmissionStatus::Idle,
                generation: 0,
            }),
        }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    pub fn status(&self) -> SubmissionStatus {
        self.lock().status.clone()
    }

    /// Submit `image` with optional survey context and bearer token.
    ///
    /// Issues exactly one request per accepted call. The outcome is both
    /// returned and recorded in [`Self::status`].
    ///
    /// # Errors
    ///
    /// - `AlreadyInProgress` while another submission is in flight (status
    ///   untouched, nothing sent)
    /// - `Precondition` without an image (nothing sent)
    /// - `Connectivity`, `Service` or `Contract` from the request itself
    pub async fn submit(
        &self,
        image: Option<&ImageBlob>,
        context: Option<&SurveyContext>,
        token: Option<&str>,
    ) -> Result<AnalysisResult, AnalysisError> {
        let (image, generation) = {
            let mut state = self.lock();
            if state.status.is_submitting() {
                tracing::warn!("submission rejected: another one is in flight");
                return Err(AnalysisError::AlreadyInProgress);
            }
            let Some(image) = image else {
                tracing::warn!("submission rejected: no image");
                state.status = SubmissionStatus::Failed(AnalysisError::Precondition);
                return Err(AnalysisError::Precondition);
            };
            state.generation += 1;
            state.status = SubmissionStatus::Submitting;
            (image, state.generation)
        };
        tracing::debug!(generation, bytes = image.len(), "submission started");

        let in_flight = InFlight {
            flow: self,
            generation,
            armed: true,
        };
        let request = AnalysisRequest {
            image,
            context,
            token,
        };
        let outcome = self.transport.send(request).await.and_then(classify);
        in_flight.disarm();

        self.settle(generation, outcome)
    }

    /// Return to idle. A submission still in flight is detached.
    pub fn reset(&self) {
        let mut state = self.lock();
        if state.status.is_submitting() {
            tracing::debug!(generation = state.generation, "detaching in-flight submission");
        }
        state.generation += 1;
        state.status = SubmissionStatus::Idle;
    }

    fn settle(
        &self,
        generation: u64,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> Result<AnalysisResult, AnalysisError> {
        let mut state = self.lock();
        if state.generation != generation {
            tracing::info!(generation, "discarding late analysis result after reset");
            return outcome;
        }

        state.status = match &outcome {
            Ok(result) => {
                tracing::info!(
                    kind = %result.assessment.kind,
                    confidence = result.assessment.confidence,
                    recommendations = result.assessment.recommendations.len(),
                    "analysis succeeded"
                );
                SubmissionStatus::Succeeded(result.clone())
            }
            Err(error) => {
                tracing::warn!(%error, retryable = error.is_retryable(), "analysis failed");
                SubmissionStatus::Failed(error.clone())
            }
        };
        outcome
    }

    fn lock(&self) -> MutexGuard<'_, FlowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> fmt::Debug for SubmissionFlow<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("SubmissionFlow")
            .field("status", &state.status.as_str())
            .field("generation", &state.generation)
            .finish_non_exhaustive()
    }
}

/// Returns the flow to idle if the submit future is dropped mid-request.
struct InFlight<'a, T> {
    flow: &'a SubmissionFlow<T>,
    generation: u64,
    armed: bool,
}

impl<T> InFlight<'_, T> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<T> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.flow.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.generation == self.generation && state.status.is_submitting() {
            state.status = SubmissionStatus::Idle;
            tracing::debug!(generation = self.generation, "submission cancelled");
        }
    }
}
