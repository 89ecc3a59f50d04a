//! Submit-then-poll state machine.
//!
//! ```text
//! submit ──▶ Submitted ──fetch──▶ Polling(n) ──fetch──▶ ...
//!    │            │                   │
//!    │            ├──────────────────┴──▶ Succeeded | Failed | TimedOut
//!    └── immediate output ──────────────▶ Succeeded
//! ```
//!
//! Transitions are pure so the attempt ceiling and the failure/timeout
//! distinction can be tested without a network or a real clock.

use crate::ports::prediction_provider::{Prediction, PredictionStatus, ProviderError};
use thiserror::Error;

/// Failures inside the reply generator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Prediction failed to start")]
    StartFailed,

    #[error("AI prediction failed: {}", .0.as_deref().unwrap_or("no reason given"))]
    PredictionFailed(Option<String>),

    #[error("Prediction was canceled")]
    Canceled,

    #[error("Response timeout after {attempts} poll attempts")]
    Timeout { attempts: u32 },
}

/// State of one prediction as seen by the poller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    /// Accepted by the provider; no fetch has happened yet.
    Submitted { id: String },
    /// `attempt` fetches have completed without a terminal answer.
    Polling { id: String, attempt: u32 },
    Succeeded { text: String },
    Failed { error: InferenceError },
    TimedOut { attempts: u32 },
}

impl PollState {
    /// Initial state from a submission response.
    pub fn from_submission(prediction: Prediction) -> Self {
        if let Some(text) = prediction.completed_text() {
            return PollState::Succeeded { text };
        }
        match prediction.status {
            PredictionStatus::Failed => PollState::Failed {
                error: InferenceError::PredictionFailed(prediction.error),
            },
            PredictionStatus::Canceled => PollState::Failed {
                error: InferenceError::Canceled,
            },
            _ => match prediction.id {
                Some(id) if !id.is_empty() => PollState::Submitted { id },
                _ => PollState::Failed {
                    error: InferenceError::StartFailed,
                },
            },
        }
    }

    /// Apply the outcome of fetch number `completed + 1`.
    ///
    /// A fetch error is soft unless it happens on the final attempt, in
    /// which case it becomes the failure. A failed or canceled status ends
    /// polling immediately.
    pub fn advance(
        id: String,
        completed: u32,
        outcome: Result<Prediction, ProviderError>,
        max_attempts: u32,
    ) -> Self {
        let attempt = completed + 1;
        let is_final = attempt >= max_attempts;

        match outcome {
            Ok(prediction) => {
                if let Some(text) = prediction.completed_text() {
                    return PollState::Succeeded { text };
                }
                match prediction.status {
                    PredictionStatus::Failed => PollState::Failed {
                        error: InferenceError::PredictionFailed(prediction.error),
                    },
                    PredictionStatus::Canceled => PollState::Failed {
                        error: InferenceError::Canceled,
                    },
                    _ if is_final => PollState::TimedOut { attempts: attempt },
                    _ => PollState::Polling { id, attempt },
                }
            }
            Err(error) if is_final => PollState::Failed {
                error: error.into(),
            },
            Err(_) => PollState::Polling { id, attempt },
        }
    }
}
