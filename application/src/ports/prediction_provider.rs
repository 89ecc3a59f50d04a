//! Prediction provider port
//!
//! Defines the two-step submit/fetch protocol of an asynchronous inference
//! API. Implementations (adapters) live in the infrastructure layer.

use async_trait::async_trait;
use counsel_domain::PromptMessage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during a single provider call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Inference provider not configured: {0}")]
    NotConfigured(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Provider returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Could not decode provider response: {0}")]
    Decode(String),
}

/// A generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub model: String,
    pub messages: Vec<PromptMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Lifecycle status reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
    Other(String),
}

impl PredictionStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "starting" => PredictionStatus::Starting,
            "processing" => PredictionStatus::Processing,
            "succeeded" => PredictionStatus::Succeeded,
            "failed" => PredictionStatus::Failed,
            "canceled" => PredictionStatus::Canceled,
            other => PredictionStatus::Other(other.to_string()),
        }
    }
}

/// A prediction snapshot, as returned by submit or fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub id: Option<String>,
    pub status: PredictionStatus,
    /// Output fragments, in order.
    pub output: Option<Vec<String>>,
    pub error: Option<String>,
}

impl Prediction {
    /// The joined output text, if the prediction succeeded with output.
    pub fn completed_text(&self) -> Option<String> {
        match (&self.status, &self.output) {
            (PredictionStatus::Succeeded, Some(fragments)) => Some(fragments.concat()),
            _ => None,
        }
    }
}

/// Asynchronous prediction API
#[async_trait]
pub trait PredictionProvider: Send + Sync {
    /// Submit a new prediction.
    ///
    /// Must fail with [`ProviderError::NotConfigured`] before any network
    /// call when no credential is available.
    async fn submit(&self, request: &PredictionRequest) -> Result<Prediction, ProviderError>;

    /// Fetch the current state of a prediction by id
    async fn fetch(&self, prediction_id: &str) -> Result<Prediction, ProviderError>;
}
