//! Wire types of the Replicate predictions API
//!
//! Converts between the port's [`PredictionRequest`]/[`Prediction`] and the
//! JSON bodies sent to and received from `/v1/predictions`.

use counsel_application::{Prediction, PredictionRequest, PredictionStatus};
use counsel_domain::PromptMessage;
use serde::{Deserialize, Serialize};

// ─── Domain → Replicate ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreatePrediction<'a> {
    pub version: &'a str,
    pub input: PredictionInput<'a>,
}

#[derive(Debug, Serialize)]
pub struct PredictionInput<'a> {
    pub messages: &'a [PromptMessage],
    pub temperature: f32,
    pub max_tokens: u32,
}

impl<'a> From<&'a PredictionRequest> for CreatePrediction<'a> {
    fn from(request: &'a PredictionRequest) -> Self {
        Self {
            version: &request.model,
            input: PredictionInput {
                messages: &request.messages,
                temperature: request.temperature,
                max_tokens: request.max_tokens,
            },
        }
    }
}

// ─── Replicate → Domain ──────────────────────────────────────────

/// Output is streamed as string fragments by language models, but some
/// models return a single string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PredictionOutput {
    Fragments(Vec<String>),
    Text(String),
}

impl PredictionOutput {
    fn into_fragments(self) -> Vec<String> {
        match self {
            PredictionOutput::Fragments(fragments) => fragments,
            PredictionOutput::Text(text) => vec![text],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionBody {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub output: Option<PredictionOutput>,
    /// A string for model errors, occasionally a structured object.
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl From<PredictionBody> for Prediction {
    fn from(body: PredictionBody) -> Self {
        let error = body.error.and_then(|e| match e {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s),
            other => Some(other.to_string()),
        });
        Prediction {
            id: body.id,
            status: PredictionStatus::parse(body.status.as_deref().unwrap_or("")),
            output: body.output.map(PredictionOutput::into_fragments),
            error,
        }
    }
}
