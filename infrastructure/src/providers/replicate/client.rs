//! Replicate prediction provider
//!
//! Implements [`PredictionProvider`] over the Replicate HTTP API:
//! `POST {base}/v1/predictions` to submit and
//! `GET {base}/v1/predictions/{id}` to poll.

use super::types::{CreatePrediction, PredictionBody};
use async_trait::async_trait;
use counsel_application::{Prediction, PredictionProvider, PredictionRequest, ProviderError};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Connection settings for [`ReplicatePredictionProvider`].
#[derive(Debug, Clone)]
pub struct ReplicateSettings {
    pub base_url: String,
    /// `None` makes every call fail with [`ProviderError::NotConfigured`].
    pub api_token: Option<String>,
    pub user_agent: String,
    pub request_timeout: Duration,
}

pub struct ReplicatePredictionProvider {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl ReplicatePredictionProvider {
    pub fn new(settings: ReplicateSettings) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(settings.user_agent)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if settings.api_token.is_none() {
            warn!("Replicate API token missing; chat turns will report the service as not configured");
        } else {
            info!(base_url = %settings.base_url, "Replicate provider initialized");
        }

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_token: settings.api_token,
        })
    }

    fn predictions_url(&self) -> String {
        format!("{}/v1/predictions", self.base_url)
    }

    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, ProviderError> {
        let token = self.api_token.as_deref().ok_or_else(|| {
            ProviderError::NotConfigured("REPLICATE_API_TOKEN is not configured".to_string())
        })?;
        Ok(builder.header(reqwest::header::AUTHORIZATION, format!("Token {}", token)))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Prediction, ProviderError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body: PredictionBody = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;
        Ok(body.into())
    }
}

#[async_trait]
impl PredictionProvider for ReplicatePredictionProvider {
    async fn submit(&self, request: &PredictionRequest) -> Result<Prediction, ProviderError> {
        let builder = self.authorized(self.client.post(self.predictions_url()))?;
        let prediction = self
            .send(builder.json(&CreatePrediction::from(request)))
            .await?;
        debug!(
            prediction = prediction.id.as_deref().unwrap_or("-"),
            "Prediction submitted: {:?}",
            prediction.status
        );
        Ok(prediction)
    }

    async fn fetch(&self, prediction_id: &str) -> Result<Prediction, ProviderError> {
        let url = format!("{}/{}", self.predictions_url(), prediction_id);
        let builder = self.authorized(self.client.get(url))?;
        self.send(builder).await
    }
}
