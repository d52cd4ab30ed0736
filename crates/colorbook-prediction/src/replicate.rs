use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

use crate::{
    error::{PredictionError, Result},
    service::PredictionService,
    types::{CreatePrediction, Prediction},
};

/// Replicate HTTP API client
pub struct ReplicateClient {
    name: String,
    client: Client,
    api_token: Option<SecretString>,
    base_url: Url,
}

impl ReplicateClient {
    /// Create a client for the given API base URL
    ///
    /// A missing token is accepted here; every call then fails with
    /// [`PredictionError::AuthenticationFailed`].
    pub fn new(base_url: Url, api_token: Option<SecretString>, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| PredictionError::ConfigError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            name: "replicate".to_string(),
            client,
            api_token,
            base_url: with_trailing_slash(base_url),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| PredictionError::ConfigError(format!("invalid prediction endpoint '{path}': {e}")))
    }

    fn token(&self) -> Result<&str> {
        self.api_token
            .as_ref()
            .map(|secret| secret.expose_secret())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                PredictionError::AuthenticationFailed("prediction service API token is not configured".to_string())
            })
    }

    async fn send(&self, request: reqwest::RequestBuilder, action: &str) -> Result<Prediction> {
        let response = request.bearer_auth(self.token()?).send().await.map_err(|e| {
            tracing::error!(provider = %self.name, action, error = %e, "prediction request failed");
            PredictionError::ConnectionError(format!("Failed to {action} prediction: {e}"))
        })?;

        let response = self.check_status(response, action).await?;

        response.json::<Prediction>().await.map_err(|e| {
            tracing::error!(provider = %self.name, action, error = %e, "failed to parse prediction response");
            PredictionError::InvalidResponse(e.to_string())
        })
    }

    async fn check_status(&self, response: Response, action: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_detail(&body);

        tracing::error!(
            provider = %self.name,
            action,
            status = %status,
            "prediction service API error"
        );

        Err(match status.as_u16() {
            401 | 403 => PredictionError::AuthenticationFailed(message),
            code => PredictionError::ServiceError { status: code, message },
        })
    }
}

/// Error body shape used by the Replicate API
#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

/// Pull the most useful message out of an error body
fn error_detail(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.detail.or(parsed.title))
        .filter(|detail| !detail.is_empty())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                "Unknown error".to_string()
            } else {
                body.trim().to_string()
            }
        })
}

/// `Url::join` replaces the last segment unless the base ends with `/`
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[async_trait]
impl PredictionService for ReplicateClient {
    async fn create(&self, request: &CreatePrediction) -> Result<Prediction> {
        let url = self.endpoint("predictions")?;

        tracing::debug!(provider = %self.name, version = %request.version, "creating prediction");

        let prediction = self.send(self.client.post(url).json(request), "create").await?;

        tracing::debug!(
            provider = %self.name,
            prediction_id = %prediction.id,
            status = %prediction.status,
            "prediction created"
        );

        Ok(prediction)
    }

    async fn get(&self, id: &str) -> Result<Prediction> {
        let url = self.endpoint(&format!("predictions/{id}"))?;
        self.send(self.client.get(url), "fetch").await
    }

    async fn cancel(&self, id: &str) -> Result<Prediction> {
        let url = self.endpoint(&format!("predictions/{id}/cancel"))?;
        self.send(self.client.post(url), "cancel").await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
