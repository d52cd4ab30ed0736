use std::sync::Arc;

use colorbook_config::{GenerationSettings, PredictionConfig};
use colorbook_prediction::{
    CreatePrediction, PollPolicy, Prediction, PredictionService, PredictionStatus, wait_for_completion,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;

use crate::{
    encode,
    error::{GenerateError, Result},
    prompt,
    types::GenerationRequest,
};

/// Turns an upload into a coloring page through the prediction service
pub struct Orchestrator {
    service: Arc<dyn PredictionService>,
    model: String,
    openai_api_key: Option<SecretString>,
    settings: GenerationSettings,
    poll: PollPolicy,
}

/// Model input for `openai/gpt-image-1`
#[derive(Debug, Serialize)]
struct ColoringPageInput<'a> {
    prompt: String,
    quality: &'a str,
    background: &'a str,
    moderation: &'a str,
    aspect_ratio: &'a str,
    input_images: Vec<String>,
    output_format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    openai_api_key: Option<&'a str>,
    number_of_images: u8,
    output_compression: u8,
}

impl Orchestrator {
    pub fn new(service: Arc<dyn PredictionService>, config: &PredictionConfig) -> Self {
        Self {
            service,
            model: config.model.clone(),
            openai_api_key: config
                .openai_api_key
                .clone()
                .filter(|key| !key.expose_secret().trim().is_empty()),
            settings: config.settings.clone(),
            poll: config.poll.into(),
        }
    }

    /// Override the polling cadence
    #[must_use]
    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// Run one generation and return the image URL
    ///
    /// Submits exactly one prediction, waits for it to settle, and
    /// validates the output. Nothing is retried.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let create = CreatePrediction {
            version: self.model.clone(),
            input: self.input(request)?,
        };

        let prediction = self.service.create(&create).await?;

        tracing::info!(
            provider = self.service.name(),
            prediction_id = %prediction.id,
            status = %prediction.status,
            style = request.style.as_str(),
            "prediction submitted"
        );

        let prediction = wait_for_completion(self.service.as_ref(), prediction, self.poll).await?;

        tracing::info!(
            prediction_id = %prediction.id,
            status = %prediction.status,
            "prediction settled"
        );

        image_url(&prediction)
    }

    fn input(&self, request: &GenerationRequest) -> Result<Value> {
        let settings = &self.settings;

        let input = ColoringPageInput {
            prompt: prompt::compose_prompt(request.style, request.name.as_deref()),
            quality: &settings.quality,
            background: &settings.background,
            moderation: &settings.moderation,
            aspect_ratio: &settings.aspect_ratio,
            input_images: vec![encode::data_uri(&request.image)],
            output_format: &settings.output_format,
            openai_api_key: self.openai_api_key.as_ref().map(|secret| secret.expose_secret()),
            number_of_images: settings.number_of_images,
            output_compression: settings.output_compression,
        };

        serde_json::to_value(input).map_err(|e| GenerateError::Internal(format!("failed to encode model input: {e}")))
    }
}

/// Map a settled prediction to its first output URL
fn image_url(prediction: &Prediction) -> Result<String> {
    match prediction.status {
        PredictionStatus::Succeeded => {}
        PredictionStatus::Failed => return Err(GenerateError::GenerationFailed(prediction.failure_reason())),
        other => return Err(GenerateError::Incomplete(other)),
    }

    let first = prediction
        .output
        .as_ref()
        .and_then(Value::as_array)
        .and_then(|images| images.first())
        .ok_or(GenerateError::NoImages)?;

    match first.as_str() {
        Some(url) if url.starts_with("http") => Ok(url.to_string()),
        _ => Err(GenerateError::InvalidImageUrl),
    }
}
