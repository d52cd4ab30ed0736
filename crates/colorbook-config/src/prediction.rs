use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use url::Url;

/// Default Replicate API base URL
pub const DEFAULT_PREDICTION_BASE_URL: &str = "https://api.replicate.com/v1/";

/// Model the coloring pages are generated with
pub const DEFAULT_PREDICTION_MODEL: &str = "openai/gpt-image-1";

/// Prediction service configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PredictionConfig {
    /// Bearer token for the prediction service
    #[serde(default, deserialize_with = "deserialize_optional_secret")]
    pub api_token: Option<SecretString>,
    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Model identifier sent as the prediction version
    #[serde(default = "default_model")]
    pub model: String,
    /// Upstream `OpenAI` key passed through in the prediction input
    #[serde(default, deserialize_with = "deserialize_optional_secret")]
    pub openai_api_key: Option<SecretString>,
    /// Timeout for each individual HTTP call to the service
    #[serde(
        default = "default_request_timeout",
        deserialize_with = "crate::duration::deserialize_duration"
    )]
    pub request_timeout: Duration,
    /// Status polling behaviour
    #[serde(default)]
    pub poll: PollConfig,
    /// Fixed generation parameters
    #[serde(default)]
    pub settings: GenerationSettings,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            base_url: default_base_url(),
            model: default_model(),
            openai_api_key: None,
            request_timeout: default_request_timeout(),
            poll: PollConfig::default(),
            settings: GenerationSettings::default(),
        }
    }
}

impl PredictionConfig {
    /// Whether a non-blank service token is configured
    pub fn has_api_token(&self) -> bool {
        self.api_token
            .as_ref()
            .is_some_and(|token| !token.expose_secret().trim().is_empty())
    }
}

/// Blank secrets, typically from an unset `{{ env.VAR | default("") }}`,
/// count as unset
fn deserialize_optional_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let secret = Option::<SecretString>::deserialize(deserializer)?;
    Ok(secret.filter(|secret| !secret.expose_secret().trim().is_empty()))
}

/// Status polling configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PollConfig {
    /// Delay between status fetches
    #[serde(default = "default_poll_interval", deserialize_with = "crate::duration::deserialize_duration")]
    pub interval: Duration,
    /// Give up (and cancel the prediction) once this much time has passed
    #[serde(default = "default_poll_deadline", deserialize_with = "crate::duration::deserialize_duration")]
    pub deadline: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: default_poll_interval(),
            deadline: default_poll_deadline(),
        }
    }
}

/// Generation parameters sent with every prediction
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationSettings {
    #[serde(default = "default_quality")]
    pub quality: String,
    #[serde(default = "default_auto")]
    pub background: String,
    #[serde(default = "default_auto")]
    pub moderation: String,
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
    #[serde(default = "default_output_format")]
    pub output_format: String,
    /// 0-100
    #[serde(default = "default_output_compression")]
    pub output_compression: u8,
    /// Only the first image is returned to the caller
    #[serde(default = "default_number_of_images")]
    pub number_of_images: u8,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            quality: default_quality(),
            background: default_auto(),
            moderation: default_auto(),
            aspect_ratio: default_aspect_ratio(),
            output_format: default_output_format(),
            output_compression: default_output_compression(),
            number_of_images: default_number_of_images(),
        }
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_PREDICTION_BASE_URL).expect("must be a valid URL")
}

fn default_model() -> String {
    DEFAULT_PREDICTION_MODEL.to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

#[allow(clippy::missing_const_for_fn)]
fn default_poll_interval() -> Duration {
    Duration::from_secs(1)
}

#[allow(clippy::missing_const_for_fn)]
fn default_poll_deadline() -> Duration {
    Duration::from_secs(300)
}

fn default_quality() -> String {
    "high".to_string()
}

fn default_auto() -> String {
    "auto".to_string()
}

fn default_aspect_ratio() -> String {
    "2:3".to_string()
}

fn default_output_format() -> String {
    "png".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_output_compression() -> u8 {
    90
}

#[allow(clippy::missing_const_for_fn)]
fn default_number_of_images() -> u8 {
    1
}
