#![allow(clippy::must_use_candidate)]

pub mod cors;
mod duration;
mod env;
pub mod health;
mod loader;
pub mod prediction;
pub mod server;
pub mod telemetry;

use secrecy::SecretString;
use serde::Deserialize;

pub use cors::*;
pub use health::*;
pub use prediction::*;
pub use server::*;
pub use telemetry::{ExportProtocol, ExporterConfig, LogFormat, TelemetryConfig};

/// Environment variable holding the prediction service API token
pub const PREDICTION_TOKEN_ENV: &str = "REPLICATE_API_TOKEN";

/// Environment variable holding the upstream `OpenAI` key forwarded in prediction input
pub const OPENAI_KEY_ENV: &str = "OPENAI_API_KEY";

/// Top-level Colorbook configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Prediction service configuration
    #[serde(default)]
    pub prediction: PredictionConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}

impl Config {
    /// Build a configuration from defaults and process environment only
    ///
    /// Used when no configuration file is given. Credentials come from
    /// `REPLICATE_API_TOKEN` and `OPENAI_API_KEY`; empty values count as unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.prediction.api_token = secret_from_env(PREDICTION_TOKEN_ENV);
        config.prediction.openai_api_key = secret_from_env(OPENAI_KEY_ENV);
        config
    }
}

fn secret_from_env(var: &str) -> Option<SecretString> {
    std::env::var(var)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(SecretString::from)
}
