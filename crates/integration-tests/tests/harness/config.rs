//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::time::Duration;

use colorbook_config::{Config, CorsConfig, PollConfig, PredictionConfig, ServerConfig};
use secrecy::SecretString;

/// Token the mock prediction service expects
pub const TEST_TOKEN: &str = "r8_test_token";

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with a token and a fast poll cadence
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    ..ServerConfig::default()
                },
                prediction: PredictionConfig {
                    api_token: Some(SecretString::from(TEST_TOKEN)),
                    poll: PollConfig {
                        interval: Duration::from_millis(10),
                        deadline: Duration::from_secs(5),
                    },
                    ..PredictionConfig::default()
                },
                telemetry: None,
            },
        }
    }

    /// Point the prediction client at a mock backend
    pub fn with_prediction_service(mut self, base_url: &str) -> Self {
        self.config.prediction.base_url = base_url.parse().expect("valid URL");
        self
    }

    /// Forward an upstream `OpenAI` key in the model input
    pub fn with_openai_key(mut self, key: &str) -> Self {
        self.config.prediction.openai_api_key = Some(SecretString::from(key));
        self
    }

    /// Drop the prediction service token
    pub fn without_token(mut self) -> Self {
        self.config.prediction.api_token = None;
        self
    }

    /// Override the poll cadence
    pub fn with_poll(mut self, interval: Duration, deadline: Duration) -> Self {
        self.config.prediction.poll = PollConfig { interval, deadline };
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
