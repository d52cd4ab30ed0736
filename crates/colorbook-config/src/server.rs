use std::net::SocketAddr;

use serde::Deserialize;

use crate::{cors::CorsConfig, health::HealthConfig};

/// Default cap on request bodies (20 MiB), sized for phone photos
pub const DEFAULT_BODY_LIMIT: usize = 20 << 20;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    /// Maximum accepted request body in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
    /// Serve the browser composer page at `/`
    #[serde(default = "default_true")]
    pub serve_ui: bool,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub cors: Option<CorsConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: None,
            body_limit: DEFAULT_BODY_LIMIT,
            serve_ui: true,
            health: HealthConfig::default(),
            cors: None,
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_body_limit() -> usize {
    DEFAULT_BODY_LIMIT
}

#[allow(clippy::missing_const_for_fn)]
fn default_true() -> bool {
    true
}
