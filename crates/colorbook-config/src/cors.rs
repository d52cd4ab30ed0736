use std::time::Duration;

use serde::Deserialize;

/// CORS configuration for the generation API
///
/// Only needed when the composer page is hosted on a different origin
/// than the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins; empty or containing `"*"` allows any origin
    #[serde(default)]
    pub allow_origins: Vec<String>,
    /// How long browsers may cache preflight responses
    #[serde(default, deserialize_with = "crate::duration::deserialize_optional_duration")]
    pub max_age: Option<Duration>,
}

impl CorsConfig {
    /// Whether every origin is allowed
    pub fn allows_any_origin(&self) -> bool {
        self.allow_origins.is_empty() || self.allow_origins.iter().any(|origin| origin == "*")
    }
}
