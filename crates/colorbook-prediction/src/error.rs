use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PredictionError>;

/// Errors raised while talking to the prediction service
#[derive(Debug, Error)]
pub enum PredictionError {
    /// Token missing or rejected by the service
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Service answered with a non-success status
    #[error("Prediction service error ({status}): {message}")]
    ServiceError { status: u16, message: String },

    /// Network, TLS, or per-request timeout failure
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Service answered 2xx with a body we could not understand
    #[error("Invalid response from prediction service: {0}")]
    InvalidResponse(String),

    /// Prediction still pending when the polling deadline passed
    #[error("Prediction {id} did not finish within {deadline:?}")]
    Timeout { id: String, deadline: Duration },

    /// Client could not be constructed
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
