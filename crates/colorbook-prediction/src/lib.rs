#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

//! Client for hosted prediction services
//!
//! A prediction is an asynchronous job: it is created once, then fetched
//! until it reaches a terminal status. [`PredictionService`] abstracts the
//! HTTP API so the caller can be exercised against a test double, and
//! [`wait_for_completion`] drives the bounded status loop.

mod error;
mod poll;
mod replicate;
mod service;
mod types;

use std::sync::Arc;

use colorbook_config::PredictionConfig;

pub use error::{PredictionError, Result};
pub use poll::{PollPolicy, wait_for_completion};
pub use replicate::ReplicateClient;
pub use service::PredictionService;
pub use types::{CreatePrediction, Prediction, PredictionStatus};

/// Build the prediction service client from configuration
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed
pub fn build_client(config: &PredictionConfig) -> anyhow::Result<Arc<dyn PredictionService>> {
    let client = ReplicateClient::new(config.base_url.clone(), config.api_token.clone(), config.request_timeout)
        .map_err(|e| anyhow::anyhow!("Failed to initialize prediction client: {e}"))?;

    tracing::debug!(base_url = %config.base_url, model = %config.model, "prediction client initialized");

    Ok(Arc::new(client))
}
