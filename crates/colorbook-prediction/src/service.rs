use async_trait::async_trait;

use crate::{
    error::Result,
    types::{CreatePrediction, Prediction},
};

/// Hosted prediction service
///
/// Implemented by the HTTP client and by test doubles; the orchestrator
/// only ever sees this trait.
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Submit a new prediction
    async fn create(&self, request: &CreatePrediction) -> Result<Prediction>;

    /// Fetch the current state of a prediction
    async fn get(&self, id: &str) -> Result<Prediction>;

    /// Ask the service to stop a prediction
    async fn cancel(&self, id: &str) -> Result<Prediction>;

    /// Name used in logs
    fn name(&self) -> &str;
}
