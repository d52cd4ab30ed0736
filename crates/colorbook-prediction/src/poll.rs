use std::time::Duration;

use colorbook_config::PollConfig;
use tokio::time::Instant;

use crate::{
    error::{PredictionError, Result},
    service::PredictionService,
    types::Prediction,
};

/// Polling cadence and upper bound for waiting on a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub deadline: Duration,
}

impl From<PollConfig> for PollPolicy {
    fn from(config: PollConfig) -> Self {
        Self {
            interval: config.interval,
            deadline: config.deadline,
        }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        PollConfig::default().into()
    }
}

/// Re-fetch a prediction until it leaves `starting`/`processing`
///
/// Sleeps `interval` between fetches. Once `deadline` has elapsed the
/// prediction is cancelled (best effort) and [`PredictionError::Timeout`]
/// is returned. Fetch errors end the wait immediately.
pub async fn wait_for_completion(
    service: &dyn PredictionService,
    initial: Prediction,
    policy: PollPolicy,
) -> Result<Prediction> {
    let started = Instant::now();
    let mut prediction = initial;
    let mut attempts = 0_u32;

    while prediction.status.is_pending() {
        let remaining = policy.deadline.saturating_sub(started.elapsed());

        if remaining.is_zero() {
            tracing::warn!(
                provider = service.name(),
                prediction_id = %prediction.id,
                attempts,
                deadline = ?policy.deadline,
                "prediction still pending at deadline, cancelling"
            );

            if let Err(e) = service.cancel(&prediction.id).await {
                tracing::warn!(prediction_id = %prediction.id, error = %e, "failed to cancel prediction");
            }

            return Err(PredictionError::Timeout {
                id: prediction.id,
                deadline: policy.deadline,
            });
        }

        tokio::time::sleep(policy.interval.min(remaining)).await;

        prediction = service.get(&prediction.id).await?;
        attempts += 1;

        tracing::debug!(prediction_id = %prediction.id, status = %prediction.status, attempts, "prediction status");
    }

    Ok(prediction)
}
