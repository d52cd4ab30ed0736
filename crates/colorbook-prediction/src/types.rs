use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle status reported by the prediction service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
    /// Any status this client does not know; treated as terminal
    #[serde(other)]
    Unknown,
}

impl PredictionStatus {
    /// Only `starting` and `processing` keep the poll loop going
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Starting | Self::Processing)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::Processing => "processing",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for PredictionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body for creating a prediction
#[derive(Debug, Clone, Serialize)]
pub struct CreatePrediction {
    /// Model (`owner/name`) or pinned version identifier
    pub version: String,
    /// Model-specific input object
    pub input: Value,
}

/// Local mirror of a prediction job
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Prediction {
    pub id: String,
    pub status: PredictionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Model output; shape depends on the model
    #[serde(default)]
    pub output: Option<Value>,
    /// Failure detail, usually a string
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<String>,
    /// Links to the job's API resources (`get`, `cancel`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<Value>,
}

impl Prediction {
    /// Human-readable failure reason, if the service reported one
    pub fn failure_reason(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null => None,
            Value::String(reason) if reason.trim().is_empty() => None,
            Value::String(reason) => Some(reason.clone()),
            other => Some(other.to_string()),
        }
    }
}
