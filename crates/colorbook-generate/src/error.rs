use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use colorbook_prediction::{PredictionError, PredictionStatus};
use thiserror::Error;

use crate::types::ErrorBody;

pub type Result<T> = std::result::Result<T, GenerateError>;

/// Generation failures, each mapped to an HTTP status and a JSON `{ error }` body
#[derive(Debug, Error)]
pub enum GenerateError {
    /// No `image` field, or an empty one
    #[error("No image file provided.")]
    MissingImage,

    /// Body could not be read as a multipart form
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upload exceeded the server's body limit
    #[error("Uploaded file is too large.")]
    PayloadTooLarge,

    /// Create, fetch, or wait failed before a terminal status was seen
    #[error(transparent)]
    Prediction(#[from] PredictionError),

    /// Prediction ended in `failed`
    #[error("Image generation failed: {}", .0.as_deref().unwrap_or("Unknown error"))]
    GenerationFailed(Option<String>),

    /// Prediction ended in a terminal status other than `succeeded` or `failed`
    #[error("Image generation did not complete successfully")]
    Incomplete(PredictionStatus),

    /// Succeeded with no usable output list
    #[error("No images generated.")]
    NoImages,

    /// First output element is not an http(s) URL
    #[error("Invalid image URL received from prediction service.")]
    InvalidImageUrl,

    /// Anything else; the message is never shown to the caller
    #[error("An internal server error occurred.")]
    Internal(String),
}

impl GenerateError {
    /// Input errors are the caller's fault (4xx); everything else is ours
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingImage | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message that is safe to expose to API consumers
    pub fn client_message(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for GenerateError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            _ if status.is_client_error() => {
                tracing::warn!(status = status.as_u16(), error = %self, "rejected generation request");
            }
            Self::Internal(detail) => {
                tracing::error!(status = status.as_u16(), error = %detail, "image generation failed");
            }
            Self::Incomplete(final_status) => {
                tracing::error!(status = status.as_u16(), %final_status, "prediction ended without output");
            }
            _ => {
                tracing::error!(status = status.as_u16(), error = %self, "image generation failed");
            }
        }

        let body = ErrorBody {
            error: self.client_message(),
        };

        (status, Json(body)).into_response()
    }
}
