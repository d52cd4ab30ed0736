use axum::response::IntoResponse;
use http::StatusCode;

/// Liveness probe; does not touch the prediction service
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
