#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

//! Coloring-page generation endpoint
//!
//! Accepts a multipart upload, composes the transformation prompt, and
//! drives a single prediction to completion.

mod encode;
mod error;
mod orchestrator;
mod prompt;
mod request;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};

pub use encode::data_uri;
pub use error::{GenerateError, Result};
pub use orchestrator::Orchestrator;
pub use prompt::{compose_prompt, normalize_name};
pub use request::GenerationForm;
pub use types::{ErrorBody, GenerateResponse, GenerationRequest, ImageUpload, Style};

/// Build the orchestrator and its prediction client from configuration
///
/// # Errors
///
/// Returns an error if the prediction client fails to initialize
pub fn build_orchestrator(config: &colorbook_config::Config) -> anyhow::Result<Arc<Orchestrator>> {
    let service = colorbook_prediction::build_client(&config.prediction)?;
    Ok(Arc::new(Orchestrator::new(service, &config.prediction)))
}

/// Create the endpoint router for generation
pub fn endpoint_router() -> Router<Arc<Orchestrator>> {
    Router::new().route("/api/generate", post(generate))
}

/// Handle coloring-page generation requests
async fn generate(
    State(orchestrator): State<Arc<Orchestrator>>,
    GenerationForm(request): GenerationForm,
) -> Result<Json<GenerateResponse>> {
    tracing::debug!(style = request.style.as_str(), "generation handler called");

    let image_url = orchestrator.generate(&request).await?;

    tracing::debug!(%image_url, "generation complete");

    Ok(Json(GenerateResponse { image_url }))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };
    use colorbook_config::PredictionConfig;
    use colorbook_prediction::{CreatePrediction, Prediction, PredictionService, PredictionStatus};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    const BOUNDARY: &str = "colorbook-boundary";

    /// Succeeds immediately and keeps the submitted input
    #[derive(Default)]
    struct InstantService {
        inputs: Mutex<Vec<Value>>,
    }

    #[async_trait]
    impl PredictionService for InstantService {
        async fn create(&self, request: &CreatePrediction) -> colorbook_prediction::Result<Prediction> {
            self.inputs.lock().unwrap().push(request.input.clone());
            Ok(Prediction {
                id: "p1".into(),
                status: PredictionStatus::Succeeded,
                model: None,
                output: Some(json!(["https://replicate.delivery/page.png"])),
                error: None,
                logs: None,
                urls: None,
            })
        }

        async fn get(&self, _id: &str) -> colorbook_prediction::Result<Prediction> {
            unreachable!("already terminal")
        }

        async fn cancel(&self, _id: &str) -> colorbook_prediction::Result<Prediction> {
            unreachable!("never cancelled")
        }

        fn name(&self) -> &str {
            "instant"
        }
    }

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a [u8], &'a str),
    }

    fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n").as_bytes(),
                    );
                }
                Part::File(name, bytes, content_type) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"photo.png\"\r\n\
                             Content-Type: {content_type}\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                    body.extend_from_slice(b"\r\n");
                }
            }
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn app() -> (Router, Arc<InstantService>) {
        let service = Arc::new(InstantService::default());
        let orchestrator = Arc::new(Orchestrator::new(service.clone(), &PredictionConfig::default()));
        (endpoint_router().with_state(orchestrator), service)
    }

    async fn post(router: Router, content_type: &str, body: Vec<u8>) -> (StatusCode, Value) {
        let request = Request::post("/api/generate")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn form_type() -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }

    #[tokio::test]
    async fn generates_from_form() {
        let (router, service) = app();
        let body = multipart_body(&[
            Part::File("image", b"a", "image/png"),
            Part::Text("name", "Ada"),
            Part::Text("background", "mindful"),
        ]);

        let (status, json) = post(router, &form_type(), body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({ "imageUrl": "https://replicate.delivery/page.png" }));

        let inputs = service.inputs.lock().unwrap();
        assert_eq!(inputs[0]["prompt"], compose_prompt(Style::Mindful, Some("Ada")));
        assert_eq!(inputs[0]["input_images"], json!(["data:image/png;base64,YQ=="]));
    }

    #[tokio::test]
    async fn missing_image_is_rejected_before_prediction() {
        let (router, service) = app();
        let body = multipart_body(&[Part::Text("name", "Ada"), Part::Text("background", "mindful")]);

        let (status, json) = post(router, &form_type(), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({ "error": "No image file provided." }));
        assert!(service.inputs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_image_counts_as_missing() {
        let (router, _) = app();
        let body = multipart_body(&[Part::File("image", b"", "image/png")]);

        let (status, json) = post(router, &form_type(), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "No image file provided.");
    }

    #[tokio::test]
    async fn first_non_empty_image_wins() {
        let cases: [(&[Part<'_>], &str); 2] = [
            (
                &[Part::File("image", b"a", "image/png"), Part::File("image", b"", "image/png")],
                "data:image/png;base64,YQ==",
            ),
            (
                &[Part::File("image", b"", "image/png"), Part::File("image", b"b", "image/jpeg")],
                "data:image/jpeg;base64,Yg==",
            ),
        ];

        for (parts, expected) in cases {
            let (router, service) = app();

            let (status, _) = post(router, &form_type(), multipart_body(parts)).await;

            assert_eq!(status, StatusCode::OK);
            assert_eq!(service.inputs.lock().unwrap()[0]["input_images"], json!([expected]));
        }
    }

    #[tokio::test]
    async fn upload_over_body_limit_is_payload_too_large() {
        let (router, service) = app();
        let router = router.layer(axum::extract::DefaultBodyLimit::max(64));
        let body = multipart_body(&[Part::File("image", &[b'x'; 256], "image/png")]);

        let (status, json) = post(router, &form_type(), body).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json, json!({ "error": "Uploaded file is too large." }));
        assert!(service.inputs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_background_and_fields_fall_back_to_plain() {
        let (router, service) = app();
        let body = multipart_body(&[
            Part::Text("extra", "ignored"),
            Part::File("image", b"a", "image/png"),
            Part::Text("background", "sparkly"),
        ]);

        let (status, _) = post(router, &form_type(), body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            service.inputs.lock().unwrap()[0]["prompt"],
            compose_prompt(Style::Plain, None)
        );
    }

    #[tokio::test]
    async fn non_multipart_body_is_bad_request() {
        let (router, _) = app();

        let (status, json) = post(router, "application/json", br#"{"image":"x"}"#.to_vec()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("multipart/form-data"));
    }
}
