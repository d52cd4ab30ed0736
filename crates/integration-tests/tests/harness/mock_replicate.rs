//! Mock prediction service for integration tests
//!
//! Implements the create/get/cancel subset of the Replicate predictions API.
//! `get` replays a scripted sequence of predictions, repeating the last one.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

pub const PREDICTION_ID: &str = "pred-test-1";

/// Mock prediction backend with request counters
pub struct MockReplicate {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    create_response: (StatusCode, Value),
    script: Mutex<VecDeque<Value>>,
    created: Mutex<Vec<Value>>,
    authorization: Mutex<Option<String>>,
    create_count: AtomicU32,
    poll_count: AtomicU32,
    cancel_count: AtomicU32,
}

impl MockReplicate {
    /// Start a mock that accepts the prediction and then answers fetches
    /// with `script` in order
    pub async fn start(script: Vec<Value>) -> anyhow::Result<Self> {
        Self::start_inner((StatusCode::CREATED, prediction("starting")), script).await
    }

    /// Start a mock whose create endpoint answers with `status` and `body`
    pub async fn start_rejecting(status: u16, body: Value) -> anyhow::Result<Self> {
        Self::start_inner((StatusCode::from_u16(status)?, body), Vec::new()).await
    }

    async fn start_inner(create_response: (StatusCode, Value), script: Vec<Value>) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            create_response,
            script: Mutex::new(script.into()),
            created: Mutex::new(Vec::new()),
            authorization: Mutex::new(None),
            create_count: AtomicU32::new(0),
            poll_count: AtomicU32::new(0),
            cancel_count: AtomicU32::new(0),
        });

        let app = Router::new()
            .route("/v1/predictions", routing::post(handle_create))
            .route("/v1/predictions/{id}", routing::get(handle_get))
            .route("/v1/predictions/{id}/cancel", routing::post(handle_cancel))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the prediction client
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Bodies received by the create endpoint
    pub fn created(&self) -> Vec<Value> {
        self.state.created.lock().unwrap().clone()
    }

    /// `input` of the first created prediction
    pub fn first_input(&self) -> Value {
        self.created()[0]["input"].clone()
    }

    /// Authorization header of the last create request
    pub fn authorization(&self) -> Option<String> {
        self.state.authorization.lock().unwrap().clone()
    }

    pub fn create_count(&self) -> u32 {
        self.state.create_count.load(Ordering::Relaxed)
    }

    pub fn poll_count(&self) -> u32 {
        self.state.poll_count.load(Ordering::Relaxed)
    }

    pub fn cancel_count(&self) -> u32 {
        self.state.cancel_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockReplicate {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Prediction body with the given status and nothing else
pub fn prediction(status: &str) -> Value {
    json!({
        "id": PREDICTION_ID,
        "model": "openai/gpt-image-1",
        "status": status,
        "output": null,
        "error": null,
        "logs": "",
        "urls": {
            "get": format!("https://api.replicate.com/v1/predictions/{PREDICTION_ID}"),
            "cancel": format!("https://api.replicate.com/v1/predictions/{PREDICTION_ID}/cancel")
        }
    })
}

/// `succeeded` prediction with the given output
pub fn succeeded(output: Value) -> Value {
    let mut body = prediction("succeeded");
    body["output"] = output;
    body
}

/// `failed` prediction with the given error
pub fn failed(error: Value) -> Value {
    let mut body = prediction("failed");
    body["error"] = error;
    body
}

async fn handle_create(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.create_count.fetch_add(1, Ordering::Relaxed);
    state.created.lock().unwrap().push(body);
    *state.authorization.lock().unwrap() = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let (status, body) = state.create_response.clone();
    (status, Json(body))
}

async fn handle_get(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> impl IntoResponse {
    state.poll_count.fetch_add(1, Ordering::Relaxed);

    if id != PREDICTION_ID {
        return (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found." })));
    }

    let mut script = state.script.lock().unwrap();
    let next = if script.len() > 1 {
        script.pop_front()
    } else {
        script.front().cloned()
    };

    (StatusCode::OK, Json(next.unwrap_or_else(|| prediction("processing"))))
}

async fn handle_cancel(State(state): State<Arc<MockState>>, Path(_id): Path<String>) -> impl IntoResponse {
    state.cancel_count.fetch_add(1, Ordering::Relaxed);
    Json(prediction("canceled"))
}
