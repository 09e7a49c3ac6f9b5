//! In-process stand-in for the research service, for HTTP-level tests.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

pub const MOCK_JOB_ID: &str = "job-1";

#[derive(Default)]
struct Inner {
    submitted: Vec<Value>,
    reports: Vec<Value>,
    polls: usize,
}

/// Records submissions and replays scripted status reports, one per poll.
/// The last report repeats once the script runs out.
#[derive(Clone, Default)]
pub struct MockBackend {
    inner: Arc<Mutex<Inner>>,
}

impl MockBackend {
    pub fn with_reports(reports: Vec<Value>) -> Self {
        let backend = Self::default();
        backend.inner.lock().unwrap().reports = reports;
        backend
    }

    pub fn submitted(&self) -> Vec<Value> {
        self.inner.lock().unwrap().submitted.clone()
    }

    pub fn polls(&self) -> usize {
        self.inner.lock().unwrap().polls
    }
}

/// Serve `backend` on an ephemeral local port and return its base URL.
pub async fn spawn_mock_backend(backend: MockBackend) -> String {
    let app = Router::new()
        .route("/api/multiagent", post(submit_handler))
        .route("/api/multiagent/:input_id", get(status_handler))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn submit_handler(State(backend): State<MockBackend>, Json(body): Json<Value>) -> Json<Value> {
    backend.inner.lock().unwrap().submitted.push(body);
    Json(json!({ "input_id": MOCK_JOB_ID }))
}

async fn status_handler(
    State(backend): State<MockBackend>,
    Path(input_id): Path<String>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let mut inner = backend.inner.lock().unwrap();
    if input_id != MOCK_JOB_ID || inner.reports.is_empty() {
        return Err((StatusCode::NOT_FOUND, "Output not found".to_string()));
    }
    let idx = inner.polls.min(inner.reports.len() - 1);
    inner.polls += 1;
    Ok(Json(inner.reports[idx].clone()))
}
