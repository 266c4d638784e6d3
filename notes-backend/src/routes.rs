//! Axum route handlers for the notes agent HTTP API.

use crate::ai::Agent;
use crate::dashboard;
use crate::gate::RequestGate;
use crate::notes::NoteStore;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::{DateTime, Utc};
use notes_types::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

pub struct AppState {
    pub agent: Arc<dyn Agent>,
    pub gate: RequestGate,
    pub notes_store: Arc<NoteStore>,
    /// Caps how many agent runs execute at once
    pub agent_slots: Semaphore,
    pub start_time: Instant,
    pub started_at: DateTime<Utc>,
    pub prompt_count: AtomicU64,
}

impl AppState {
    pub fn new(
        agent: Arc<dyn Agent>,
        gate: RequestGate,
        notes_store: Arc<NoteStore>,
        max_concurrency: usize,
    ) -> Self {
        Self {
            agent,
            gate,
            notes_store,
            agent_slots: Semaphore::new(max_concurrency),
            start_time: Instant::now(),
            started_at: Utc::now(),
            prompt_count: AtomicU64::new(0),
        }
    }

    /// Stop admitting agent runs; waiting and later requests get a 500.
    pub fn close(&self) {
        self.agent_slots.close();
    }
}

pub fn router(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route("/", axum::routing::get(dashboard::dashboard))
        .route("/agent", axum::routing::post(invoke_agent))
        .route("/rpc/status", axum::routing::get(status))
        .with_state(state)
}

fn error_response(status: StatusCode, detail: impl Into<String>) -> Response {
    (status, Json(ErrorDetail::new(detail))).into_response()
}

// POST /agent
pub async fn invoke_agent(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AgentRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(r)) => r,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.body_text()),
    };

    let prompt = match state.gate.accept(&req.prompt) {
        Ok(p) => p,
        Err(e) => {
            log::info!("[HTTP] Rejected prompt: {}", e);
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    let _slot = match state.agent_slots.acquire().await {
        Ok(permit) => permit,
        Err(_) => {
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Agent is shutting down")
        }
    };

    match state.agent.run(prompt.as_str()).await {
        Ok(text) => {
            state.prompt_count.fetch_add(1, Ordering::Relaxed);
            let response = state.gate.bound_response(text);
            (StatusCode::OK, Json(AgentResponse { response })).into_response()
        }
        Err(e) => {
            if e.is_client_error() {
                log::error!(
                    "[HTTP] Model provider rejected the request (check API key and model): {}",
                    e
                );
            } else {
                log::error!("[HTTP] Agent run failed: {}", e);
            }
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to process your request. {}", e),
            )
        }
    }
}

// GET /rpc/status
pub async fn status(State(state): State<Arc<AppState>>) -> (StatusCode, Json<ServiceStatus>) {
    let status = ServiceStatus {
        running: true,
        uptime_secs: state.start_time.elapsed().as_secs(),
        started_at: state.started_at.to_rfc3339(),
        model: state.agent.model_name(),
        notes_dir: state.notes_store.notes_dir().display().to_string(),
        note_count: state.notes_store.count(),
        total_prompts: state.prompt_count.load(Ordering::Relaxed),
    };

    (StatusCode::OK, Json(status))
}
