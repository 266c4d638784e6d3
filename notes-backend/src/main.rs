//! Notes Agent Service: a natural-language assistant over a sandboxed notes folder.
//!
//! Exposes `POST /agent` for prompts, `GET /rpc/status` for health and a small
//! chat page at `GET /`.
//!
//! Default: http://127.0.0.1:8000/

mod ai;
mod config;
mod dashboard;
mod gate;
mod http;
mod notes;
mod routes;
mod tools;

use ai::{OpenAiCompatClient, ToolLoopAgent};
use config::Config;
use gate::RequestGate;
use notes::NoteStore;
use routes::AppState;
use std::sync::Arc;
use tools::{ToolContext, ToolRegistry};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let notes_store = Arc::new(NoteStore::new(
        config.notes_dir.clone(),
        config.max_note_bytes,
    ));
    if let Err(e) = notes_store.ensure_dir() {
        log::error!("[NOTES] Cannot prepare notes directory: {}", e);
        std::process::exit(1);
    }
    log::info!(
        "[NOTES] Using {} ({} notes, size cap: {})",
        notes_store.notes_dir().display(),
        notes_store.count(),
        notes_store
            .max_note_bytes()
            .map(|b| format!("{} bytes", b))
            .unwrap_or_else(|| "none".to_string()),
    );

    if config.ai_api_key.is_none() {
        log::warn!(
            "[AI] No API key set ({} or {}); model calls will likely be rejected",
            config::env_vars::GOOGLE_API_KEY,
            config::env_vars::AI_API_KEY,
        );
    }

    let registry = Arc::new(ToolRegistry::with_note_tools());
    log::info!("[TOOLS] Registered {} note tools", registry.len());

    let model = OpenAiCompatClient::new(
        &config.ai_endpoint,
        &config.ai_model,
        config.ai_api_key.as_deref(),
        config.ai_temperature,
    );
    let agent = ToolLoopAgent::new(
        model,
        registry,
        ToolContext::new(notes_store.clone()),
        config.max_tool_rounds,
    );
    log::info!(
        "[AGENT] Model {} via {} (max {} tool rounds, {} concurrent runs)",
        config.ai_model,
        config.ai_endpoint,
        config.max_tool_rounds,
        config.max_concurrency,
    );

    let state = Arc::new(AppState::new(
        Arc::new(agent),
        RequestGate::new(config.max_prompt_chars, config.max_response_chars),
        notes_store,
        config.max_concurrency,
    ));

    let cors = tower_http::cors::CorsLayer::permissive();
    let app = routes::router(state.clone()).layer(cors);

    let addr = config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("[HTTP] Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    log::info!("[HTTP] Notes Agent Service listening on http://{}", addr);

    let shutdown = async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("[HTTP] Shutting down");
        }
        state.close();
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
    {
        log::error!("[HTTP] Server error: {}", e);
        std::process::exit(1);
    }
}
