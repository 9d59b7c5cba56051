//! Axum-based HTTP gateway with body limits and timeouts.
//!
//! Serves a single shared conversation plus the administrative sample and
//! identity endpoints:
//! - Request body size limits (64KB max)
//! - Request timeouts so a stalled completion cannot pin a connection forever

mod handlers;

use handlers::{
    handle_conversation, handle_create_sample, handle_delete_sample, handle_get_identity,
    handle_health, handle_list_samples, handle_message, handle_put_identity, handle_switch_mode,
    handle_update_sample,
};

use crate::admin::Admin;
use crate::config::Config;
use crate::conversation::{ConversationEngine, EngineOptions, RefreshOutcome};
use crate::providers::{OpenAiProvider, Provider};
use crate::store::{self, SampleDraft};
use anyhow::Result;
use axum::{
    Router,
    http::StatusCode,
    routing::{get, post, put},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Maximum request body size (64KB)
pub const MAX_BODY_SIZE: usize = 65_536;
/// Slack added on top of the completion timeout for the request timeout.
const REQUEST_TIMEOUT_MARGIN_SECS: u64 = 30;

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: ConversationEngine,
    pub admin: Admin,
}

/// `POST /api/mode` body
#[derive(serde::Deserialize)]
pub struct ModeBody {
    pub mode: String,
}

/// `POST /api/messages` body
#[derive(serde::Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// `POST /api/admin/samples` body: the draft plus its target collection.
#[derive(serde::Deserialize)]
pub struct CreateSampleBody {
    pub collection: String,
    #[serde(flatten)]
    pub draft: SampleDraft,
}

/// `GET /api/admin/samples` query
#[derive(Debug, Default, serde::Deserialize)]
pub struct SamplesQuery {
    pub collection: Option<String>,
    #[serde(rename = "type")]
    pub sample_type: Option<String>,
}

pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/api/conversation", get(handle_conversation))
        .route("/api/mode", post(handle_switch_mode))
        .route("/api/messages", post(handle_message))
        .route(
            "/api/admin/samples",
            get(handle_list_samples).post(handle_create_sample),
        )
        .route(
            "/api/admin/samples/{collection}/{id}",
            put(handle_update_sample).delete(handle_delete_sample),
        )
        .route(
            "/api/admin/identity",
            get(handle_get_identity).put(handle_put_identity),
        )
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
}

/// Run the HTTP gateway.
pub async fn run_gateway(host: &str, port: u16, config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    run_gateway_with_listener(host, listener, config).await
}

/// Run the HTTP gateway from a pre-bound listener.
pub async fn run_gateway_with_listener(
    host: &str,
    listener: tokio::net::TcpListener,
    config: Config,
) -> Result<()> {
    let actual_port = listener.local_addr()?.port();
    let display_addr = format!("{host}:{actual_port}");

    let provider: Arc<dyn Provider> = Arc::new(OpenAiProvider::new(
        &config.completion.base_url,
        config.completion.api_key.as_deref(),
    ));
    let store = store::create_store(&config.store)?;
    let engine = ConversationEngine::new(
        provider,
        Arc::clone(&store),
        EngineOptions::from_config(&config),
    )?;

    if let RefreshOutcome::Failed(error) = engine.refresh().await {
        tracing::warn!(%error, "initial context load failed; serving anyway");
    }

    println!("◆ Listening on http://{display_addr}");
    println!("  GET  /health");
    println!("  GET  /api/conversation");
    println!("  POST /api/mode      {{\"mode\": \"professional\" | \"casual\"}}");
    println!("  POST /api/messages  {{\"message\": \"...\"}}");
    println!("  GET|POST   /api/admin/samples");
    println!("  PUT|DELETE /api/admin/samples/{{collection}}/{{id}}");
    println!("  GET|PUT    /api/admin/identity");
    println!("  Press Ctrl+C to stop.\n");

    let state = AppState {
        engine,
        admin: Admin::new(store),
    };
    let request_timeout =
        Duration::from_secs(config.completion.timeout_secs + REQUEST_TIMEOUT_MARGIN_SECS);

    axum::serve(listener, router(state, request_timeout))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown requested");
        })
        .await?;

    Ok(())
}
