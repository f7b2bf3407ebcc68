//! HTTP surface: interactions, health check, and Prometheus metrics.
//!
//! - `POST /interactions` - one command in, one reply out (204 when ignored)
//! - `GET /` - liveness probe
//! - `GET /metrics` - Prometheus text format, when enabled

use crate::handlers::{Interaction, Registry, Reply};
use crate::services::TrackingService;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared state for the interaction endpoint.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub tracker: Arc<TrackingService>,
}

/// Handler for GET / - liveness.
async fn health_handler() -> &'static str {
    "Bot is healthy"
}

/// Handler for GET /metrics - returns Prometheus metrics in text format.
async fn metrics_handler() -> String {
    crate::metrics::gather_metrics()
}

/// Handler for POST /interactions.
async fn interaction_handler(
    State(state): State<AppState>,
    Json(interaction): Json<Interaction>,
) -> Response {
    match state.registry.dispatch(&state.tracker, &interaction).await {
        Some(reply) => Json::<Reply>(reply).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Build the router. Split out so tests can drive it without a socket.
pub fn router(state: AppState, metrics_enabled: bool) -> Router {
    let mut app = Router::new()
        .route("/", get(health_handler))
        .route("/interactions", post(interaction_handler));
    if metrics_enabled {
        app = app.route("/metrics", get(metrics_handler));
    }
    app.with_state(state)
}

/// Run the HTTP server until Ctrl-C.
pub async fn run_http_server(
    addr: SocketAddr,
    state: AppState,
    metrics_enabled: bool,
) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind HTTP server on {addr}: {e}"))?;
    info!(addr = %listener.local_addr()?, "HTTP server listening");

    axum::serve(listener, router(state, metrics_enabled))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
