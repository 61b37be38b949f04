//! Health endpoint
//!
//! `GET /health` for liveness and `GET /health/ready` for readiness. The bot is
//! ready when its data directory accepts writes.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::info;

use credit_common::AppError;
use credit_store::probe_writable;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: String,
    pub version: &'static str,
}

/// Readiness check response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub storage: bool,
}

#[derive(Debug, Clone)]
pub struct HealthState {
    app_name: Arc<str>,
    data_dir: Arc<PathBuf>,
}

impl HealthState {
    pub fn new(app_name: &str, data_dir: PathBuf) -> Self {
        Self {
            app_name: Arc::from(app_name),
            data_dir: Arc::new(data_dir),
        }
    }
}

/// Basic health check (liveness probe)
///
/// GET /health
async fn health_check(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        name: state.app_name.to_string(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness check (storage probe)
///
/// GET /health/ready
async fn readiness_check(
    State(state): State<HealthState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let storage = probe_writable(&state.data_dir).await;
    let (status, label) = if storage {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    };
    (status, Json(ReadinessResponse { status: label, storage }))
}

/// Build the health application
pub fn create_health_app(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until `shutdown` flips to `true`
pub async fn serve(
    addr: String,
    state: HealthState,
    shutdown: watch::Receiver<bool>,
) -> Result<(), AppError> {
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;
    serve_on(listener, state, shutdown).await
}

/// Serve on an already bound listener
pub async fn serve_on(
    listener: TcpListener,
    state: HealthState,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), AppError> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Health endpoint listening");
    }

    axum::serve(listener, create_health_app(state))
        .with_graceful_shutdown(async move {
            let _ = shutdown.wait_for(|stop| *stop).await;
        })
        .await
        .map_err(AppError::internal)
}
