use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status; always `"ok"` when the process answers.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Configured overlay store (`postgres` or `memory`).
    pub store: &'static str,
    /// Whether the overlay store is reachable.
    pub store_healthy: bool,
}

/// GET /api/health -- returns service and store health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_healthy = match state.overlays.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Overlay store health check failed");
            false
        }
    };

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        store: state.config.store.as_str(),
        store_healthy,
    })
}

/// Mount health check routes (nested under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
