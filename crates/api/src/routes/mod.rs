pub mod health;
pub mod overlays;
pub mod streams;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /health                                          service health
///
/// /overlays                                        list, create
/// /overlays/{id}                                   update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/overlays", overlays::router())
}

/// Routes outside `/api`: landing page, stream files, diagnostics.
///
/// ```text
/// /                                                endpoint index
/// /streams/{*path}                                 playlist and segment files
/// /debug/streams                                   segment directory report
/// ```
pub fn root_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index::index))
        .nest("/streams", streams::router())
        .nest("/debug", streams::debug_router())
}
