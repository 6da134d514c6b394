use axum::routing::get;
use axum::Router;

use crate::handlers::streams;
use crate::state::AppState;

/// Stream output routes mounted at `/streams`.
///
/// ```text
/// GET /{*path}  -> serve_stream_file
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{*path}", get(streams::serve_stream_file))
}

/// Diagnostic routes mounted at `/debug`.
///
/// ```text
/// GET /streams  -> inspect_streams
/// ```
pub fn debug_router() -> Router<AppState> {
    Router::new().route("/streams", get(streams::inspect_streams))
}
