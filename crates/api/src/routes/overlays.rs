use axum::routing::{get, put};
use axum::Router;

use crate::handlers::overlays;
use crate::state::AppState;

/// Overlay routes mounted at `/api/overlays`.
///
/// ```text
/// GET    /      -> list_overlays
/// POST   /      -> create_overlay
/// PUT    /{id}  -> update_overlay
/// DELETE /{id}  -> delete_overlay
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(overlays::list_overlays).post(overlays::create_overlay),
        )
        .route(
            "/{id}",
            put(overlays::update_overlay).delete(overlays::delete_overlay),
        )
}
