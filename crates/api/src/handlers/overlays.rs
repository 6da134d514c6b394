//! Handlers for the `/api/overlays` resource.
//!
//! Request bodies must be JSON objects. They are read into [`OverlayFields`],
//! which declares only the writable keys: anything else a client sends is
//! dropped, not rejected. Responses always carry fully materialized overlays.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use overlay_core::error::CoreError;
use overlay_core::overlay::{is_known_kind, is_writable_field, parse_overlay_id};
use overlay_db::models::overlay::{DeletedResponse, Overlay, OverlayFields};
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::extract::{json_object, AnyJson};
use crate::state::AppState;

/// POST /api/overlays
///
/// Create an overlay; absent fields take their defaults. Returns 201.
pub async fn create_overlay(
    State(state): State<AppState>,
    AnyJson(body): AnyJson<Map<String, Value>>,
) -> AppResult<impl IntoResponse> {
    let new = overlay_fields(body)?.into_new_overlay();
    if !is_known_kind(&new.kind) {
        tracing::debug!(kind = %new.kind, "Creating overlay with unrecognised type");
    }

    let row = state.overlays.insert(&new).await?;
    let overlay = Overlay::from(row);

    tracing::info!(
        overlay_id = overlay.id,
        kind = %overlay.kind,
        z_index = overlay.z_index,
        "Overlay created",
    );

    Ok((StatusCode::CREATED, Json(overlay)))
}

/// GET /api/overlays
///
/// List all overlays in ascending `zIndex` order.
pub async fn list_overlays(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let overlays: Vec<Overlay> = state
        .overlays
        .list_by_z_index()
        .await?
        .into_iter()
        .map(Overlay::from)
        .collect();

    Ok(Json(overlays))
}

/// PUT /api/overlays/{id}
///
/// Apply the supplied writable fields and return the post-update overlay.
pub async fn update_overlay(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let overlay_id = parse_overlay_id(&raw_id)?;
    let input = overlay_fields(json_object(&body)?)?;

    let row = state
        .overlays
        .update(overlay_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Overlay",
            id: overlay_id,
        }))?;

    tracing::info!(overlay_id, "Overlay updated");

    Ok(Json(Overlay::from(row)))
}

/// DELETE /api/overlays/{id}
///
/// Delete an overlay. Returns `{"deleted": true}` or 404.
pub async fn delete_overlay(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let overlay_id = parse_overlay_id(&raw_id)?;

    if !state.overlays.delete(overlay_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Overlay",
            id: overlay_id,
        }));
    }

    tracing::info!(overlay_id, "Overlay deleted");

    Ok(Json(DeletedResponse { deleted: true }))
}

/// Deserialize the writable fields of a request object.
fn overlay_fields(body: Map<String, Value>) -> AppResult<OverlayFields> {
    for key in body.keys().filter(|key| !is_writable_field(key)) {
        tracing::debug!(key = %key, "Ignoring non-writable overlay field");
    }

    serde_json::from_value(Value::Object(body))
        .map_err(|e| AppError::BadRequest(format!("Invalid overlay fields: {e}")))
}
