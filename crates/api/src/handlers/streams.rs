//! Handlers for the live stream output.
//!
//! Files are read from the segment directory the external media pipeline
//! writes into. Playlists are rewritten constantly, so they are served
//! uncached; segments are immutable once written.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use overlay_core::segments::{Fetched, ServedFile};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Cache policy for playlists.
const PLAYLIST_CACHE_CONTROL: &str = "no-cache";

/// Cache policy for media segments.
const SEGMENT_CACHE_CONTROL: &str = "max-age=60";

/// GET /streams/{*path}
///
/// Serve a playlist or segment. A playlist still being written is served
/// from `<name>.tmp`; a missing file yields a 404 with directory diagnostics.
pub async fn serve_stream_file(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> AppResult<Response> {
    match state.segments.fetch(&path).await? {
        Fetched::Found { file, bytes } => {
            tracing::debug!(
                path = %path,
                served = %file.path.display(),
                from_tmp = file.from_tmp,
                "Serving stream file",
            );
            file_response(&file, bytes)
        }
        Fetched::Missing(missing) => {
            tracing::debug!(
                looking_for = %missing.looking_for,
                files = missing.files_in_dir.len(),
                "Stream file not found",
            );
            Err(AppError::FileNotFound(missing))
        }
    }
}

/// GET /debug/streams
///
/// Report the configured segment directory and its current contents.
pub async fn inspect_streams(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let report = state.segments.inspect().await?;
    Ok(Json(report))
}

fn file_response(file: &ServedFile, bytes: Vec<u8>) -> AppResult<Response> {
    let cache_control = if file.is_playlist {
        PLAYLIST_CACHE_CONTROL
    } else {
        SEGMENT_CACHE_CONTROL
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, file.content_type)
        .header(header::CACHE_CONTROL, cache_control)
        .body(Body::from(bytes))
        .map_err(|e| AppError::InternalError(e.to_string()))
}
