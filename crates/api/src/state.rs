use std::sync::Arc;

use overlay_core::segments::SegmentDirectory;
use overlay_db::stores::OverlayStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). Collaborators are
/// constructed once at startup and injected here.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Overlay persistence.
    pub overlays: Arc<dyn OverlayStore>,
    /// Directory the media pipeline writes stream output into.
    pub segments: Arc<SegmentDirectory>,
}
