//! Overlay defaults, writable fields, and identifier parsing.
//!
//! An overlay is a positioned, styled text or logo element composited onto
//! the live video. Stored records may be partial; every field listed here has
//! a default that is applied when the overlay is read back.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Text overlay kind; `content` holds the text to render.
pub const KIND_TEXT: &str = "text";

/// Logo overlay kind; `content` holds an image URL.
pub const KIND_LOGO: &str = "logo";

/// Kinds the renderer knows how to draw.
pub const KNOWN_KINDS: &[&str] = &[KIND_TEXT, KIND_LOGO];

/// Default kind for new or partially stored overlays.
pub const DEFAULT_KIND: &str = KIND_TEXT;

/// Default content (empty text).
pub const DEFAULT_CONTENT: &str = "";

/// Default top-left position in screen space.
pub const DEFAULT_POSITION: Position = Position { x: 100.0, y: 100.0 };

/// Default render box.
pub const DEFAULT_SIZE: Size = Size {
    width: 200.0,
    height: 80.0,
};

/// Default opacity (fully opaque).
pub const DEFAULT_OPACITY: f64 = 1.0;

/// Default rotation in degrees.
pub const DEFAULT_ROTATION: f64 = 0.0;

/// Default stacking order.
pub const DEFAULT_Z_INDEX: i32 = 1;

/// JSON keys a client may write. Any other key in a request body is dropped.
pub const WRITABLE_FIELDS: &[&str] = &[
    "type", "content", "position", "size", "opacity", "rotation", "zIndex",
];

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Screen-space coordinates of an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Default for Position {
    fn default() -> Self {
        DEFAULT_POSITION
    }
}

/// Render box of an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Default for Size {
    fn default() -> Self {
        DEFAULT_SIZE
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Returns `true` if the renderer has a drawing mode for `kind`.
///
/// Unknown kinds are still stored as given; callers only use this for logging.
pub fn is_known_kind(kind: &str) -> bool {
    KNOWN_KINDS.contains(&kind)
}

/// Returns `true` if `key` is one of [`WRITABLE_FIELDS`].
pub fn is_writable_field(key: &str) -> bool {
    WRITABLE_FIELDS.contains(&key)
}

/// Parse an overlay identifier taken from a request path.
///
/// Identifiers are positive decimal integers with no sign, whitespace, or
/// leading `+`. Anything else is rejected with
/// [`CoreError::InvalidIdentifier`].
pub fn parse_overlay_id(raw: &str) -> Result<DbId, CoreError> {
    let invalid = || CoreError::InvalidIdentifier(format!("'{raw}' is not a valid overlay id"));

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    match raw.parse::<DbId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(invalid()),
    }
}
