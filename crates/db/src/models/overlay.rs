//! Overlay models and DTOs.
//!
//! Rows may be partial (every overlay column is nullable). The API never
//! exposes a row directly: it is converted into an [`Overlay`], which carries
//! all seven fields with defaults filled in.

use chrono::{DateTime, Utc};
use overlay_core::overlay::{
    Position, Size, DEFAULT_CONTENT, DEFAULT_KIND, DEFAULT_OPACITY, DEFAULT_ROTATION,
    DEFAULT_Z_INDEX,
};
use overlay_core::types::DbId;
use serde::{Deserialize, Serialize, Serializer};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `overlays` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct OverlayRow {
    pub id: DbId,
    pub overlay_type: Option<String>,
    pub content: Option<String>,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub opacity: Option<f64>,
    pub rotation: Option<f64>,
    pub z_index: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// API view
// ---------------------------------------------------------------------------

/// A fully materialized overlay as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    /// Opaque identifier; serialized as a string.
    #[serde(serialize_with = "serialize_id")]
    pub id: DbId,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    pub position: Position,
    pub size: Size,
    pub opacity: f64,
    pub rotation: f64,
    pub z_index: i32,
}

fn serialize_id<S: Serializer>(id: &DbId, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(id)
}

impl From<OverlayRow> for Overlay {
    fn from(row: OverlayRow) -> Self {
        let position = match (row.position_x, row.position_y) {
            (Some(x), Some(y)) => Position { x, y },
            _ => Position::default(),
        };
        let size = match (row.width, row.height) {
            (Some(width), Some(height)) => Size { width, height },
            _ => Size::default(),
        };

        Self {
            id: row.id,
            kind: row.overlay_type.unwrap_or_else(|| DEFAULT_KIND.to_owned()),
            content: row.content.unwrap_or_else(|| DEFAULT_CONTENT.to_owned()),
            position,
            size,
            opacity: row.opacity.unwrap_or(DEFAULT_OPACITY),
            rotation: row.rotation.unwrap_or(DEFAULT_ROTATION),
            z_index: row.z_index.unwrap_or(DEFAULT_Z_INDEX),
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// Writable overlay fields, used for both creates and partial updates.
///
/// Only the whitelisted keys are declared, so any other key in a request body
/// is silently dropped during deserialization. `null` counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayFields {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub content: Option<String>,
    pub position: Option<Position>,
    pub size: Option<Size>,
    pub opacity: Option<f64>,
    pub rotation: Option<f64>,
    pub z_index: Option<i32>,
}

impl OverlayFields {
    /// Returns `true` if no writable field was supplied.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fill every absent field with its default, producing an insertable overlay.
    pub fn into_new_overlay(self) -> NewOverlay {
        NewOverlay {
            kind: self.kind.unwrap_or_else(|| DEFAULT_KIND.to_owned()),
            content: self.content.unwrap_or_else(|| DEFAULT_CONTENT.to_owned()),
            position: self.position.unwrap_or_default(),
            size: self.size.unwrap_or_default(),
            opacity: self.opacity.unwrap_or(DEFAULT_OPACITY),
            rotation: self.rotation.unwrap_or(DEFAULT_ROTATION),
            z_index: self.z_index.unwrap_or(DEFAULT_Z_INDEX),
        }
    }
}

/// A complete overlay ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOverlay {
    pub kind: String,
    pub content: String,
    pub position: Position,
    pub size: Size,
    pub opacity: f64,
    pub rotation: f64,
    pub z_index: i32,
}

/// Confirmation payload for a successful delete.
#[derive(Debug, Clone, Serialize)]
pub struct DeletedResponse {
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn empty_row(id: DbId) -> OverlayRow {
        let now = Utc::now();
        OverlayRow {
            id,
            overlay_type: None,
            content: None,
            position_x: None,
            position_y: None,
            width: None,
            height: None,
            opacity: None,
            rotation: None,
            z_index: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn partial_row_materializes_with_defaults() {
        let row = OverlayRow {
            content: Some("Live".into()),
            z_index: Some(4),
            ..empty_row(12)
        };

        let json = serde_json::to_value(Overlay::from(row)).unwrap();

        assert_eq!(json["id"], "12");
        assert_eq!(json["type"], "text");
        assert_eq!(json["content"], "Live");
        assert_eq!(json["position"], json!({"x": 100.0, "y": 100.0}));
        assert_eq!(json["size"], json!({"width": 200.0, "height": 80.0}));
        assert_eq!(json["opacity"].as_f64(), Some(1.0));
        assert_eq!(json["rotation"].as_f64(), Some(0.0));
        assert_eq!(json["zIndex"], 4);
        assert_eq!(json.as_object().unwrap().len(), 8);
    }

    #[test]
    fn unknown_keys_are_dropped() {
        let fields: OverlayFields =
            serde_json::from_value(json!({"content": "hi", "foo": "bar", "id": "7"})).unwrap();

        assert_eq!(
            fields,
            OverlayFields {
                content: Some("hi".into()),
                ..OverlayFields::default()
            }
        );
    }

    #[test]
    fn camel_case_keys_are_read() {
        let fields: OverlayFields = serde_json::from_value(json!({
            "type": "logo",
            "zIndex": 3,
            "position": {"x": 5, "y": 6.5},
        }))
        .unwrap();

        assert_eq!(fields.kind.as_deref(), Some("logo"));
        assert_eq!(fields.z_index, Some(3));
        assert_eq!(fields.position, Some(Position { x: 5.0, y: 6.5 }));
    }

    #[test]
    fn nulls_count_as_absent() {
        let fields: OverlayFields =
            serde_json::from_value(json!({"content": null, "opacity": null})).unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn new_overlay_fills_each_field_independently() {
        let new = OverlayFields {
            kind: Some("logo".into()),
            opacity: Some(0.5),
            ..OverlayFields::default()
        }
        .into_new_overlay();

        assert_eq!(new.kind, "logo");
        assert_eq!(new.content, "");
        assert_eq!(new.position, Position::default());
        assert_eq!(new.size, Size::default());
        assert_eq!(new.opacity, 0.5);
        assert_eq!(new.rotation, 0.0);
        assert_eq!(new.z_index, 1);
    }

    fn sample_value(key: &str) -> serde_json::Value {
        match key {
            "type" | "content" => json!("x"),
            "position" => json!({"x": 1, "y": 2}),
            "size" => json!({"width": 3, "height": 4}),
            "opacity" | "rotation" => json!(0.5),
            "zIndex" => json!(2),
            other => panic!("no sample for writable field {other}"),
        }
    }

    #[test]
    fn fields_declare_exactly_the_writable_keys() {
        use overlay_core::overlay::{is_writable_field, WRITABLE_FIELDS};

        for key in WRITABLE_FIELDS {
            let fields: OverlayFields =
                serde_json::from_value(json!({ *key: sample_value(key) })).unwrap();
            assert!(!fields.is_empty(), "{key} is not read by OverlayFields");
        }

        let all: serde_json::Map<String, serde_json::Value> = WRITABLE_FIELDS
            .iter()
            .map(|key| (key.to_string(), sample_value(key)))
            .collect();
        let fields: OverlayFields = serde_json::from_value(all.into()).unwrap();
        assert!(fields.kind.is_some() && fields.content.is_some());
        assert!(fields.position.is_some() && fields.size.is_some());
        assert!(fields.opacity.is_some() && fields.rotation.is_some());
        assert!(fields.z_index.is_some());

        for key in ["id", "z_index", "createdAt", "updated_at"] {
            assert!(!is_writable_field(key));
            let fields: OverlayFields = serde_json::from_value(json!({ key: 1 })).unwrap();
            assert!(fields.is_empty(), "{key} should be dropped");
        }
    }

    #[test]
    fn unknown_kinds_are_kept() {
        let fields: OverlayFields = serde_json::from_value(json!({"type": "banner"})).unwrap();
        assert_eq!(fields.into_new_overlay().kind, "banner");
    }
}
