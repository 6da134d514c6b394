use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use overlay_core::types::DbId;
use tokio::sync::RwLock;

use super::OverlayStore;
use crate::models::overlay::{NewOverlay, OverlayFields, OverlayRow};

/// In-process [`OverlayStore`].
///
/// Ids start at 1 and are never reused, even after deletes. Contents are lost
/// when the process exits.
#[derive(Default)]
pub struct MemoryOverlayStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: DbId,
    rows: BTreeMap<DbId, OverlayRow>,
}

impl MemoryOverlayStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a row as-is, bypassing defaults. The id counter moves past it.
    pub async fn insert_row(&self, row: OverlayRow) {
        let mut inner = self.inner.write().await;
        inner.last_id = inner.last_id.max(row.id);
        inner.rows.insert(row.id, row);
    }
}

#[async_trait]
impl OverlayStore for MemoryOverlayStore {
    async fn insert(&self, input: &NewOverlay) -> Result<OverlayRow, sqlx::Error> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;

        let now = Utc::now();
        let row = OverlayRow {
            id: inner.last_id,
            overlay_type: Some(input.kind.clone()),
            content: Some(input.content.clone()),
            position_x: Some(input.position.x),
            position_y: Some(input.position.y),
            width: Some(input.size.width),
            height: Some(input.size.height),
            opacity: Some(input.opacity),
            rotation: Some(input.rotation),
            z_index: Some(input.z_index),
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn list_by_z_index(&self) -> Result<Vec<OverlayRow>, sqlx::Error> {
        let inner = self.inner.read().await;
        let mut rows: Vec<OverlayRow> = inner.rows.values().cloned().collect();
        rows.sort_by_key(|row| (row.z_index, row.id));
        Ok(rows)
    }

    async fn update(
        &self,
        id: DbId,
        fields: &OverlayFields,
    ) -> Result<Option<OverlayRow>, sqlx::Error> {
        let mut inner = self.inner.write().await;
        let Some(row) = inner.rows.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(kind) = &fields.kind {
            row.overlay_type = Some(kind.clone());
        }
        if let Some(content) = &fields.content {
            row.content = Some(content.clone());
        }
        if let Some(position) = fields.position {
            row.position_x = Some(position.x);
            row.position_y = Some(position.y);
        }
        if let Some(size) = fields.size {
            row.width = Some(size.width);
            row.height = Some(size.height);
        }
        if let Some(opacity) = fields.opacity {
            row.opacity = Some(opacity);
        }
        if let Some(rotation) = fields.rotation {
            row.rotation = Some(rotation);
        }
        if let Some(z_index) = fields.z_index {
            row.z_index = Some(z_index);
        }
        row.updated_at = Utc::now();

        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}
