use async_trait::async_trait;
use overlay_core::types::DbId;

use super::OverlayStore;
use crate::models::overlay::{NewOverlay, OverlayFields, OverlayRow};
use crate::repositories::OverlayRepo;
use crate::DbPool;

/// [`OverlayStore`] backed by the `overlays` table.
#[derive(Clone)]
pub struct PgOverlayStore {
    pool: DbPool,
}

impl PgOverlayStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OverlayStore for PgOverlayStore {
    async fn insert(&self, input: &NewOverlay) -> Result<OverlayRow, sqlx::Error> {
        OverlayRepo::create(&self.pool, input).await
    }

    async fn list_by_z_index(&self) -> Result<Vec<OverlayRow>, sqlx::Error> {
        OverlayRepo::list_by_z_index(&self.pool).await
    }

    async fn update(
        &self,
        id: DbId,
        fields: &OverlayFields,
    ) -> Result<Option<OverlayRow>, sqlx::Error> {
        OverlayRepo::update(&self.pool, id, fields).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        OverlayRepo::delete(&self.pool, id).await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}
