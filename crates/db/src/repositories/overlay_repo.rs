//! Repository for the `overlays` table.

use overlay_core::types::DbId;
use sqlx::PgPool;

use crate::models::overlay::{NewOverlay, OverlayFields, OverlayRow};

/// Column list for `overlays` queries.
const COLUMNS: &str = "\
    id, overlay_type, content, position_x, position_y, width, height, \
    opacity, rotation, z_index, created_at, updated_at";

/// Provides data access for overlays.
pub struct OverlayRepo;

impl OverlayRepo {
    /// Insert a new overlay, returning the stored row.
    pub async fn create(pool: &PgPool, input: &NewOverlay) -> Result<OverlayRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO overlays \
                 (overlay_type, content, position_x, position_y, width, height, \
                  opacity, rotation, z_index) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OverlayRow>(&query)
            .bind(&input.kind)
            .bind(&input.content)
            .bind(input.position.x)
            .bind(input.position.y)
            .bind(input.size.width)
            .bind(input.size.height)
            .bind(input.opacity)
            .bind(input.rotation)
            .bind(input.z_index)
            .fetch_one(pool)
            .await
    }

    /// List all overlays in stacking order.
    ///
    /// Rows without a stored `z_index` sort first; ties are broken by id.
    pub async fn list_by_z_index(pool: &PgPool) -> Result<Vec<OverlayRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM overlays ORDER BY z_index ASC NULLS FIRST, id ASC");
        sqlx::query_as::<_, OverlayRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find an overlay by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<OverlayRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM overlays WHERE id = $1");
        sqlx::query_as::<_, OverlayRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Partially update an overlay.
    ///
    /// Uses `COALESCE` so only provided fields are changed. `position` and
    /// `size` are replaced as whole objects. Returns `None` if no row matched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &OverlayFields,
    ) -> Result<Option<OverlayRow>, sqlx::Error> {
        let query = format!(
            "UPDATE overlays SET \
                 overlay_type = COALESCE($2, overlay_type), \
                 content = COALESCE($3, content), \
                 position_x = COALESCE($4, position_x), \
                 position_y = COALESCE($5, position_y), \
                 width = COALESCE($6, width), \
                 height = COALESCE($7, height), \
                 opacity = COALESCE($8, opacity), \
                 rotation = COALESCE($9, rotation), \
                 z_index = COALESCE($10, z_index) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OverlayRow>(&query)
            .bind(id)
            .bind(&dto.kind)
            .bind(&dto.content)
            .bind(dto.position.map(|p| p.x))
            .bind(dto.position.map(|p| p.y))
            .bind(dto.size.map(|s| s.width))
            .bind(dto.size.map(|s| s.height))
            .bind(dto.opacity)
            .bind(dto.rotation)
            .bind(dto.z_index)
            .fetch_optional(pool)
            .await
    }

    /// Delete an overlay by ID.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM overlays WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
