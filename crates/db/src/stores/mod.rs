//! The overlay store collaborator.
//!
//! Handlers talk to persistence through [`OverlayStore`] so the backing store
//! is chosen at startup and injected through application state. Each method
//! is a single atomic operation on one overlay.

use async_trait::async_trait;
use overlay_core::types::DbId;

use crate::models::overlay::{NewOverlay, OverlayFields, OverlayRow};

pub mod memory;
pub mod postgres;

pub use memory::MemoryOverlayStore;
pub use postgres::PgOverlayStore;

#[async_trait]
pub trait OverlayStore: Send + Sync {
    /// Insert a new overlay and return it as stored, with its assigned id.
    async fn insert(&self, input: &NewOverlay) -> Result<OverlayRow, sqlx::Error>;

    /// All overlays, ascending by `z_index` (absent first), ties by id.
    async fn list_by_z_index(&self) -> Result<Vec<OverlayRow>, sqlx::Error>;

    /// Apply the supplied fields and return the post-update row, or `None`
    /// if no overlay has this id.
    async fn update(
        &self,
        id: DbId,
        fields: &OverlayFields,
    ) -> Result<Option<OverlayRow>, sqlx::Error>;

    /// Remove an overlay. Returns `true` if one was removed.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}
