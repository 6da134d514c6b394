//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod overlay_repo;

pub use overlay_repo::OverlayRepo;
