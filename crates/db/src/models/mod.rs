//! Model structs and DTOs.
//!
//! - A `FromRow` entity struct matching the database row
//! - A `Serialize` view with defaults applied for API responses
//! - A `Deserialize` DTO (all `Option` fields) for creates and patches

pub mod overlay;
