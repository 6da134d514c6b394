//! Domain layer for the overlay service.
//!
//! Holds the overlay defaults and identifier rules, the shared error type,
//! and the segment-directory logic used to serve the live stream output.

pub mod error;
pub mod overlay;
pub mod segments;
pub mod types;
