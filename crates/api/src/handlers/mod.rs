pub mod index;
pub mod overlays;
pub mod streams;
