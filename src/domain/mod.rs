//! Domain types for the media catalog.
//!
//! - Item: one rentable record and its identifiers
//! - Fee: per-kind rental fee formulas

pub mod fee;
pub mod item;

pub use fee::rental_fee;
pub use item::{Format, Item, MediaId, MediaKind, ParseError, PublicationYear, DEFAULT_DISC_SIZE_MB};
