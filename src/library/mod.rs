//! The rental catalog and its initial load.
//!
//! The catalog lives in memory only. It is filled once from the load file
//! at startup; changes made during a session are not written back.

pub mod catalog;
pub mod loader;

pub use catalog::{Catalog, CatalogError, RentOutcome};
pub use loader::{load_file, load_or_empty, parse_record, parse_records, LoadError, LoadReport, RecordError, SkippedRecord};
