//! medialib - Media rental catalog
//!
//! Tracks e-books, music CDs and movie DVDs, computes their rental fees
//! and offers add / find / remove / rent / modify / list operations over
//! an in-memory catalog loaded from a flat text file.
//!
//! # Modules
//!
//! - `domain`: Item types and fee formulas
//! - `library`: The catalog and its load-file parser
//! - `config`: Config file and environment resolution
//! - `cli`: Command-line interface and interactive menu
//!
//! # Usage
//!
//! ```bash
//! # Interactive menu over PRJ4Rentals.txt
//! medialib
//!
//! # List only DVDs from another file
//! medialib --data-file rentals.txt list --kind dvd
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod library;

// Re-export main types at crate root for convenience
pub use domain::{rental_fee, Format, Item, MediaId, MediaKind, PublicationYear};
pub use library::{Catalog, CatalogError, LoadReport, RentOutcome};
