//! Initial catalog load from a flat text file.
//!
//! One record per line, fields separated by `", "`:
//!
//! ```text
//! 12345, false, E, The Rust Book, 2018, 20
//! 23456, true, C, Kind of Blue, 1959, 46
//! 34567, false, D, Dune, 2021, 1
//! ```
//!
//! Bad records are skipped with a warning; they never abort the load.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::{info, warn};

use super::catalog::Catalog;
use crate::domain::{Format, Item, MediaId, MediaKind, ParseError, PublicationYear};

const FIELD_SEPARATOR: &str = ", ";

/// Errors reading the load file as a whole
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Error reading the file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reasons a single record is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("expected 6 fields, found {0}")]
    FieldCount(usize),

    #[error("invalid media kind '{0}'")]
    UnrecognizedKind(String),

    #[error(transparent)]
    Field(#[from] ParseError),

    #[error("invalid scope '{0}'")]
    InvalidScope(String),
}

/// A record that was left out of the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// 1-based line number in the source
    pub line: usize,

    /// Why the record was skipped
    pub error: RecordError,
}

/// Outcome of loading a file
#[derive(Debug, Default)]
pub struct LoadReport {
    pub catalog: Catalog,
    pub skipped: Vec<SkippedRecord>,
}

/// Parse a single record line
pub fn parse_record(line: &str) -> Result<Item, RecordError> {
    // id, rented and kind come from the left; year and scope from the
    // right. Whatever sits between is the title, separators included.
    let mut head = line.splitn(4, FIELD_SEPARATOR);
    let (id, rented, kind, rest) = match (head.next(), head.next(), head.next(), head.next()) {
        (Some(id), Some(rented), Some(kind), Some(rest)) => (id, rented, kind, rest),
        _ => return Err(RecordError::FieldCount(line.split(FIELD_SEPARATOR).count())),
    };

    let mut tail = rest.rsplitn(3, FIELD_SEPARATOR);
    let (scope, year, title) = match (tail.next(), tail.next(), tail.next()) {
        (Some(scope), Some(year), Some(title)) => (scope, year, title),
        _ => return Err(RecordError::FieldCount(line.split(FIELD_SEPARATOR).count())),
    };

    let kind = kind
        .chars()
        .next()
        .and_then(MediaKind::from_code)
        .ok_or_else(|| RecordError::UnrecognizedKind(kind.to_string()))?;
    let id: MediaId = id.trim().parse()?;
    let year: PublicationYear = year.trim().parse()?;
    let scope: i32 = scope
        .trim()
        .parse()
        .map_err(|_| RecordError::InvalidScope(scope.to_string()))?;

    Ok(Item::new(id, title, year, Format::new(kind, scope)).with_rented(rented.trim() == "true"))
}

/// Parse the full contents of a load file
pub fn parse_records(content: &str) -> LoadReport {
    let mut report = LoadReport::default();

    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match parse_record(line) {
            Ok(item) => report.catalog.add(item),
            Err(error) => {
                warn!(line = idx + 1, %error, "Skipping invalid record");
                report.skipped.push(SkippedRecord {
                    line: idx + 1,
                    error,
                });
            }
        }
    }

    report
}

/// Load a catalog from disk
pub async fn load_file(path: &Path) -> Result<LoadReport, LoadError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let report = parse_records(&content);
    info!(
        path = %path.display(),
        loaded = report.catalog.len(),
        skipped = report.skipped.len(),
        "Loaded catalog"
    );
    Ok(report)
}

/// Load a catalog from disk, starting empty if the file can't be read
pub async fn load_or_empty(path: &Path) -> LoadReport {
    match load_file(path).await {
        Ok(report) => report,
        Err(e) => {
            warn!("{}", e);
            LoadReport::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ebook_record() {
        let item = parse_record("12345, false, E, The Rust Book, 2018, 20").unwrap();

        assert_eq!(item.id.as_str(), "12345");
        assert!(!item.rented);
        assert_eq!(item.kind(), MediaKind::EBook);
        assert_eq!(item.title, "The Rust Book");
        assert_eq!(item.publication_year.value(), 2018);
        assert_eq!(item.scope(), 20);
    }

    #[test]
    fn test_parse_keeps_separators_inside_title() {
        let item = parse_record("23456, true, C, Hello, Goodbye, 1967, 3").unwrap();

        assert!(item.rented);
        assert_eq!(item.kind(), MediaKind::MusicDisc);
        assert_eq!(item.title, "Hello, Goodbye");
        assert_eq!(item.scope(), 3);
    }

    #[test]
    fn test_rented_flag_is_only_true_for_true() {
        assert!(!parse_record("12345, yes, D, Movie, 2001, 1").unwrap().rented);
        assert!(!parse_record("12345, TRUE, D, Movie, 2001, 1").unwrap().rented);
    }

    #[test]
    fn test_kind_taken_from_first_character() {
        let item = parse_record("34567, false, DVD, Movie, 2021, 700").unwrap();
        assert_eq!(item.kind(), MediaKind::MovieDisc);
        assert_eq!(item.scope(), 700);
    }

    #[test]
    fn test_parse_record_errors() {
        assert_eq!(
            parse_record("12345, false, X, Thing, 2000, 1"),
            Err(RecordError::UnrecognizedKind("X".to_string()))
        );
        assert_eq!(
            parse_record("12345, false, E"),
            Err(RecordError::FieldCount(3))
        );
        assert_eq!(
            parse_record("1234, false, E, Thing, 2000, 1"),
            Err(RecordError::Field(ParseError::InvalidId("1234".to_string())))
        );
        assert_eq!(
            parse_record("12345, false, E, Thing, 20, 1"),
            Err(RecordError::Field(ParseError::InvalidYear("20".to_string())))
        );
        assert_eq!(
            parse_record("12345, false, E, Thing, 2000, many"),
            Err(RecordError::InvalidScope("many".to_string()))
        );
    }

    #[test]
    fn test_parse_records_skips_bad_lines() {
        let content = "\
12345, false, E, Book, 2018, 20
99999, false, Z, Mystery, 2000, 1

23456, true, C, Album, 2010, 60
";
        let report = parse_records(content);

        assert_eq!(report.catalog.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 2);
    }
}
