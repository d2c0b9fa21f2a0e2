//! Catalog items and their identifiers.
//!
//! An [`Item`] is one rentable piece of media. The kind-specific attribute
//! (chapters, minutes or megabytes) lives in [`Format`], so the kind of an
//! item is fixed once it has been constructed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Size recorded for movie discs added interactively
pub const DEFAULT_DISC_SIZE_MB: i32 = 1;

/// Errors raised when parsing boundary values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid media ID '{0}': expected exactly 5 digits")]
    InvalidId(String),

    #[error("Invalid publication year '{0}': expected exactly 4 digits")]
    InvalidYear(String),

    #[error("Unknown media kind: {0}")]
    UnknownKind(String),
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

/// Media identifier (exactly 5 ASCII digits)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MediaId(String);

impl MediaId {
    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for MediaId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_digits(s, 5) {
            Ok(Self(s.to_string()))
        } else {
            Err(ParseError::InvalidId(s.to_string()))
        }
    }
}

impl TryFrom<String> for MediaId {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MediaId> for String {
    fn from(id: MediaId) -> Self {
        id.0
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Four-digit publication year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicationYear(u16);

impl PublicationYear {
    pub fn value(self) -> u16 {
        self.0
    }
}

impl FromStr for PublicationYear {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_digits(s, 4) {
            return Err(ParseError::InvalidYear(s.to_string()));
        }
        s.parse()
            .map(Self)
            .map_err(|_| ParseError::InvalidYear(s.to_string()))
    }
}

impl fmt::Display for PublicationYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Keep leading zeros so "0999" round-trips.
        write!(f, "{:04}", self.0)
    }
}

/// Kind of media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Electronic book
    #[serde(rename = "ebook")]
    EBook,

    /// Music CD
    MusicDisc,

    /// Movie DVD
    MovieDisc,
}

impl MediaKind {
    /// Single-letter code used in the load file and the menu
    pub fn code(self) -> char {
        match self {
            MediaKind::EBook => 'E',
            MediaKind::MusicDisc => 'C',
            MediaKind::MovieDisc => 'D',
        }
    }

    /// Look up a kind by its single-letter code
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'E' => Some(MediaKind::EBook),
            'C' => Some(MediaKind::MusicDisc),
            'D' => Some(MediaKind::MovieDisc),
            _ => None,
        }
    }

    /// Short name shown in listings
    pub fn display_name(self) -> &'static str {
        match self {
            MediaKind::EBook => "EBook",
            MediaKind::MusicDisc => "CD",
            MediaKind::MovieDisc => "DVD",
        }
    }

    /// What the scope column means for this kind
    pub fn scope_label(self) -> &'static str {
        match self {
            MediaKind::EBook => "number of chapters",
            MediaKind::MusicDisc => "length in minutes",
            MediaKind::MovieDisc => "size in megabytes",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for MediaKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "e" | "ebook" | "book" => Ok(MediaKind::EBook),
            "c" | "cd" | "music" => Ok(MediaKind::MusicDisc),
            "d" | "dvd" | "movie" => Ok(MediaKind::MovieDisc),
            _ => Err(ParseError::UnknownKind(s.to_string())),
        }
    }
}

/// Kind-specific payload of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Format {
    #[serde(rename = "ebook")]
    EBook { chapters: i32 },
    MusicDisc { minutes: i32 },
    MovieDisc { size_mb: i32 },
}

impl Format {
    /// Build the payload for `kind` carrying `scope`
    pub fn new(kind: MediaKind, scope: i32) -> Self {
        match kind {
            MediaKind::EBook => Format::EBook { chapters: scope },
            MediaKind::MusicDisc => Format::MusicDisc { minutes: scope },
            MediaKind::MovieDisc => Format::MovieDisc { size_mb: scope },
        }
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            Format::EBook { .. } => MediaKind::EBook,
            Format::MusicDisc { .. } => MediaKind::MusicDisc,
            Format::MovieDisc { .. } => MediaKind::MovieDisc,
        }
    }

    /// The kind-dependent scope value
    pub fn scope(&self) -> i32 {
        match *self {
            Format::EBook { chapters } => chapters,
            Format::MusicDisc { minutes } => minutes,
            Format::MovieDisc { size_mb } => size_mb,
        }
    }
}

/// A single rentable item in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Media identifier
    pub id: MediaId,

    /// Human-readable title
    pub title: String,

    /// Year of publication
    pub publication_year: PublicationYear,

    /// Whether the item is currently rented out
    #[serde(default)]
    pub rented: bool,

    /// Kind and kind-specific scope
    #[serde(flatten)]
    format: Format,
}

impl Item {
    /// Create a new, available item
    pub fn new(
        id: MediaId,
        title: impl Into<String>,
        publication_year: PublicationYear,
        format: Format,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            publication_year,
            rented: false,
            format,
        }
    }

    /// Create an e-book
    pub fn ebook(id: MediaId, title: impl Into<String>, year: PublicationYear, chapters: i32) -> Self {
        Self::new(id, title, year, Format::EBook { chapters })
    }

    /// Create a music disc
    pub fn music_disc(id: MediaId, title: impl Into<String>, year: PublicationYear, minutes: i32) -> Self {
        Self::new(id, title, year, Format::MusicDisc { minutes })
    }

    /// Create a movie disc
    pub fn movie_disc(id: MediaId, title: impl Into<String>, year: PublicationYear, size_mb: i32) -> Self {
        Self::new(id, title, year, Format::MovieDisc { size_mb })
    }

    /// Set the rented flag
    pub fn with_rented(mut self, rented: bool) -> Self {
        self.rented = rented;
        self
    }

    pub fn kind(&self) -> MediaKind {
        self.format.kind()
    }

    pub fn format(&self) -> &Format {
        &self.format
    }

    pub fn scope(&self) -> i32 {
        self.format.scope()
    }

    /// Replace the scope value. Movie discs keep their size; returns
    /// whether the value was applied.
    pub fn set_scope(&mut self, scope: i32) -> bool {
        match &mut self.format {
            Format::EBook { chapters } => *chapters = scope,
            Format::MusicDisc { minutes } => *minutes = scope,
            Format::MovieDisc { .. } => return false,
        }
        true
    }

    /// Rental fee for this item
    pub fn rental_fee(&self) -> f64 {
        super::fee::rental_fee(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> MediaId {
        s.parse().unwrap()
    }

    fn year(s: &str) -> PublicationYear {
        s.parse().unwrap()
    }

    #[test]
    fn test_media_id_requires_five_digits() {
        assert_eq!(id("01234").as_str(), "01234");
        assert!("1234".parse::<MediaId>().is_err());
        assert!("123456".parse::<MediaId>().is_err());
        assert!("12a45".parse::<MediaId>().is_err());
        assert!(" 1234".parse::<MediaId>().is_err());
    }

    #[test]
    fn test_publication_year_requires_four_digits() {
        assert_eq!(year("2020").value(), 2020);
        assert_eq!(year("0999").to_string(), "0999");
        assert_eq!(
            "20201".parse::<PublicationYear>(),
            Err(ParseError::InvalidYear("20201".to_string()))
        );
        assert!("20x0".parse::<PublicationYear>().is_err());
    }

    #[test]
    fn test_media_kind_codes() {
        for kind in [MediaKind::EBook, MediaKind::MusicDisc, MediaKind::MovieDisc] {
            assert_eq!(MediaKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(MediaKind::from_code('X'), None);
        assert_eq!(MediaKind::from_code('e'), None);
    }

    #[test]
    fn test_media_kind_from_str() {
        assert_eq!("e".parse::<MediaKind>().unwrap(), MediaKind::EBook);
        assert_eq!("CD".parse::<MediaKind>().unwrap(), MediaKind::MusicDisc);
        assert_eq!("dvd".parse::<MediaKind>().unwrap(), MediaKind::MovieDisc);
        assert!("vinyl".parse::<MediaKind>().is_err());
    }

    #[test]
    fn test_set_scope_skips_movie_discs() {
        let mut book = Item::ebook(id("00001"), "Book", year("2001"), 3);
        assert!(book.set_scope(12));
        assert_eq!(book.scope(), 12);

        let mut movie = Item::movie_disc(id("00002"), "Movie", year("2001"), 1);
        assert!(!movie.set_scope(700));
        assert_eq!(movie.scope(), 1);
        assert_eq!(movie.kind(), MediaKind::MovieDisc);
    }

    #[test]
    fn test_item_serialization() {
        let item = Item::music_disc(id("00003"), "Album", year("1999"), 45).with_rented(true);

        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"kind\":\"music_disc\""));
        assert!(json.contains("\"minutes\":45"));

        let parsed: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, item);
    }
}
