//! In-memory catalog of rentable items.
//!
//! Items are kept in insertion order and looked up by linear scan. IDs are
//! not required to be unique; every lookup acts on the first match.

use thiserror::Error;
use tracing::debug;

use crate::domain::{Item, MediaId, MediaKind, PublicationYear};

/// Errors returned by catalog operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Media not found: {0}")]
    NotFound(MediaId),
}

/// Result of a rent request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentOutcome {
    /// The item was available and is now rented
    Changed,

    /// The item was already rented; nothing changed
    AlreadyRented,

    /// No item has this ID
    NotFound,
}

/// Catalog of all items
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item. Duplicate IDs are accepted.
    pub fn add(&mut self, item: Item) {
        debug!(id = %item.id, kind = %item.kind(), "Adding item");
        self.items.push(item);
    }

    /// Get the first item with this ID
    pub fn find(&self, id: &MediaId) -> Option<&Item> {
        self.items.iter().find(|i| &i.id == id)
    }

    fn find_mut(&mut self, id: &MediaId) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| &i.id == id)
    }

    /// Check whether any item has this ID
    pub fn contains(&self, id: &MediaId) -> bool {
        self.find(id).is_some()
    }

    /// Remove the first item with this ID, returning whether one was found
    pub fn remove(&mut self, id: &MediaId) -> bool {
        match self.items.iter().position(|i| &i.id == id) {
            Some(pos) => {
                self.items.remove(pos);
                debug!(%id, "Removed item");
                true
            }
            None => false,
        }
    }

    /// Mark an item as rented
    pub fn rent(&mut self, id: &MediaId) -> RentOutcome {
        match self.find_mut(id) {
            None => RentOutcome::NotFound,
            Some(item) if item.rented => RentOutcome::AlreadyRented,
            Some(item) => {
                item.rented = true;
                debug!(%id, "Item rented");
                RentOutcome::Changed
            }
        }
    }

    /// Update an item's scope and publication year, returning the new fee.
    ///
    /// `scope` is applied to e-books and music discs only; a movie disc
    /// keeps its size. The year is always replaced.
    pub fn update(
        &mut self,
        id: &MediaId,
        scope: Option<i32>,
        year: PublicationYear,
    ) -> Result<f64, CatalogError> {
        let item = self
            .find_mut(id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;

        if let Some(scope) = scope {
            if !item.set_scope(scope) {
                debug!(%id, "Ignoring scope update for movie disc");
            }
        }
        item.publication_year = year;

        let fee = item.rental_fee();
        debug!(%id, fee, "Updated item");
        Ok(fee)
    }

    /// All items in insertion order
    pub fn list(&self) -> Vec<&Item> {
        self.items.iter().collect()
    }

    /// Items of one kind, in insertion order
    pub fn list_by_kind(&self, kind: MediaKind) -> Vec<&Item> {
        self.items.iter().filter(|i| i.kind() == kind).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Item> for Catalog {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
