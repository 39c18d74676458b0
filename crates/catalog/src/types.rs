//! Core domain types for the streaming catalog.
//!
//! These are the immutable inputs the recommendation engine reads:
//! catalog entries, one viewer's watch history, and explicit ratings.
//! The engine never mutates any of them.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up content ids with
// category ids or raw timestamps.

/// Unique identifier for a catalog entry
pub type ContentId = u32;

/// Identifier of the category a catalog entry belongs to
pub type CategoryId = u32;

/// Unix timestamp in seconds
pub type Timestamp = i64;

/// Explicit ratings keyed by content id, values in the closed range 1..=5.
/// Absent entries mean "unrated".
pub type RatingMap = HashMap<ContentId, u8>;

// =============================================================================
// Content Types
// =============================================================================

/// The production format of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Movie,
    Series,
    MusicVideo,
    Trailer,
    ShortFilm,
}

/// A single catalog entry.
///
/// Attributes the upstream catalog may not have filled in (genre, tags,
/// content type, duration, popularity, rating label) are `Option<T>`;
/// an absent attribute contributes nothing to scoring rather than a
/// sentinel value leaking into the math.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ContentId,
    pub title: String,
    pub description: String,
    pub category_id: CategoryId,
    pub genre: Option<String>,
    pub tags: Option<Vec<String>>,
    pub content_type: Option<ContentType>,
    pub release_year: u16,
    /// Runtime in seconds
    pub duration_secs: Option<u32>,
    /// Whether the entry requires a premium subscription
    pub premium: bool,
    /// Popularity score on a 0-100 scale
    pub popularity: Option<f32>,
    /// Content rating label, e.g. "PG"
    pub content_rating: Option<String>,
}

// =============================================================================
// Watch History
// =============================================================================

/// One viewing of one catalog entry by one viewer.
///
/// Re-watches produce multiple entries for the same content id; the
/// engine aggregates them additively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchHistoryEntry {
    pub content_id: ContentId,
    /// When the viewing happened (unix seconds)
    pub watched_at: Timestamp,
    /// How much of the runtime was watched, 0-100 inclusive
    pub watch_time_pct: f32,
    pub completed: bool,
}

// =============================================================================
// Catalog - The Ordered Content Index
// =============================================================================

/// Insertion-ordered collection of catalog entries with O(1) id lookup.
///
/// The backing store is a `Vec` rather than a map: every ranking mode in
/// the engine breaks score ties by catalog input order, so that order
/// must survive indexing.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<ContentItem>,
    by_id: HashMap<ContentId, usize>,
}

impl Catalog {
    /// Creates a new, empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from an ordered list of entries.
    ///
    /// Returns `CatalogError::DuplicateId` if two entries share an id;
    /// a duplicate would silently shadow its predecessor in lookups.
    pub fn from_items(items: Vec<ContentItem>) -> Result<Self> {
        let mut catalog = Self::new();
        for item in items {
            catalog.insert(item)?;
        }
        Ok(catalog)
    }

    /// Append a single entry, preserving insertion order
    pub fn insert(&mut self, item: ContentItem) -> Result<()> {
        if self.by_id.contains_key(&item.id) {
            return Err(CatalogError::DuplicateId { id: item.id });
        }
        self.by_id.insert(item.id, self.items.len());
        self.items.push(item);
        Ok(())
    }

    /// Get an entry by id
    pub fn get(&self, id: ContentId) -> Option<&ContentItem> {
        self.by_id.get(&id).map(|&idx| &self.items[idx])
    }

    /// Whether an entry with this id exists
    pub fn contains(&self, id: ContentId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// All entries, in insertion order
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &ContentItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: ContentId) -> ContentItem {
        ContentItem {
            id,
            title: format!("Item {}", id),
            description: String::new(),
            category_id: 1,
            genre: None,
            tags: None,
            content_type: None,
            release_year: 2020,
            duration_secs: None,
            premium: false,
            popularity: None,
            content_rating: None,
        }
    }

    #[test]
    fn test_insertion_order_preserved() {
        let catalog = Catalog::from_items(vec![item(3), item(1), item(2)]).unwrap();

        let ids: Vec<ContentId> = catalog.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::from_items(vec![item(10), item(20)]).unwrap();

        assert_eq!(catalog.get(20).unwrap().id, 20);
        assert!(catalog.get(30).is_none());
        assert!(catalog.contains(10));
        assert!(!catalog.contains(30));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = Catalog::from_items(vec![item(1), item(1)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
        assert!(catalog.get(1).is_none());
    }
}
