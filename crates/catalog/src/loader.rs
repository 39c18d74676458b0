//! Loading catalog / history / rating snapshots from JSON files.
//!
//! The surrounding application fetches these from its database or API; the
//! loaders here exist so demos and tests can feed the engine from flat
//! files:
//! - catalog.json: array of content items, in catalog order
//! - history.json: array of watch-history entries for one viewer
//! - ratings.json: object mapping content id to a 1-5 rating

use crate::error::{CatalogError, Result};
use crate::types::{Catalog, ContentItem, RatingMap, WatchHistoryEntry};
use std::fs;
use std::path::Path;

/// Load a catalog snapshot.
///
/// The file holds an ordered JSON array of content items; array order
/// becomes catalog order. Duplicate ids are rejected.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)?;
    let items: Vec<ContentItem> = serde_json::from_str(&content)?;
    Catalog::from_items(items)
}

/// Load one viewer's watch-history snapshot.
pub fn load_watch_history(path: &Path) -> Result<Vec<WatchHistoryEntry>> {
    let content = fs::read_to_string(path)?;
    let entries: Vec<WatchHistoryEntry> = serde_json::from_str(&content)?;
    Ok(entries)
}

/// Load a rating snapshot.
///
/// Ratings are range-checked here so a malformed snapshot is rejected at
/// the boundary instead of skewing scores later.
pub fn load_ratings(path: &Path) -> Result<RatingMap> {
    let content = fs::read_to_string(path)?;
    let ratings: RatingMap = serde_json::from_str(&content)?;

    for (&content_id, &rating) in &ratings {
        if !(1..=5).contains(&rating) {
            return Err(CatalogError::InvalidValue {
                field: format!("rating for content {}", content_id),
                value: rating.to_string(),
            });
        }
    }

    Ok(ratings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_catalog_preserves_order() {
        let path = write_temp(
            "catalog_order_test.json",
            r#"[
                {"id": 5, "title": "B", "description": "", "category_id": 1,
                 "genre": "drama", "tags": null, "content_type": "movie",
                 "release_year": 2020, "duration_secs": 5400, "premium": false,
                 "popularity": 80.0, "content_rating": "PG"},
                {"id": 2, "title": "A", "description": "", "category_id": 1,
                 "genre": null, "tags": ["indie"], "content_type": null,
                 "release_year": 2018, "duration_secs": null, "premium": true,
                 "popularity": null, "content_rating": null}
            ]"#,
        );

        let catalog = load_catalog(&path).unwrap();
        let ids: Vec<_> = catalog.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![5, 2]);

        let first = catalog.get(5).unwrap();
        assert_eq!(first.genre.as_deref(), Some("drama"));
        assert_eq!(first.duration_secs, Some(5400));

        let second = catalog.get(2).unwrap();
        assert!(second.genre.is_none());
        assert!(second.premium);
    }

    #[test]
    fn test_load_ratings_rejects_out_of_range() {
        let path = write_temp("ratings_bad_test.json", r#"{"1": 4, "2": 7}"#);
        let result = load_ratings(&path);
        assert!(matches!(result, Err(CatalogError::InvalidValue { .. })));
    }

    #[test]
    fn test_load_ratings_valid() {
        let path = write_temp("ratings_ok_test.json", r#"{"1": 4, "2": 5, "9": 1}"#);
        let ratings = load_ratings(&path).unwrap();
        assert_eq!(ratings.len(), 3);
        assert_eq!(ratings[&2], 5);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_catalog(Path::new("/nonexistent/catalog.json"));
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
