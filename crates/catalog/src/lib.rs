//! # Catalog Crate
//!
//! Domain types and input plumbing for the recommendation engine.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (ContentItem, WatchHistoryEntry, Catalog)
//! - **loader**: Load catalog/history/rating snapshots from JSON files
//! - **progress**: Playback progress helper
//! - **error**: Error types for catalog construction and loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{loader, Catalog};
//! use std::path::Path;
//!
//! let catalog = loader::load_catalog(Path::new("data/catalog.json"))?;
//! let history = loader::load_watch_history(Path::new("data/history.json"))?;
//!
//! let item = catalog.get(42).unwrap();
//! println!("{} has {} entries", item.title, catalog.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod loader;
pub mod progress;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use types::{
    // Type aliases
    ContentId,
    CategoryId,
    Timestamp,
    RatingMap,
    // Core types
    Catalog,
    ContentItem,
    ContentType,
    WatchHistoryEntry,
};
pub use progress::calculate_progress;
