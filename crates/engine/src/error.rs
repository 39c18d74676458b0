//! Error types for the recommendation engine.
//!
//! The engine is deliberately permissive: absent attributes, unknown
//! history ids, and empty inputs all degrade instead of failing. What
//! remains is caller misuse.

use catalog::ContentId;
use thiserror::Error;

/// Caller-contract violations surfaced by the engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// The similar-to target isn't in the supplied catalog
    #[error("Content {0} not found in catalog")]
    UnknownContent(ContentId),

    /// An explicit rating fell outside the closed 1-5 range
    #[error("Rating {rating} for content {content_id} is outside the 1-5 range")]
    RatingOutOfRange { content_id: ContentId, rating: u8 },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, EngineError>;
