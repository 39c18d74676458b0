//! # Recommendation Engine Crate
//!
//! Deterministic, per-request content recommendation for the streaming
//! catalog. No learned model and no persisted state: every call scores
//! the snapshots it is handed and forgets them.
//!
//! ## Components
//!
//! - **config**: `ScoringWeights`, the injected weight table
//! - **similarity**: pairwise attribute-overlap scoring
//! - **profile**: implicit taste-profile extraction from watch history
//! - **scoring**: per-candidate scoring (base + profile + collaborative)
//! - **ranker**: the `Recommender` facade with its three ranking modes
//! - **error**: caller-contract violations
//!
//! ## Architecture
//! One recommendation request flows through three stages:
//! 1. `PreferenceExtractor` turns watch history + ratings into a
//!    `UserPreferenceProfile`
//! 2. `CandidateScorer` scores every unwatched candidate against the
//!    profile, consulting `SimilarityScorer` per watched/rated item
//! 3. `Recommender` sorts descending (stable, catalog order on ties) and
//!    truncates to the result limit
//!
//! ## Example Usage
//! ```ignore
//! use engine::Recommender;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let recommender = Recommender::new();
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let recs = recommender.recommend(
//!     &catalog, &history, &ratings, None, 20, now, &mut rng,
//! )?;
//! let similar = recommender.similar_to(item_id, &catalog, 10)?;
//! let trending = recommender.trending(&catalog, &pool, 10);
//! ```

// Public modules
pub mod config;
pub mod error;
pub mod profile;
pub mod ranker;
pub mod scoring;
pub mod similarity;

// Re-export commonly used types
pub use config::ScoringWeights;
pub use error::{EngineError, Result};
pub use profile::{DurationBucket, PreferenceExtractor, UserPreferenceProfile};
pub use ranker::Recommender;
pub use scoring::CandidateScorer;
pub use similarity::SimilarityScorer;
