//! Ranking modes over the catalog.
//!
//! The `Recommender` is the public face of the engine. It is stateless
//! between calls: every invocation works on the snapshots it is handed
//! and retains nothing afterward, so concurrent requests are safe as long
//! as each gets its own inputs.
//!
//! ## Modes
//! - `recommend`: personalized ranking via preference extraction plus
//!   collaborative scoring; falls back to a shuffled slice of the catalog
//!   when the viewer has no history
//! - `similar_to`: pure attribute similarity to one target entry
//! - `trending`: view counts over a (possibly multi-viewer) history pool

use crate::config::ScoringWeights;
use crate::error::{EngineError, Result};
use crate::profile::PreferenceExtractor;
use crate::scoring::CandidateScorer;
use crate::similarity::SimilarityScorer;
use catalog::{Catalog, ContentId, ContentItem, RatingMap, Timestamp, WatchHistoryEntry};
use rand::Rng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

/// A candidate paired with its computed score, alive only inside the
/// ranking pipeline
struct ScoredCandidate<'a> {
    item: &'a ContentItem,
    score: f32,
}

/// Stateless ranking facade over the scoring components
#[derive(Debug, Clone, Copy)]
pub struct Recommender {
    extractor: PreferenceExtractor,
    scorer: CandidateScorer,
    similarity: SimilarityScorer,
}

impl Recommender {
    /// Recommender with the production weight table
    pub fn new() -> Self {
        Self::with_weights(ScoringWeights::default())
    }

    /// Recommender with a custom weight table
    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self {
            extractor: PreferenceExtractor::new(weights),
            scorer: CandidateScorer::new(weights),
            similarity: SimilarityScorer::new(weights),
        }
    }

    /// Personalized recommendations for one viewer.
    ///
    /// Watched ids and explicit exclusions never appear in the output.
    /// With an empty watch history there is no personalization signal, so
    /// the fallback returns eligible entries in the order drawn from
    /// `rng`; seed it for reproducible output.
    ///
    /// `now` is the request time in unix seconds; recency decay is
    /// computed against it rather than the wall clock.
    ///
    /// # Errors
    /// `RatingOutOfRange` if any explicit rating falls outside 1..=5.
    #[instrument(skip_all, fields(catalog_len = catalog.len(), history_len = history.len(), limit))]
    pub fn recommend<R: Rng + ?Sized>(
        &self,
        catalog: &Catalog,
        history: &[WatchHistoryEntry],
        ratings: &RatingMap,
        exclude: Option<&HashSet<ContentId>>,
        limit: usize,
        now: Timestamp,
        rng: &mut R,
    ) -> Result<Vec<ContentItem>> {
        for (&content_id, &rating) in ratings {
            if !(1..=5).contains(&rating) {
                return Err(EngineError::RatingOutOfRange { content_id, rating });
            }
        }

        let excluded = |id: ContentId| exclude.is_some_and(|set| set.contains(&id));

        if history.is_empty() {
            debug!("no watch history, falling back to shuffled catalog");
            let mut eligible: Vec<&ContentItem> =
                catalog.iter().filter(|item| !excluded(item.id)).collect();
            eligible.shuffle(rng);
            eligible.truncate(limit);
            return Ok(eligible.into_iter().cloned().collect());
        }

        let watched: HashSet<ContentId> = history.iter().map(|e| e.content_id).collect();
        let profile = self.extractor.extract(history, catalog, ratings);

        let candidates: Vec<&ContentItem> = catalog
            .iter()
            .filter(|item| !watched.contains(&item.id) && !excluded(item.id))
            .collect();

        // Scores are independent per candidate; par_iter preserves input
        // order so the stable tie-break below still sees catalog order.
        let mut scored: Vec<ScoredCandidate> = candidates
            .par_iter()
            .map(|&item| ScoredCandidate {
                item,
                score: self.scorer.score(item, &profile, history, catalog, now),
            })
            .collect();

        sort_descending(&mut scored);
        scored.truncate(limit);

        debug!(returned = scored.len(), "personalized ranking complete");
        Ok(scored.into_iter().map(|c| c.item.clone()).collect())
    }

    /// Entries most similar to one target, by attribute overlap alone.
    ///
    /// The target itself is excluded from the output.
    ///
    /// # Errors
    /// `UnknownContent` if the target id isn't in the catalog.
    #[instrument(skip(self, catalog), fields(catalog_len = catalog.len()))]
    pub fn similar_to(
        &self,
        target: ContentId,
        catalog: &Catalog,
        limit: usize,
    ) -> Result<Vec<ContentItem>> {
        let target_item = catalog
            .get(target)
            .ok_or(EngineError::UnknownContent(target))?;

        let mut scored: Vec<ScoredCandidate> = catalog
            .iter()
            .filter(|item| item.id != target)
            .map(|item| ScoredCandidate {
                item,
                score: self.similarity.score(target_item, item),
            })
            .collect();

        sort_descending(&mut scored);
        scored.truncate(limit);

        Ok(scored.into_iter().map(|c| c.item.clone()).collect())
    }

    /// Most-watched entries across a history pool.
    ///
    /// The pool may span many viewers. Every catalog entry participates
    /// with its view count (zero if unwatched), so a sparse pool still
    /// fills `limit` in catalog order.
    pub fn trending(
        &self,
        catalog: &Catalog,
        pool: &[WatchHistoryEntry],
        limit: usize,
    ) -> Vec<ContentItem> {
        let mut counts: HashMap<ContentId, u32> = HashMap::new();
        for entry in pool {
            *counts.entry(entry.content_id).or_insert(0) += 1;
        }

        let mut ranked: Vec<(&ContentItem, u32)> = catalog
            .iter()
            .map(|item| (item, counts.get(&item.id).copied().unwrap_or(0)))
            .collect();

        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);

        ranked.into_iter().map(|(item, _)| item.clone()).collect()
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable descending sort; equal scores keep catalog input order.
/// `total_cmp` keeps the comparator total even if a caller smuggles a
/// NaN in through `popularity`.
fn sort_descending(scored: &mut [ScoredCandidate]) {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn item(id: u32, genre: &str, category_id: u32) -> ContentItem {
        ContentItem {
            id,
            title: format!("Item {}", id),
            description: String::new(),
            category_id,
            genre: Some(genre.to_string()),
            tags: None,
            content_type: None,
            release_year: 2020,
            duration_secs: None,
            premium: false,
            popularity: None,
            content_rating: None,
        }
    }

    fn watch(content_id: u32, watched_at: i64) -> WatchHistoryEntry {
        WatchHistoryEntry {
            content_id,
            watched_at,
            watch_time_pct: 100.0,
            completed: true,
        }
    }

    const NOW: Timestamp = 1_700_000_000;

    #[test]
    fn test_invalid_rating_rejected() {
        let catalog = Catalog::from_items(vec![item(1, "drama", 1)]).unwrap();
        let mut ratings = RatingMap::new();
        ratings.insert(1, 6);

        let mut rng = StdRng::seed_from_u64(0);
        let result = Recommender::new().recommend(
            &catalog,
            &[],
            &ratings,
            None,
            5,
            NOW,
            &mut rng,
        );
        assert!(matches!(
            result,
            Err(EngineError::RatingOutOfRange { content_id: 1, rating: 6 })
        ));
    }

    #[test]
    fn test_fallback_respects_exclusions_and_limit() {
        let catalog = Catalog::from_items(vec![
            item(1, "drama", 1),
            item(2, "drama", 1),
            item(3, "drama", 1),
        ])
        .unwrap();
        let exclude: HashSet<ContentId> = [2].into_iter().collect();

        let mut rng = StdRng::seed_from_u64(42);
        let recs = Recommender::new()
            .recommend(&catalog, &[], &RatingMap::new(), Some(&exclude), 10, NOW, &mut rng)
            .unwrap();

        assert_eq!(recs.len(), 2);
        assert!(recs.iter().all(|r| r.id != 2));
    }

    #[test]
    fn test_fallback_deterministic_with_same_seed() {
        let catalog =
            Catalog::from_items((1..=20).map(|id| item(id, "drama", 1)).collect()).unwrap();

        let recommender = Recommender::new();
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);

        let a = recommender
            .recommend(&catalog, &[], &RatingMap::new(), None, 5, NOW, &mut rng_a)
            .unwrap();
        let b = recommender
            .recommend(&catalog, &[], &RatingMap::new(), None, 5, NOW, &mut rng_b)
            .unwrap();

        let ids_a: Vec<_> = a.iter().map(|i| i.id).collect();
        let ids_b: Vec<_> = b.iter().map(|i| i.id).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn test_zero_limit_returns_empty() {
        let catalog = Catalog::from_items(vec![item(1, "drama", 1), item(2, "drama", 1)]).unwrap();
        let history = vec![watch(1, NOW)];

        let mut rng = StdRng::seed_from_u64(0);
        let recs = Recommender::new()
            .recommend(&catalog, &history, &RatingMap::new(), None, 0, NOW, &mut rng)
            .unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn test_similar_to_unknown_target() {
        let catalog = Catalog::from_items(vec![item(1, "drama", 1)]).unwrap();
        let result = Recommender::new().similar_to(99, &catalog, 5);
        assert!(matches!(result, Err(EngineError::UnknownContent(99))));
    }

    #[test]
    fn test_similar_to_excludes_target() {
        let catalog = Catalog::from_items(vec![
            item(1, "drama", 1),
            item(2, "drama", 1),
            item(3, "comedy", 2),
        ])
        .unwrap();

        let similar = Recommender::new().similar_to(1, &catalog, 10).unwrap();
        assert!(similar.iter().all(|i| i.id != 1));
        // Shared genre + category ranks item 2 first
        assert_eq!(similar[0].id, 2);
    }

    #[test]
    fn test_trending_counts_and_tie_order() {
        let catalog = Catalog::from_items(vec![
            item(1, "drama", 1),
            item(2, "drama", 1),
            item(3, "drama", 1),
        ])
        .unwrap();
        // Item 3 watched twice, items 1 and 2 tied at zero
        let pool = vec![watch(3, NOW), watch(3, NOW - 100)];

        let trending = Recommender::new().trending(&catalog, &pool, 3);
        let ids: Vec<_> = trending.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_empty_catalog_gives_empty_results() {
        let catalog = Catalog::new();
        let recommender = Recommender::new();

        let mut rng = StdRng::seed_from_u64(0);
        let recs = recommender
            .recommend(&catalog, &[], &RatingMap::new(), None, 5, NOW, &mut rng)
            .unwrap();
        assert!(recs.is_empty());

        let trending = recommender.trending(&catalog, &[], 5);
        assert!(trending.is_empty());
    }
}
