//! Per-candidate scoring against a viewer's profile and history.
//!
//! ## Algorithm
//! One additive score per unwatched candidate; higher is better, no
//! upper bound, no normalization:
//! 1. Normalized popularity
//! 2. Premium-affinity match
//! 3. Preferred-duration-bucket match
//! 4. Profile matches (genre, category, content type, tag fraction)
//! 5. Collaborative term: similarity to every watched item, scaled by
//!    engagement (completion bonus or dampened watch fraction) and an
//!    exponentially decaying recency boost
//! 6. Rating term: similarity to every highly rated item, scaled by the
//!    normalized rating

use crate::config::ScoringWeights;
use crate::profile::{DurationBucket, UserPreferenceProfile};
use crate::similarity::SimilarityScorer;
use catalog::{Catalog, ContentItem, Timestamp, WatchHistoryEntry};

const SECS_PER_DAY: f32 = 86_400.0;

/// Scores one candidate entry for one viewer
#[derive(Debug, Clone, Copy)]
pub struct CandidateScorer {
    weights: ScoringWeights,
    similarity: SimilarityScorer,
}

impl CandidateScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights,
            similarity: SimilarityScorer::new(weights),
        }
    }

    /// Additive relevance score for an unwatched candidate.
    ///
    /// `now` is the injected request time; the scorer never reads the
    /// wall clock.
    pub fn score(
        &self,
        candidate: &ContentItem,
        profile: &UserPreferenceProfile,
        history: &[WatchHistoryEntry],
        catalog: &Catalog,
        now: Timestamp,
    ) -> f32 {
        let mut score = 0.0;

        if let Some(popularity) = candidate.popularity {
            score += popularity / 100.0 * self.weights.popularity;
        }

        if let Some(affinity) = profile.premium_affinity {
            if candidate.premium == affinity {
                score += self.weights.premium;
            }
        }

        if let (Some(duration), Some(preferred)) =
            (candidate.duration_secs, profile.preferred_duration)
        {
            if DurationBucket::classify(duration) == preferred {
                score += self.weights.duration_pref;
            }
        }

        score += self.profile_match(candidate, profile);
        score += self.collaborative(candidate, history, catalog, now);
        score += self.rated_similarity(candidate, profile, catalog);

        score
    }

    /// Contributions from the candidate's attributes appearing in the
    /// profile's favored lists
    fn profile_match(&self, candidate: &ContentItem, profile: &UserPreferenceProfile) -> f32 {
        let mut score = 0.0;

        if let (Some(genre), Some(favored)) = (&candidate.genre, &profile.genres) {
            if favored.contains(genre) {
                score += self.weights.genre;
            }
        }

        if let Some(favored) = &profile.categories {
            if favored.contains(&candidate.category_id) {
                score += self.weights.category;
            }
        }

        if let (Some(content_type), Some(favored)) =
            (candidate.content_type, &profile.content_types)
        {
            if favored.contains(&content_type) {
                score += self.weights.content_type;
            }
        }

        if let (Some(tags), Some(top_tags)) = (&candidate.tags, &profile.tags) {
            if !tags.is_empty() {
                let matching = tags.iter().filter(|t| top_tags.contains(t)).count();
                score += matching as f32 / tags.len() as f32 * self.weights.tag;
            }
        }

        score
    }

    /// Similarity to each watched item, weighted by engagement and recency.
    ///
    /// History entries referencing ids missing from the catalog are
    /// skipped.
    fn collaborative(
        &self,
        candidate: &ContentItem,
        history: &[WatchHistoryEntry],
        catalog: &Catalog,
        now: Timestamp,
    ) -> f32 {
        let mut score = 0.0;

        for entry in history {
            let Some(watched) = catalog.get(entry.content_id) else {
                continue;
            };

            let sim = self.similarity.score(candidate, watched);
            let engagement = if entry.completed {
                self.weights.completion_bonus
            } else {
                (entry.watch_time_pct / 100.0).clamp(0.0, 1.0) * self.weights.partial_watch_factor
            };
            let days_since = (now - entry.watched_at).max(0) as f32 / SECS_PER_DAY;
            let recency =
                1.0 + (-self.weights.recency_decay * days_since).exp() * self.weights.recency;

            score += sim * engagement * recency;
        }

        score
    }

    /// Similarity to each item the viewer rated at or above the threshold,
    /// scaled by the normalized rating
    fn rated_similarity(
        &self,
        candidate: &ContentItem,
        profile: &UserPreferenceProfile,
        catalog: &Catalog,
    ) -> f32 {
        let Some(ratings) = &profile.ratings else {
            return 0.0;
        };

        // HashMap iteration order is not stable across map instances; fix
        // it so float accumulation is reproducible for identical inputs.
        let mut rated: Vec<(u32, u8)> = ratings.iter().map(|(&id, &r)| (id, r)).collect();
        rated.sort_unstable_by_key(|&(id, _)| id);

        let mut score = 0.0;
        for (content_id, rating) in rated {
            if rating < self.weights.high_rating_threshold {
                continue;
            }
            let Some(rated_item) = catalog.get(content_id) else {
                continue;
            };
            score += self.similarity.score(candidate, rated_item) * (rating as f32 / 5.0);
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::RatingMap;

    fn item(id: u32, genre: &str) -> ContentItem {
        ContentItem {
            id,
            title: format!("Item {}", id),
            description: String::new(),
            category_id: 1,
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

    fn watch(content_id: u32, completed: bool, pct: f32, watched_at: i64) -> WatchHistoryEntry {
        WatchHistoryEntry {
            content_id,
            watched_at,
            watch_time_pct: pct,
            completed,
        }
    }

    fn scorer() -> CandidateScorer {
        CandidateScorer::new(ScoringWeights::default())
    }

    const NOW: Timestamp = 1_700_000_000;

    #[test]
    fn test_popularity_contribution() {
        let mut candidate = item(1, "drama");
        candidate.popularity = Some(80.0);

        let catalog = Catalog::new();
        let score = scorer().score(
            &candidate,
            &UserPreferenceProfile::empty(),
            &[],
            &catalog,
            NOW,
        );
        assert!((score - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_premium_match_needs_defined_affinity() {
        let candidate = item(1, "drama");
        let catalog = Catalog::new();

        // Undefined affinity: no contribution even though flags "match"
        let score = scorer().score(
            &candidate,
            &UserPreferenceProfile::empty(),
            &[],
            &catalog,
            NOW,
        );
        assert_eq!(score, 0.0);

        // Free affinity matches the free candidate
        let profile = UserPreferenceProfile {
            premium_affinity: Some(false),
            ..Default::default()
        };
        let score = scorer().score(&candidate, &profile, &[], &catalog, NOW);
        assert!((score - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_profile_genre_match() {
        let candidate = item(1, "drama");
        let profile = UserPreferenceProfile {
            genres: Some(vec!["drama".to_string()]),
            ..Default::default()
        };

        let score = scorer().score(&candidate, &profile, &[], &Catalog::new(), NOW);
        assert!((score - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_tag_fraction() {
        let mut candidate = item(1, "drama");
        candidate.genre = None;
        candidate.tags = Some(vec![
            "heist".to_string(),
            "noir".to_string(),
            "slow".to_string(),
            "cult".to_string(),
        ]);
        let profile = UserPreferenceProfile {
            tags: Some(vec!["noir".to_string(), "cult".to_string()]),
            ..Default::default()
        };

        // 2 of 4 tags match -> 0.5 * 2.0
        let score = scorer().score(&candidate, &profile, &[], &Catalog::new(), NOW);
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_completed_watch_outweighs_partial() {
        // Two watched items with identical similarity to the candidate
        let watched_a = item(10, "drama");
        let watched_b = item(11, "drama");
        let candidate = item(1, "drama");
        let catalog =
            Catalog::from_items(vec![watched_a, watched_b, candidate.clone()]).unwrap();

        let s = scorer();
        let profile = UserPreferenceProfile::empty();

        let completed = [watch(10, true, 100.0, NOW)];
        let partial = [watch(11, false, 90.0, NOW)];

        let completed_score = s.score(&candidate, &profile, &completed, &catalog, NOW);
        let partial_score = s.score(&candidate, &profile, &partial, &catalog, NOW);
        assert!(completed_score > partial_score);
    }

    #[test]
    fn test_recent_watch_outweighs_old() {
        let watched = item(10, "drama");
        let candidate = item(1, "drama");
        let catalog = Catalog::from_items(vec![watched, candidate.clone()]).unwrap();

        let s = scorer();
        let profile = UserPreferenceProfile::empty();

        let recent = [watch(10, true, 100.0, NOW)];
        let old = [watch(10, true, 100.0, NOW - 100 * 86_400)];

        let recent_score = s.score(&candidate, &profile, &recent, &catalog, NOW);
        let old_score = s.score(&candidate, &profile, &old, &catalog, NOW);
        assert!(recent_score > old_score);
    }

    #[test]
    fn test_unknown_history_entry_skipped() {
        let candidate = item(1, "drama");
        let catalog = Catalog::from_items(vec![candidate.clone()]).unwrap();

        let history = [watch(999, true, 100.0, NOW)];
        let score = scorer().score(
            &candidate,
            &UserPreferenceProfile::empty(),
            &history,
            &catalog,
            NOW,
        );
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_rating_term_respects_threshold() {
        let rated_high = item(10, "drama");
        let rated_low = item(11, "drama");
        let candidate = item(1, "drama");
        let catalog =
            Catalog::from_items(vec![rated_high, rated_low, candidate.clone()]).unwrap();

        let mut ratings = RatingMap::new();
        ratings.insert(10, 5);
        ratings.insert(11, 3);
        let profile = UserPreferenceProfile {
            ratings: Some(ratings),
            ..Default::default()
        };

        // Only item 10 contributes: similarity (genre 3.0 + category 2.5)
        // scaled by 5/5
        let score = scorer().score(&candidate, &profile, &[], &catalog, NOW);
        assert!((score - 5.5).abs() < 1e-5);
    }

    #[test]
    fn test_rated_item_missing_from_catalog_skipped() {
        let candidate = item(1, "drama");
        let catalog = Catalog::from_items(vec![candidate.clone()]).unwrap();

        let mut ratings = RatingMap::new();
        ratings.insert(999, 5);
        let profile = UserPreferenceProfile {
            ratings: Some(ratings),
            ..Default::default()
        };

        let score = scorer().score(&candidate, &profile, &[], &catalog, NOW);
        assert_eq!(score, 0.0);
    }
}
