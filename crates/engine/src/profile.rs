//! Implicit taste-profile extraction from watch history and ratings.
//!
//! ## Algorithm
//! 1. Weight each history entry: completion bonus if completed, else the
//!    watched fraction. Re-watches accumulate additively.
//! 2. Accumulate weighted counts per genre, category, content type, tag
//!    (tag weight split across the item's tags), duration bucket, and
//!    premium-vs-free.
//! 3. Rank each axis by descending accumulated weight; tags truncate to
//!    the configured top count.
//!
//! Entries referencing ids missing from the catalog are skipped. An empty
//! history yields an empty profile: every axis absent, no personalization
//! signal.

use crate::config::ScoringWeights;
use catalog::{Catalog, CategoryId, ContentType, RatingMap, WatchHistoryEntry};
use std::collections::HashMap;
use std::hash::Hash;
use tracing::debug;

/// Upper bound of the short duration bucket (15 minutes)
const SHORT_MAX_SECS: u32 = 900;

/// Upper bound of the medium duration bucket (1 hour)
const MEDIUM_MAX_SECS: u32 = 3600;

/// Coarse runtime classification used for duration preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationBucket {
    Short,
    Medium,
    Long,
}

impl DurationBucket {
    /// Bucket for a runtime in seconds
    pub fn classify(duration_secs: u32) -> Self {
        if duration_secs < SHORT_MAX_SECS {
            DurationBucket::Short
        } else if duration_secs < MEDIUM_MAX_SECS {
            DurationBucket::Medium
        } else {
            DurationBucket::Long
        }
    }
}

/// A viewer's derived taste profile.
///
/// Ephemeral: recomputed per recommendation request, never stored. Axes
/// with no signal are `None`, never empty lists, so downstream scoring
/// can skip them cheaply.
#[derive(Debug, Clone, Default)]
pub struct UserPreferenceProfile {
    /// Favored genres, descending weight
    pub genres: Option<Vec<String>>,
    /// Favored categories, descending weight
    pub categories: Option<Vec<CategoryId>>,
    /// Favored content types, descending weight
    pub content_types: Option<Vec<ContentType>>,
    /// Top tags, descending weight, truncated
    pub tags: Option<Vec<String>>,
    /// Duration bucket with the most accumulated watch weight
    pub preferred_duration: Option<DurationBucket>,
    /// Whether the viewer leans premium; `None` without signal
    pub premium_affinity: Option<bool>,
    /// Pass-through of the explicit ratings; `None` when empty
    pub ratings: Option<RatingMap>,
}

impl UserPreferenceProfile {
    /// Profile with no personalization signal on any axis
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Weighted tally that ranks keys by accumulated weight.
///
/// Keeps a side list of first-seen keys: HashMap iteration order is not
/// stable, and ranked ties must come out in scan order every time.
struct WeightTally<K> {
    order: Vec<K>,
    weights: HashMap<K, f32>,
}

impl<K: Eq + Hash + Clone> WeightTally<K> {
    fn new() -> Self {
        Self {
            order: Vec::new(),
            weights: HashMap::new(),
        }
    }

    fn add(&mut self, key: K, weight: f32) {
        if !self.weights.contains_key(&key) {
            self.order.push(key.clone());
        }
        *self.weights.entry(key).or_insert(0.0) += weight;
    }

    /// Keys by descending weight; ties keep first-seen order
    fn ranked(self) -> Vec<K> {
        let mut keys = self.order;
        keys.sort_by(|a, b| self.weights[b].total_cmp(&self.weights[a]));
        keys
    }

    fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Derives a `UserPreferenceProfile` from one viewer's inputs
#[derive(Debug, Clone, Copy)]
pub struct PreferenceExtractor {
    weights: ScoringWeights,
}

impl PreferenceExtractor {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Watch weight of a single history entry
    fn entry_weight(&self, entry: &WatchHistoryEntry) -> f32 {
        if entry.completed {
            self.weights.completion_bonus
        } else {
            (entry.watch_time_pct / 100.0).clamp(0.0, 1.0)
        }
    }

    /// Build the taste profile for one viewer.
    ///
    /// History entries whose content id is not in the catalog are
    /// silently skipped.
    pub fn extract(
        &self,
        history: &[WatchHistoryEntry],
        catalog: &Catalog,
        ratings: &RatingMap,
    ) -> UserPreferenceProfile {
        if history.is_empty() {
            return UserPreferenceProfile::empty();
        }

        let mut genres: WeightTally<String> = WeightTally::new();
        let mut categories: WeightTally<CategoryId> = WeightTally::new();
        let mut content_types: WeightTally<ContentType> = WeightTally::new();
        let mut tags: WeightTally<String> = WeightTally::new();
        // short / medium / long
        let mut bucket_weights = [0.0f32; 3];
        let mut premium_weight = 0.0f32;
        let mut free_weight = 0.0f32;
        let mut matched = 0usize;

        for entry in history {
            let Some(item) = catalog.get(entry.content_id) else {
                continue;
            };
            matched += 1;
            let weight = self.entry_weight(entry);

            if let Some(genre) = &item.genre {
                genres.add(genre.clone(), weight);
            }
            categories.add(item.category_id, weight);
            if let Some(content_type) = item.content_type {
                content_types.add(content_type, weight);
            }
            if let Some(item_tags) = &item.tags {
                if !item_tags.is_empty() {
                    // Split across tags so multi-tag items don't dominate
                    let per_tag = weight / item_tags.len() as f32;
                    for tag in item_tags {
                        tags.add(tag.clone(), per_tag);
                    }
                }
            }
            if let Some(duration) = item.duration_secs {
                let idx = match DurationBucket::classify(duration) {
                    DurationBucket::Short => 0,
                    DurationBucket::Medium => 1,
                    DurationBucket::Long => 2,
                };
                bucket_weights[idx] += weight;
            }
            if item.premium {
                premium_weight += weight;
            } else {
                free_weight += weight;
            }
        }

        debug!(
            matched,
            skipped = history.len() - matched,
            "extracted preference profile"
        );

        if matched == 0 {
            return UserPreferenceProfile::empty();
        }

        let mut ranked_tags = tags.ranked();
        ranked_tags.truncate(self.weights.top_tag_count);

        UserPreferenceProfile {
            genres: non_empty(genres),
            categories: non_empty(categories),
            content_types: non_empty(content_types),
            tags: if ranked_tags.is_empty() {
                None
            } else {
                Some(ranked_tags)
            },
            preferred_duration: preferred_bucket(&bucket_weights),
            premium_affinity: if premium_weight == 0.0 && free_weight == 0.0 {
                None
            } else {
                Some(premium_weight > free_weight)
            },
            ratings: if ratings.is_empty() {
                None
            } else {
                Some(ratings.clone())
            },
        }
    }
}

fn non_empty<K: Eq + Hash + Clone>(tally: WeightTally<K>) -> Option<Vec<K>> {
    if tally.is_empty() {
        None
    } else {
        Some(tally.ranked())
    }
}

/// Bucket with the highest accumulated weight; ties resolve in the order
/// short, medium, long. `None` when no watched item carried a runtime.
fn preferred_bucket(bucket_weights: &[f32; 3]) -> Option<DurationBucket> {
    if bucket_weights.iter().all(|&w| w == 0.0) {
        return None;
    }
    let buckets = [
        DurationBucket::Short,
        DurationBucket::Medium,
        DurationBucket::Long,
    ];
    let mut best = 0;
    for idx in 1..3 {
        if bucket_weights[idx] > bucket_weights[best] {
            best = idx;
        }
    }
    Some(buckets[best])
}
