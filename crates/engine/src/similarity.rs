//! Pairwise content-to-content similarity.
//!
//! ## Algorithm
//! Additive weighted contributions, each skipped silently when the
//! attribute is absent on either side:
//! - exact genre match
//! - exact category match
//! - exact content-type match
//! - tag-set Jaccard overlap, scaled by the tag weight
//! - runtime proximity in two bands (full weight under 10 minutes apart,
//!   half weight under 20)
//!
//! Two items sharing no comparable attribute score exactly 0.0.

use crate::config::ScoringWeights;
use catalog::ContentItem;
use std::collections::HashSet;

/// Full duration-proximity award applies under this gap
const NEAR_DURATION_SECS: u32 = 600;

/// Half award applies under this gap; none beyond it
const FAR_DURATION_SECS: u32 = 1200;

/// Computes attribute-overlap similarity between two catalog entries.
///
/// Side-effect free; the combination is commutative.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityScorer {
    weights: ScoringWeights,
}

impl SimilarityScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Similarity score for a pair of entries, >= 0.0
    pub fn score(&self, a: &ContentItem, b: &ContentItem) -> f32 {
        let mut score = 0.0;

        if let (Some(genre_a), Some(genre_b)) = (&a.genre, &b.genre) {
            if genre_a == genre_b {
                score += self.weights.genre;
            }
        }

        if a.category_id == b.category_id {
            score += self.weights.category;
        }

        if let (Some(type_a), Some(type_b)) = (a.content_type, b.content_type) {
            if type_a == type_b {
                score += self.weights.content_type;
            }
        }

        score += self.tag_overlap(a, b) * self.weights.tag;
        score += self.duration_proximity(a, b);

        score
    }

    /// Jaccard similarity of the two tag sets: |intersection| / |union|.
    ///
    /// 0.0 when either side has no tags or the union is empty.
    fn tag_overlap(&self, a: &ContentItem, b: &ContentItem) -> f32 {
        let (Some(tags_a), Some(tags_b)) = (&a.tags, &b.tags) else {
            return 0.0;
        };

        let set_a: HashSet<&str> = tags_a.iter().map(String::as_str).collect();
        let set_b: HashSet<&str> = tags_b.iter().map(String::as_str).collect();

        let union = set_a.union(&set_b).count();
        if union == 0 {
            return 0.0;
        }
        let intersection = set_a.intersection(&set_b).count();

        intersection as f32 / union as f32
    }

    /// Banded runtime proximity: full duration weight when the runtimes
    /// are less than 10 minutes apart, half weight under 20 minutes,
    /// nothing beyond that or when either runtime is unknown.
    fn duration_proximity(&self, a: &ContentItem, b: &ContentItem) -> f32 {
        let (Some(dur_a), Some(dur_b)) = (a.duration_secs, b.duration_secs) else {
            return 0.0;
        };

        let diff = dur_a.abs_diff(dur_b);
        if diff < NEAR_DURATION_SECS {
            self.weights.duration
        } else if diff < FAR_DURATION_SECS {
            self.weights.duration / 2.0
        } else {
            0.0
        }
    }
}
