//! Scoring weight configuration.
//!
//! All weights live in one immutable record that is handed to the engine
//! at construction time. Tests and experiments vary weights by building a
//! different record, never by reaching into engine internals.

/// Weight table for similarity, preference, and collaborative scoring.
///
/// `Default` carries the production values. Individual knobs can be
/// adjusted with the `with_*` builders:
///
/// ```ignore
/// let weights = ScoringWeights::default()
///     .with_genre(4.0)
///     .with_recency(0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Exact genre match, and genre-in-favored-list preference match
    pub genre: f32,
    /// Exact category match, and category preference match
    pub category: f32,
    /// Exact content-type match, and content-type preference match
    pub content_type: f32,
    /// Multiplier on tag Jaccard overlap and on matching-tag fraction
    pub tag: f32,
    /// Full award for near-identical runtimes in pairwise similarity
    pub duration: f32,
    /// Multiplier on normalized (0-1) popularity
    pub popularity: f32,
    /// Candidate premium flag matches the viewer's premium affinity
    pub premium: f32,
    /// Candidate runtime falls in the viewer's preferred duration bucket
    pub duration_pref: f32,
    /// Weight of a completed viewing, both in preference extraction and
    /// as the collaborative completion multiplier
    pub completion_bonus: f32,
    /// Dampening applied to partial (uncompleted) watches in the
    /// collaborative term
    pub partial_watch_factor: f32,
    /// Amplitude of the recency boost on collaborative contributions
    pub recency: f32,
    /// Exponential decay rate per day for the recency boost
    pub recency_decay: f32,
    /// How many tags survive into the preference profile
    pub top_tag_count: usize,
    /// Minimum explicit rating that feeds the rating-based term
    pub high_rating_threshold: u8,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            genre: 3.0,
            category: 2.5,
            content_type: 1.5,
            tag: 2.0,
            duration: 0.5,
            popularity: 1.0,
            premium: 0.8,
            duration_pref: 0.5,
            completion_bonus: 2.0,
            partial_watch_factor: 0.8,
            recency: 1.5,
            recency_decay: 0.1,
            top_tag_count: 10,
            high_rating_threshold: 4,
        }
    }
}

impl ScoringWeights {
    /// Configure the genre weight (default: 3.0)
    pub fn with_genre(mut self, weight: f32) -> Self {
        self.genre = weight;
        self
    }

    /// Configure the category weight (default: 2.5)
    pub fn with_category(mut self, weight: f32) -> Self {
        self.category = weight;
        self
    }

    /// Configure the content-type weight (default: 1.5)
    pub fn with_content_type(mut self, weight: f32) -> Self {
        self.content_type = weight;
        self
    }

    /// Configure the tag weight (default: 2.0)
    pub fn with_tag(mut self, weight: f32) -> Self {
        self.tag = weight;
        self
    }

    /// Configure the popularity weight (default: 1.0)
    pub fn with_popularity(mut self, weight: f32) -> Self {
        self.popularity = weight;
        self
    }

    /// Configure the recency boost amplitude (default: 1.5)
    pub fn with_recency(mut self, weight: f32) -> Self {
        self.recency = weight;
        self
    }

    /// Configure the completion bonus (default: 2.0)
    pub fn with_completion_bonus(mut self, weight: f32) -> Self {
        self.completion_bonus = weight;
        self
    }

    /// Configure the rating threshold for the rating-based term (default: 4)
    pub fn with_high_rating_threshold(mut self, threshold: u8) -> Self {
        self.high_rating_threshold = threshold;
        self
    }
}
