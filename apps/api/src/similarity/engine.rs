//! Similarity facade — runs all three scorers over a (job, CV) text pair.
//!
//! Cosine and Jaccard see tokenized, lowercased text; Levenshtein sees the raw
//! strings untouched. Each metric is computed independently and a failure in
//! one never affects the others.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::cosine::cosine_similarity;
use super::jaccard::jaccard_index;
use super::levenshtein::bounded_levenshtein;
use super::tokenizer::Tokenizer;
use super::vectorizer::{token_set, vectorize};

/// Fallback for cosine and Jaccard.
pub const NO_SIMILARITY: f64 = 0.0;
/// Levenshtein sentinel: the distance could not be computed.
pub const LEVENSHTEIN_UNAVAILABLE: f64 = -1.0;

/// The three similarity signals for one (job, CV) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub cosine_similarity: f64,
    /// Non-negative edit count, or [`LEVENSHTEIN_UNAVAILABLE`].
    pub levenshtein_distance: f64,
    pub jaccard_index: f64,
}

impl SimilarityResult {
    pub fn levenshtein_available(&self) -> bool {
        self.levenshtein_distance >= 0.0
    }
}

/// Holds the tokenizer and the edit-distance budget. Constructed once at
/// startup and shared behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct SimilarityEngine {
    tokenizer: Tokenizer,
    edit_cell_budget: Option<u64>,
}

impl SimilarityEngine {
    pub fn new(tokenizer: Tokenizer, edit_cell_budget: Option<u64>) -> Self {
        Self {
            tokenizer,
            edit_cell_budget,
        }
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Scores `cv_text` against `job_text`. Always returns a complete result.
    pub fn calculate_similarities(&self, job_text: &str, cv_text: &str) -> SimilarityResult {
        debug!(
            "Scoring job text ({} chars) against CV text ({} chars)",
            job_text.len(),
            cv_text.len()
        );

        let job_words = self.tokenizer.tokenize(job_text);
        let cv_words = self.tokenizer.tokenize(cv_text);

        let job_vector = vectorize(&job_words);
        let cv_vector = vectorize(&cv_words);
        let job_set = token_set(&job_words);
        let cv_set = token_set(&cv_words);

        debug!("Job vector: {job_vector:?}");
        debug!("CV vector: {cv_vector:?}");

        let cosine = cosine_similarity(&job_vector, &cv_vector).unwrap_or_else(|e| {
            warn!("Cosine similarity unavailable: {e}");
            NO_SIMILARITY
        });

        let levenshtein = match bounded_levenshtein(job_text, cv_text, self.edit_cell_budget) {
            Ok(distance) => distance as f64,
            Err(e) => {
                warn!("Levenshtein distance unavailable: {e}");
                LEVENSHTEIN_UNAVAILABLE
            }
        };

        let jaccard = jaccard_index(&job_set, &cv_set);

        let result = SimilarityResult {
            cosine_similarity: cosine,
            levenshtein_distance: levenshtein,
            jaccard_index: jaccard,
        };
        info!(
            cosine = result.cosine_similarity,
            levenshtein = result.levenshtein_distance,
            jaccard = result.jaccard_index,
            "Similarity results"
        );
        result
    }
}
