//! Similarity engine: turns a job description and a CV into three independent
//! similarity signals (cosine over word frequencies, Levenshtein over raw
//! characters, Jaccard over token sets).
//!
//! Pure and synchronous. No I/O and no shared mutable state; handlers run it
//! on the blocking pool.

pub mod cosine;
pub mod engine;
pub mod handlers;
pub mod jaccard;
pub mod levenshtein;
pub mod tokenizer;
pub mod vectorizer;

use thiserror::Error;

pub use engine::{SimilarityEngine, SimilarityResult};
pub use tokenizer::Tokenizer;

/// Failures inside a single scorer. The facade converts each into that
/// scorer's fallback value; they never reach API callers.
#[derive(Debug, Error)]
pub enum SimilarityError {
    #[error("{metric} score is not finite ({value})")]
    NonFiniteScore { metric: &'static str, value: f64 },

    #[error("edit distance table of {cells} cells exceeds budget of {budget}")]
    EditBudgetExceeded { cells: u64, budget: u64 },
}
