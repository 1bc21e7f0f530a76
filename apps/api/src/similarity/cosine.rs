//! Cosine similarity between two word-frequency vectors.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::vectorizer::FrequencyVector;
use super::SimilarityError;

/// `dot(v1, v2) / (|v1| * |v2|)` over the union vocabulary of both vectors.
///
/// Returns `Ok(0.0)` when either vector is empty or has zero magnitude.
/// Counts are non-negative, so a finite result lies in [0, 1].
pub fn cosine_similarity(
    v1: &FrequencyVector,
    v2: &FrequencyVector,
) -> Result<f64, SimilarityError> {
    if v1.is_empty() || v2.is_empty() {
        warn!("One or both vectors are empty; returning 0 similarity");
        return Ok(0.0);
    }

    let vocabulary: HashSet<&str> = v1.keys().chain(v2.keys()).map(String::as_str).collect();
    if vocabulary.is_empty() {
        warn!("No words in combined vocabulary; returning 0 similarity");
        return Ok(0.0);
    }

    let mut dot = 0.0_f64;
    let mut norm1_sq = 0.0_f64;
    let mut norm2_sq = 0.0_f64;
    for word in &vocabulary {
        let a = v1.get(*word).copied().unwrap_or(0) as f64;
        let b = v2.get(*word).copied().unwrap_or(0) as f64;
        dot += a * b;
        norm1_sq += a * a;
        norm2_sq += b * b;
    }

    debug!(
        "Dot product: {dot}, Norm1: {}, Norm2: {}, vocabulary: {}",
        norm1_sq.sqrt(),
        norm2_sq.sqrt(),
        vocabulary.len()
    );

    if norm1_sq == 0.0 || norm2_sq == 0.0 {
        warn!("One or both vectors have zero magnitude; returning 0 similarity");
        return Ok(0.0);
    }

    // sqrt(|v1|² · |v2|²) rather than |v1| · |v2|: one rounding step keeps
    // cos(v, v) at exactly 1.0.
    let similarity = dot / (norm1_sq * norm2_sq).sqrt();
    if !similarity.is_finite() {
        return Err(SimilarityError::NonFiniteScore {
            metric: "cosine",
            value: similarity,
        });
    }

    debug!("Cosine similarity calculated: {similarity}");
    Ok(similarity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::vectorizer::vectorize;
    use proptest::prelude::*;

    fn vec_of(words: &[&str]) -> FrequencyVector {
        let tokens: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        vectorize(&tokens)
    }

    #[test]
    fn test_empty_vectors_score_zero() {
        let empty = FrequencyVector::new();
        assert_eq!(cosine_similarity(&empty, &empty).unwrap(), 0.0);
        assert_eq!(
            cosine_similarity(&empty, &vec_of(&["law"])).unwrap(),
            0.0
        );
        assert_eq!(
            cosine_similarity(&vec_of(&["law"]), &empty).unwrap(),
            0.0
        );
    }

    #[test]
    fn test_zero_counts_are_zero_magnitude() {
        let mut zeros = FrequencyVector::new();
        zeros.insert("law".to_string(), 0);
        assert_eq!(cosine_similarity(&zeros, &vec_of(&["law"])).unwrap(), 0.0);
    }

    #[test]
    fn test_identical_vectors_score_exactly_one() {
        let v = vec_of(&["identical", "text", "sample"]);
        assert_eq!(cosine_similarity(&v, &v).unwrap(), 1.0);
    }

    #[test]
    fn test_disjoint_vectors_score_zero() {
        let score = cosine_similarity(&vec_of(&["alpha", "beta"]), &vec_of(&["gamma"])).unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        // dot = 3, |v1| = sqrt(5), |v2| = 2
        let v1 = vec_of(&["contract", "negotiation", "and", "litigation", "experience"]);
        let v2 = vec_of(&["experience", "in", "contract", "negotiation"]);
        let score = cosine_similarity(&v1, &v2).unwrap();
        assert!((score - 3.0 / 20.0_f64.sqrt()).abs() < 1e-12, "Score was {score}");
    }

    #[test]
    fn test_magnitude_does_not_matter() {
        let v1 = vec_of(&["rust", "law"]);
        let v2 = vec_of(&["rust", "rust", "law", "law"]);
        assert_eq!(cosine_similarity(&v1, &v2).unwrap(), 1.0);
    }

    fn arb_vector() -> impl Strategy<Value = FrequencyVector> {
        prop::collection::hash_map("[a-e]{1,2}", 0usize..50, 0..8)
    }

    proptest! {
        #[test]
        fn prop_cosine_bounded(v1 in arb_vector(), v2 in arb_vector()) {
            let score = cosine_similarity(&v1, &v2).unwrap();
            prop_assert!((0.0..=1.0).contains(&score), "score {}", score);
        }

        #[test]
        fn prop_cosine_symmetric(v1 in arb_vector(), v2 in arb_vector()) {
            let ab = cosine_similarity(&v1, &v2).unwrap();
            let ba = cosine_similarity(&v2, &v1).unwrap();
            prop_assert!((ab - ba).abs() < 1e-12);
        }

        #[test]
        fn prop_cosine_self_is_one(v in arb_vector()) {
            prop_assume!(v.values().any(|&c| c > 0));
            prop_assert_eq!(cosine_similarity(&v, &v).unwrap(), 1.0);
        }
    }
}
