use tracing::{debug, warn};

use super::vectorizer::TokenSet;

/// Jaccard index `|A ∩ B| / |A ∪ B|`.
///
/// Returns 0.0 when either set is empty, including when both are: no data
/// is treated as no similarity.
pub fn jaccard_index(set1: &TokenSet, set2: &TokenSet) -> f64 {
    if set1.is_empty() || set2.is_empty() {
        warn!("One or both sets are empty; returning 0 similarity");
        return 0.0;
    }

    let intersection = set1.intersection(set2).count();
    let union = set1.union(set2).count();

    let index = intersection as f64 / union as f64;
    debug!("Jaccard index: {index}, intersection: {intersection}, union: {union}");
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set_of(words: &[&str]) -> TokenSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_empty_sets_score_zero() {
        assert_eq!(jaccard_index(&TokenSet::new(), &TokenSet::new()), 0.0);
        assert_eq!(jaccard_index(&set_of(&["law"]), &TokenSet::new()), 0.0);
    }

    #[test]
    fn test_identical_sets_score_one() {
        let s = set_of(&["identical", "text", "sample"]);
        assert_eq!(jaccard_index(&s, &s), 1.0);
    }

    #[test]
    fn test_half_overlap() {
        let s1 = set_of(&["contract", "negotiation", "and", "litigation", "experience"]);
        let s2 = set_of(&["experience", "in", "contract", "negotiation"]);
        assert_eq!(jaccard_index(&s1, &s2), 0.5);
    }

    #[test]
    fn test_disjoint_sets_score_zero() {
        assert_eq!(
            jaccard_index(&set_of(&["alpha", "beta"]), &set_of(&["gamma", "delta"])),
            0.0
        );
    }

    proptest! {
        #[test]
        fn prop_jaccard_bounded_and_symmetric(
            s1 in prop::collection::hash_set("[a-f]", 0..6),
            s2 in prop::collection::hash_set("[a-f]", 0..6),
        ) {
            let ab = jaccard_index(&s1, &s2);
            prop_assert!((0.0..=1.0).contains(&ab));
            prop_assert_eq!(ab, jaccard_index(&s2, &s1));
        }
    }
}
