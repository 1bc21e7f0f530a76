use std::collections::{HashMap, HashSet};

/// Sparse word-frequency vector. Absent key means count 0.
pub type FrequencyVector = HashMap<String, usize>;

/// Distinct tokens of a document.
pub type TokenSet = HashSet<String>;

/// Counts occurrences of each distinct token.
pub fn vectorize(tokens: &[String]) -> FrequencyVector {
    let mut vector = FrequencyVector::with_capacity(tokens.len());
    for token in tokens {
        *vector.entry(token.clone()).or_insert(0) += 1;
    }
    vector
}

/// Collapses duplicates.
pub fn token_set(tokens: &[String]) -> TokenSet {
    tokens.iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_counts_repeated_tokens() {
        let vector = vectorize(&owned(&["law", "firm", "law", "law"]));
        assert_eq!(vector.len(), 2);
        assert_eq!(vector["law"], 3);
        assert_eq!(vector["firm"], 1);
        assert!(!vector.contains_key("missing"));
    }

    #[test]
    fn test_empty_tokens_give_empty_vector() {
        assert!(vectorize(&[]).is_empty());
        assert!(token_set(&[]).is_empty());
    }

    #[test]
    fn test_token_set_collapses_duplicates() {
        let set = token_set(&owned(&["a", "b", "a"]));
        assert_eq!(set.len(), 2);
        assert!(set.contains("a") && set.contains("b"));
    }
}
