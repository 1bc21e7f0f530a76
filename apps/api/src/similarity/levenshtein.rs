//! Levenshtein edit distance over raw character strings.
//!
//! Works on Unicode scalar values with no normalization: case, punctuation
//! and whitespace all count. Two rolling rows sized to the shorter input keep
//! memory at O(min(n, m)); time stays O(n · m).

use tracing::debug;

use super::SimilarityError;

/// Minimum number of single-character insertions, deletions or
/// substitutions turning `s1` into `s2`. Symmetric in its arguments.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();

    // The shorter string is always the inner dimension.
    let (longer, shorter) = if a.len() < b.len() { (&b, &a) } else { (&a, &b) };

    if shorter.is_empty() {
        return longer.len();
    }

    let mut previous: Vec<usize> = (0..=shorter.len()).collect();
    let mut current: Vec<usize> = vec![0; shorter.len() + 1];

    for (i, &c1) in longer.iter().enumerate() {
        current[0] = i + 1;
        for (j, &c2) in shorter.iter().enumerate() {
            let insertion = previous[j + 1] + 1;
            let deletion = current[j] + 1;
            let substitution = previous[j] + usize::from(c1 != c2);
            current[j + 1] = insertion.min(deletion).min(substitution);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    let distance = previous[shorter.len()];
    debug!("Levenshtein distance calculated: {distance}");
    distance
}

/// Same as [`levenshtein_distance`], but refuses inputs whose DP table would
/// exceed `cell_budget` cells. `None` means unbounded.
pub fn bounded_levenshtein(
    s1: &str,
    s2: &str,
    cell_budget: Option<u64>,
) -> Result<usize, SimilarityError> {
    if let Some(budget) = cell_budget {
        let cells = (s1.chars().count() as u64).saturating_mul(s2.chars().count() as u64);
        if cells > budget {
            return Err(SimilarityError::EditBudgetExceeded { cells, budget });
        }
    }
    Ok(levenshtein_distance(s1, s2))
}
