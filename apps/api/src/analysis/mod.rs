//! Corpus analysis — word statistics and most frequent terms across a set of
//! documents (typically every stored job description).

pub mod handlers;
pub mod stopwords;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::similarity::tokenizer::{TokenFilter, Tokenizer};
use stopwords::is_stop_word;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub total_documents: usize,
    pub total_words: usize,
    pub unique_words: usize,
    pub average_words_per_document: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub top_words: Vec<WordCount>,
    pub stats: CorpusStats,
}

/// Built once at startup. Word statistics count every alphanumeric token;
/// top words keep alphabetic, non-stop-word tokens only.
#[derive(Debug, Clone)]
pub struct TextAnalyzer {
    words: Tokenizer,
    terms: Tokenizer,
    top_n: usize,
}

impl TextAnalyzer {
    pub fn new(top_n: usize) -> Self {
        Self {
            words: Tokenizer::new(TokenFilter::Alphanumeric),
            terms: Tokenizer::alphabetic(),
            top_n,
        }
    }

    pub fn analyze<S: AsRef<str>>(&self, texts: &[S]) -> TextAnalysis {
        let mut total_words = 0;
        let mut unique: HashSet<String> = HashSet::new();
        let mut term_freq: HashMap<String, usize> = HashMap::new();

        for text in texts {
            let text = text.as_ref();

            let words = self.words.tokenize(text);
            total_words += words.len();
            unique.extend(words);

            for term in self.terms.tokenize(text) {
                if !is_stop_word(&term) {
                    *term_freq.entry(term).or_insert(0) += 1;
                }
            }
        }

        let mut top_words: Vec<WordCount> = term_freq
            .into_iter()
            .map(|(word, count)| WordCount { word, count })
            .collect();
        top_words.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
        top_words.truncate(self.top_n);

        let total_documents = texts.len();
        let average_words_per_document = if total_documents > 0 {
            total_words as f64 / total_documents as f64
        } else {
            0.0
        };

        let stats = CorpusStats {
            total_documents,
            total_words,
            unique_words: unique.len(),
            average_words_per_document,
        };
        info!(
            "Text analysis completed: {} documents, {} words, {} unique",
            stats.total_documents, stats.total_words, stats.unique_words
        );

        TextAnalysis { top_words, stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wc(word: &str, count: usize) -> WordCount {
        WordCount {
            word: word.to_string(),
            count,
        }
    }

    #[test]
    fn test_top_words_skip_stop_words_and_numbers() {
        let analysis = TextAnalyzer::new(3).analyze(&[
            "The firm seeks a litigation associate with 5 years of litigation experience.",
            "Litigation and contract drafting at a top firm.",
        ]);
        assert_eq!(
            analysis.top_words,
            vec![wc("litigation", 3), wc("firm", 2), wc("associate", 1)]
        );
    }

    #[test]
    fn test_stats_count_all_tokens() {
        let analysis = TextAnalyzer::new(20).analyze(&["the law the", "5 law"]);
        assert_eq!(
            analysis.stats,
            CorpusStats {
                total_documents: 2,
                total_words: 5,
                unique_words: 3,
                average_words_per_document: 2.5,
            }
        );
        assert_eq!(analysis.top_words, vec![wc("law", 2)]);
    }

    #[test]
    fn test_empty_corpus() {
        let analysis = TextAnalyzer::new(20).analyze::<&str>(&[]);
        assert!(analysis.top_words.is_empty());
        assert_eq!(analysis.stats.total_documents, 0);
        assert_eq!(analysis.stats.average_words_per_document, 0.0);
    }

    #[test]
    fn test_ties_break_alphabetically() {
        let analysis = TextAnalyzer::new(2).analyze(&["zeta alpha beta"]);
        assert_eq!(analysis.top_words, vec![wc("alpha", 1), wc("beta", 1)]);
    }
}
