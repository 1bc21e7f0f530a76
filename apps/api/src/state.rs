use std::sync::Arc;

use sqlx::PgPool;

use crate::analysis::TextAnalyzer;
use crate::config::Config;
use crate::documents::extraction::TextExtractor;
use crate::similarity::SimilarityEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Similarity engine and the tokenizer it owns; built once in `main`.
    pub engine: Arc<SimilarityEngine>,
    pub analyzer: Arc<TextAnalyzer>,
    /// Pluggable text extractor. Default: FileTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
}
