mod analysis;
mod config;
mod db;
mod documents;
mod errors;
mod models;
mod routes;
mod similarity;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::TextAnalyzer;
use crate::config::Config;
use crate::db::create_pool;
use crate::documents::extraction::FileTextExtractor;
use crate::routes::build_router;
use crate::similarity::{SimilarityEngine, Tokenizer};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Matcher API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (migrations included)
    let db = create_pool(&config.database_url).await?;

    // Initialize scoring components once; handlers share them by handle
    let engine = Arc::new(SimilarityEngine::new(
        Tokenizer::default(),
        config.max_edit_distance_cells,
    ));
    match config.max_edit_distance_cells {
        Some(cells) => info!("Similarity engine ready (edit distance budget: {cells} cells)"),
        None => info!("Similarity engine ready (edit distance unbounded)"),
    }
    if !config.edit_budget_covers_text_limit() {
        warn!(
            "MAX_EDIT_DISTANCE_CELLS is below MAX_TEXT_CHARS² ({}²); long documents will report levenshtein_distance -1",
            config.max_text_chars
        );
    }
    let analyzer = Arc::new(TextAnalyzer::new(config.analysis_top_words));

    // Build app state
    let state = AppState {
        db,
        config: config.clone(),
        engine,
        analyzer,
        extractor: Arc::new(FileTextExtractor),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the upload UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
