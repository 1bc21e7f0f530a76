pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::documents::handlers as documents;
use crate::similarity::handlers as similarity;
use crate::state::AppState;

/// Multipart uploads may carry up to `MAX_FILES` PDFs.
const UPLOAD_BODY_LIMIT: usize = 64 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Documents API
        .route(
            "/api/v1/jobs",
            get(documents::handle_list_jobs).post(documents::handle_store_job),
        )
        .route(
            "/api/v1/jobs/upload",
            post(documents::handle_upload_jobs).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/v1/jobs/:id", get(documents::handle_get_job))
        .route(
            "/api/v1/cvs",
            get(documents::handle_list_cvs).post(documents::handle_store_cv),
        )
        .route(
            "/api/v1/cvs/upload",
            post(documents::handle_upload_cv).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/v1/cvs/:id", get(documents::handle_get_cv))
        // Similarity API
        .route("/api/v1/similarity", post(similarity::handle_similarity))
        .route(
            "/api/v1/similarity/text",
            post(similarity::handle_similarity_text),
        )
        // Analysis API
        .route("/api/v1/analysis", post(analysis::handle_analyze))
        .route("/api/v1/analysis/jobs", get(analysis::handle_analyze_jobs))
        .with_state(state)
}
