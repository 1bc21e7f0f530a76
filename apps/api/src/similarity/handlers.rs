//! Axum route handlers for the Similarity API.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::documents::handlers::ensure_within_limit;
use crate::documents::store::{get_cv, get_job_description};
use crate::errors::AppError;
use crate::similarity::{SimilarityEngine, SimilarityResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SimilarityByIdRequest {
    pub job_id: Uuid,
    pub cv_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SimilarityTextRequest {
    pub job_text: String,
    pub cv_text: String,
}

/// Runs the engine on the blocking pool; edit distance is O(n · m).
async fn score(
    engine: Arc<SimilarityEngine>,
    job_text: String,
    cv_text: String,
) -> Result<SimilarityResult, AppError> {
    tokio::task::spawn_blocking(move || engine.calculate_similarities(&job_text, &cv_text))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("similarity task failed: {e}")))
}

/// POST /api/v1/similarity
///
/// Loads a stored job description and CV and scores them against each other.
pub async fn handle_similarity(
    State(state): State<AppState>,
    Json(request): Json<SimilarityByIdRequest>,
) -> Result<Json<SimilarityResult>, AppError> {
    let job = get_job_description(&state.db, request.job_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Job description {} not found", request.job_id))
        })?;
    let cv = get_cv(&state.db, request.cv_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("CV {} not found", request.cv_id)))?;

    let result = score(state.engine.clone(), job.text, cv.text).await?;
    if !result.levenshtein_available() {
        warn!(
            "Levenshtein distance unavailable for job {} vs CV {}",
            job.id, cv.id
        );
    }
    Ok(Json(result))
}

/// POST /api/v1/similarity/text
///
/// Scores two raw texts directly. Empty texts are allowed.
pub async fn handle_similarity_text(
    State(state): State<AppState>,
    Json(request): Json<SimilarityTextRequest>,
) -> Result<Json<SimilarityResult>, AppError> {
    ensure_within_limit(&request.job_text, state.config.max_text_chars)?;
    ensure_within_limit(&request.cv_text, state.config.max_text_chars)?;

    let result = score(state.engine.clone(), request.job_text, request.cv_text).await?;
    Ok(Json(result))
}
