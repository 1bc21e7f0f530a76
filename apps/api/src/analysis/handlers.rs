use axum::{extract::State, Json};
use serde::Deserialize;

use crate::analysis::TextAnalysis;
use crate::documents::handlers::ensure_within_limit;
use crate::documents::store::list_job_descriptions;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub texts: Vec<String>,
}

/// POST /api/v1/analysis
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<TextAnalysis>, AppError> {
    for text in &request.texts {
        ensure_within_limit(text, state.config.max_text_chars)?;
    }
    Ok(Json(state.analyzer.analyze(&request.texts)))
}

/// GET /api/v1/analysis/jobs
///
/// Analyzes every stored job description.
pub async fn handle_analyze_jobs(
    State(state): State<AppState>,
) -> Result<Json<TextAnalysis>, AppError> {
    let jobs = list_job_descriptions(&state.db).await?;
    let texts: Vec<&str> = jobs.iter().map(|j| j.text.as_str()).collect();
    Ok(Json(state.analyzer.analyze(&texts)))
}
