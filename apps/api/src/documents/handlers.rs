//! Axum route handlers for the Documents API (job descriptions and CVs).

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::documents::cv_parser::{parse_cv_text, CvProfile};
use crate::documents::extraction::DocumentKind;
use crate::documents::store;
use crate::errors::AppError;
use crate::models::documents::{CvRow, JobDescriptionRow};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StoreDocumentRequest {
    pub filename: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractedText {
    pub id: Uuid,
    pub filename: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct UploadJobsResponse {
    pub extracted_texts: Vec<ExtractedText>,
}

#[derive(Debug, Serialize)]
pub struct CvResponse {
    pub id: Uuid,
    pub filename: String,
    #[serde(flatten)]
    pub profile: CvProfile,
}

impl From<&CvRow> for CvResponse {
    fn from(row: &CvRow) -> Self {
        Self {
            id: row.id,
            filename: row.filename.clone(),
            profile: CvProfile {
                qualifications: row.qualifications.clone(),
                skills: row.skills.clone(),
                experience: row.experience.clone(),
            },
        }
    }
}

/// A named file pulled out of a multipart body.
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Bytes,
}

/// Per-request upload limits, taken from `Config`.
#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    pub max_files: usize,
    pub pdf: usize,
    pub docx: usize,
    pub txt: usize,
}

impl From<&Config> for UploadLimits {
    fn from(config: &Config) -> Self {
        Self {
            max_files: config.max_files,
            pdf: config.allowed_pdf_count,
            docx: config.allowed_docx_count,
            txt: config.allowed_txt_count,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Validation helpers
// ────────────────────────────────────────────────────────────────────────────

/// Rejects empty text and text longer than `max_chars` characters.
pub fn validate_document_text(text: &str, max_chars: usize) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }
    ensure_within_limit(text, max_chars)
}

/// Length bound only; empty text passes.
pub fn ensure_within_limit(text: &str, max_chars: usize) -> Result<(), AppError> {
    let len = text.chars().count();
    if len > max_chars {
        return Err(AppError::PayloadTooLarge(format!(
            "text has {len} characters; the limit is {max_chars}"
        )));
    }
    Ok(())
}

fn validate_filename(filename: &str) -> Result<(), AppError> {
    if filename.trim().is_empty() {
        return Err(AppError::Validation("filename cannot be empty".to_string()));
    }
    if filename.chars().count() > 255 {
        return Err(AppError::Validation(
            "filename must be at most 255 characters".to_string(),
        ));
    }
    Ok(())
}

/// Checks the file count, extensions and per-type limits of a job upload and
/// returns each file's kind in order.
pub fn classify_uploads(
    filenames: &[&str],
    limits: &UploadLimits,
) -> Result<Vec<DocumentKind>, AppError> {
    if filenames.is_empty() {
        return Err(AppError::Validation("No files provided".to_string()));
    }
    if filenames.len() > limits.max_files {
        return Err(AppError::Validation(format!(
            "Too many files. Max {} files allowed.",
            limits.max_files
        )));
    }

    let mut pdf_count = 0;
    let mut docx_count = 0;
    let mut txt_count = 0;
    let mut kinds = Vec::with_capacity(filenames.len());

    for filename in filenames {
        let kind = DocumentKind::from_filename(filename).ok_or_else(|| {
            AppError::Validation(format!(
                "Unsupported file type: {filename}. Use PDF, DOCX or TXT."
            ))
        })?;

        let (count, limit, label) = match kind {
            DocumentKind::Pdf => (&mut pdf_count, limits.pdf, "PDF"),
            DocumentKind::Docx => (&mut docx_count, limits.docx, "DOCX"),
            DocumentKind::PlainText => (&mut txt_count, limits.txt, "TXT"),
        };
        *count += 1;
        if *count > limit {
            return Err(AppError::Validation(format!(
                "Exceeded limit of {limit} {label} files"
            )));
        }
        kinds.push(kind);
    }

    Ok(kinds)
}

/// Reads every named file in fields called `field_name`. Unnamed files are skipped.
async fn collect_files(
    multipart: &mut Multipart,
    field_name: &str,
) -> Result<Vec<UploadedFile>, AppError> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(field_name) {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string).filter(|n| !n.is_empty())
        else {
            continue;
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read {filename}: {e}")))?;
        files.push(UploadedFile { filename, data });
    }
    Ok(files)
}

fn with_filename(err: AppError, filename: &str) -> AppError {
    match err {
        AppError::Extraction(msg) => {
            AppError::Extraction(format!("Error processing {filename}: {msg}"))
        }
        other => other,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Job description handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs
pub async fn handle_store_job(
    State(state): State<AppState>,
    Json(request): Json<StoreDocumentRequest>,
) -> Result<Json<JobDescriptionRow>, AppError> {
    validate_filename(&request.filename)?;
    validate_document_text(&request.text, state.config.max_text_chars)?;

    let row = store::store_job_description(&state.db, &request.filename, &request.text).await?;
    Ok(Json(row))
}

/// POST /api/v1/jobs/upload
///
/// Multipart field `files`: PDF, DOCX and TXT job descriptions. Every file is
/// extracted and validated first; the rows are then written in one
/// transaction, so a failed upload stores nothing. The extracted texts are
/// returned in upload order.
pub async fn handle_upload_jobs(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadJobsResponse>, AppError> {
    let files = collect_files(&mut multipart, "files").await?;
    let kinds = {
        let names: Vec<&str> = files.iter().map(|f| f.filename.as_str()).collect();
        classify_uploads(&names, &UploadLimits::from(&state.config))?
    };

    let mut documents = Vec::with_capacity(files.len());
    for (file, kind) in files.into_iter().zip(kinds) {
        let text = state
            .extractor
            .extract(kind, file.data)
            .await
            .map_err(|e| with_filename(e, &file.filename))?;
        if text.is_empty() {
            return Err(AppError::Extraction(format!(
                "Error processing {}: no text extracted",
                file.filename
            )));
        }
        ensure_within_limit(&text, state.config.max_text_chars)?;
        documents.push((file.filename, text));
    }

    let mut tx = state.db.begin().await?;
    let mut extracted_texts = Vec::with_capacity(documents.len());
    for (filename, text) in &documents {
        let row = store::store_job_description(&mut *tx, filename, text).await?;
        extracted_texts.push(ExtractedText {
            id: row.id,
            filename: row.filename,
            text: row.text,
        });
    }
    tx.commit().await?;

    Ok(Json(UploadJobsResponse { extracted_texts }))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobDescriptionRow>>, AppError> {
    Ok(Json(store::list_job_descriptions(&state.db).await?))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobDescriptionRow>, AppError> {
    store::get_job_description(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job description {id} not found")))
}

// ────────────────────────────────────────────────────────────────────────────
// CV handlers
// ────────────────────────────────────────────────────────────────────────────

async fn parse_and_store_cv(
    state: &AppState,
    filename: &str,
    text: &str,
) -> Result<CvResponse, AppError> {
    let profile = parse_cv_text(state.engine.tokenizer(), text);
    let row = store::store_cv(&state.db, filename, text, &profile).await?;
    Ok(CvResponse::from(&row))
}

/// POST /api/v1/cvs
pub async fn handle_store_cv(
    State(state): State<AppState>,
    Json(request): Json<StoreDocumentRequest>,
) -> Result<Json<CvResponse>, AppError> {
    validate_filename(&request.filename)?;
    validate_document_text(&request.text, state.config.max_text_chars)?;

    Ok(Json(
        parse_and_store_cv(&state, &request.filename, &request.text).await?,
    ))
}

/// POST /api/v1/cvs/upload
///
/// Multipart field `file`: a single PDF, DOCX or TXT CV.
pub async fn handle_upload_cv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CvResponse>, AppError> {
    let mut files = collect_files(&mut multipart, "file").await?;
    let file = match files.len() {
        0 => return Err(AppError::Validation("No file provided".to_string())),
        1 => files.remove(0),
        _ => return Err(AppError::Validation("Upload exactly one CV file".to_string())),
    };

    let kind = DocumentKind::from_filename(&file.filename).ok_or_else(|| {
        AppError::Validation("Unsupported file type. Please upload a PDF, DOCX or TXT file.".to_string())
    })?;

    let text = state
        .extractor
        .extract(kind, file.data)
        .await
        .map_err(|e| with_filename(e, &file.filename))?;
    if text.is_empty() {
        return Err(AppError::Validation("No text extracted from CV".to_string()));
    }
    ensure_within_limit(&text, state.config.max_text_chars)?;

    Ok(Json(parse_and_store_cv(&state, &file.filename, &text).await?))
}

/// GET /api/v1/cvs
pub async fn handle_list_cvs(State(state): State<AppState>) -> Result<Json<Vec<CvRow>>, AppError> {
    Ok(Json(store::list_cvs(&state.db).await?))
}

/// GET /api/v1/cvs/:id
pub async fn handle_get_cv(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CvRow>, AppError> {
    store::get_cv(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("CV {id} not found")))
}
