//! Postgres persistence for job descriptions and CVs.

use anyhow::Result;
use sqlx::postgres::PgExecutor;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::documents::cv_parser::CvProfile;
use crate::errors::AppError;
use crate::models::documents::{CvRow, JobDescriptionRow};

/// Inserts a job description. A duplicate filename is a validation error.
/// Runs on a pool or inside an open transaction.
pub async fn store_job_description<'e, E>(
    executor: E,
    filename: &str,
    text: &str,
) -> Result<JobDescriptionRow, AppError>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, JobDescriptionRow>(
        r#"
        INSERT INTO job_descriptions (id, filename, text)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(filename)
    .bind(text)
    .fetch_one(executor)
    .await
    .map_err(|e| map_insert_error(e, filename))?;

    info!("Stored job description '{}' with id {}", row.filename, row.id);
    Ok(row)
}

/// Inserts a CV together with its parsed keyword profile.
pub async fn store_cv(
    pool: &PgPool,
    filename: &str,
    text: &str,
    profile: &CvProfile,
) -> Result<CvRow, AppError> {
    let row = sqlx::query_as::<_, CvRow>(
        r#"
        INSERT INTO cvs (id, filename, text, qualifications, skills, experience)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(filename)
    .bind(text)
    .bind(profile.qualifications.as_slice())
    .bind(profile.skills.as_slice())
    .bind(profile.experience.as_slice())
    .fetch_one(pool)
    .await
    .map_err(|e| map_insert_error(e, filename))?;

    info!("Stored CV '{}' with id {}", row.filename, row.id);
    Ok(row)
}

pub async fn get_job_description(pool: &PgPool, id: Uuid) -> Result<Option<JobDescriptionRow>> {
    Ok(
        sqlx::query_as::<_, JobDescriptionRow>("SELECT * FROM job_descriptions WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn get_cv(pool: &PgPool, id: Uuid) -> Result<Option<CvRow>> {
    Ok(sqlx::query_as::<_, CvRow>("SELECT * FROM cvs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?)
}

pub async fn list_job_descriptions(pool: &PgPool) -> Result<Vec<JobDescriptionRow>> {
    let rows = sqlx::query_as::<_, JobDescriptionRow>(
        "SELECT * FROM job_descriptions ORDER BY created_at, id",
    )
    .fetch_all(pool)
    .await?;
    tracing::debug!("Retrieved {} job descriptions from database", rows.len());
    Ok(rows)
}

pub async fn list_cvs(pool: &PgPool) -> Result<Vec<CvRow>> {
    let rows = sqlx::query_as::<_, CvRow>("SELECT * FROM cvs ORDER BY created_at, id")
        .fetch_all(pool)
        .await?;
    tracing::debug!("Retrieved {} CVs from database", rows.len());
    Ok(rows)
}

fn map_insert_error(e: sqlx::Error, filename: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Validation(format!("A document named '{filename}' already exists"))
        }
        _ => AppError::Database(e),
    }
}
