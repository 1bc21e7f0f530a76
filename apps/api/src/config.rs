use std::str::FromStr;

use anyhow::{Context, Result};

const DEFAULT_MAX_TEXT_CHARS: usize = 100_000;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Max files accepted by one job upload request.
    pub max_files: usize,
    pub allowed_pdf_count: usize,
    pub allowed_docx_count: usize,
    pub allowed_txt_count: usize,
    /// Longest document text (in chars) accepted for storage or scoring.
    pub max_text_chars: usize,
    /// Levenshtein DP table budget in cells. `None` disables the check.
    /// Should be at least `max_text_chars²`, or two stored documents near the
    /// text cap report the distance as unavailable.
    pub max_edit_distance_cells: Option<u64>,
    pub analysis_top_words: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_text_chars: usize = parse_or(&lookup, "MAX_TEXT_CHARS", DEFAULT_MAX_TEXT_CHARS)?;
        let edit_cells: u64 = parse_or(
            &lookup,
            "MAX_EDIT_DISTANCE_CELLS",
            (DEFAULT_MAX_TEXT_CHARS as u64).pow(2),
        )?;

        Ok(Config {
            database_url: lookup("DATABASE_URL").with_context(|| {
                "Required environment variable 'DATABASE_URL' is not set".to_string()
            })?,
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_files: parse_or(&lookup, "MAX_FILES", 40)?,
            allowed_pdf_count: parse_or(&lookup, "ALLOWED_PDF_COUNT", 20)?,
            allowed_docx_count: parse_or(&lookup, "ALLOWED_DOCX_COUNT", 20)?,
            allowed_txt_count: parse_or(&lookup, "ALLOWED_TXT_COUNT", 20)?,
            max_text_chars,
            max_edit_distance_cells: (edit_cells > 0).then_some(edit_cells),
            analysis_top_words: parse_or(&lookup, "ANALYSIS_TOP_WORDS", 20)?,
        })
    }

    /// False when two documents at `max_text_chars` would overrun the edit
    /// distance budget.
    pub fn edit_budget_covers_text_limit(&self) -> bool {
        let longest = self.max_text_chars as u64;
        match self.max_edit_distance_cells {
            None => true,
            Some(budget) => longest.checked_mul(longest).is_some_and(|cells| cells <= budget),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
