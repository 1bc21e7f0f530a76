//! Text extraction for uploaded documents — pluggable, trait-based.
//!
//! Default: `FileTextExtractor` (PDF via `pdf-extract`, DOCX via `zip` +
//! `quick-xml`, plain text as UTF-8).
//! `AppState` holds an `Arc<dyn TextExtractor>`, built once at startup.

use std::io::{Cursor, Read};

use async_trait::async_trait;
use bytes::Bytes;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::info;

use crate::errors::AppError;

/// Upload formats the service can turn into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    /// Classifies a file by extension (case-insensitive).
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_ascii_lowercase();
        if lower.ends_with(".pdf") {
            Some(DocumentKind::Pdf)
        } else if lower.ends_with(".docx") {
            Some(DocumentKind::Docx)
        } else if lower.ends_with(".txt") {
            Some(DocumentKind::PlainText)
        } else {
            None
        }
    }
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Returns the document's text, trimmed. Unreadable input is an
    /// `AppError::Extraction`.
    async fn extract(&self, kind: DocumentKind, data: Bytes) -> Result<String, AppError>;
}

pub struct FileTextExtractor;

#[async_trait]
impl TextExtractor for FileTextExtractor {
    async fn extract(&self, kind: DocumentKind, data: Bytes) -> Result<String, AppError> {
        let size = data.len();
        let text = match kind {
            DocumentKind::Pdf => tokio::task::spawn_blocking(move || extract_pdf(&data))
                .await
                .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))??,
            DocumentKind::Docx => tokio::task::spawn_blocking(move || extract_docx(&data))
                .await
                .map_err(|e| AppError::Internal(anyhow::anyhow!("DOCX extraction task failed: {e}")))??,
            DocumentKind::PlainText => String::from_utf8_lossy(&data).trim().to_string(),
        };
        info!("Extracted {} chars from {size}-byte {kind:?} document", text.chars().count());
        Ok(text)
    }
}

fn extract_pdf(data: &[u8]) -> Result<String, AppError> {
    let text = pdf_extract::extract_text_from_mem(data)
        .map_err(|e| AppError::Extraction(format!("could not read PDF: {e}")))?;
    Ok(normalize_whitespace(&text))
}

const DOCX_BODY_PART: &str = "word/document.xml";

fn extract_docx(data: &[u8]) -> Result<String, AppError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))
        .map_err(|e| AppError::Extraction(format!("could not open DOCX: {e}")))?;
    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY_PART)
        .map_err(|e| AppError::Extraction(format!("could not read {DOCX_BODY_PART}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| AppError::Extraction(format!("could not read {DOCX_BODY_PART}: {e}")))?;

    let paragraphs = body_paragraphs(&xml)?;
    Ok(paragraphs
        .iter()
        .filter(|p| !p.trim().is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string())
}

/// Text of each top-level body paragraph of a WordprocessingML document.
/// Paragraphs inside tables and text boxes are skipped.
fn body_paragraphs(xml: &str) -> Result<Vec<String>, AppError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut paragraph_depth = 0usize;
    let mut table_depth = 0usize;
    let mut in_text = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| AppError::Extraction(format!("malformed DOCX XML: {e}")))?;
        let collecting = paragraph_depth == 1 && table_depth == 0;
        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => {
                    paragraph_depth += 1;
                    if paragraph_depth == 1 {
                        current.clear();
                    }
                }
                b"w:tbl" => table_depth += 1,
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:p" => {
                    if collecting {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                }
                b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                b"w:t" => in_text = false,
                _ => {}
            },
            Event::Empty(e) if collecting => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                _ => {}
            },
            Event::Text(t) if collecting && in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| AppError::Extraction(format!("malformed DOCX XML: {e}")))?;
                current.push_str(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Collapses the page breaks and layout runs PDF extraction leaves behind.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_filename() {
        assert_eq!(DocumentKind::from_filename("jd.pdf"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_filename("JD.PDF"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_filename("notes.txt"), Some(DocumentKind::PlainText));
        assert_eq!(DocumentKind::from_filename("cv.docx"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_filename("CV.DOCX"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_filename("cv.doc"), None);
        assert_eq!(DocumentKind::from_filename("cv.png"), None);
        assert_eq!(DocumentKind::from_filename("pdf"), None);
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a\n\nb \x0c c  "), "a b c");
    }

    #[tokio::test]
    async fn test_plain_text_is_trimmed() {
        let text = FileTextExtractor
            .extract(DocumentKind::PlainText, Bytes::from_static(b"  Contract law\n"))
            .await
            .unwrap();
        assert_eq!(text, "Contract law");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_replaced_not_rejected() {
        let text = FileTextExtractor
            .extract(DocumentKind::PlainText, Bytes::from_static(b"law \xff firm"))
            .await
            .unwrap();
        assert_eq!(text, "law \u{FFFD} firm");
    }

    #[tokio::test]
    async fn test_garbage_pdf_is_extraction_error() {
        let err = FileTextExtractor
            .extract(DocumentKind::Pdf, Bytes::from_static(b"definitely not a pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    fn docx_with_body(body: &str) -> Bytes {
        use std::io::Write;

        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(DOCX_BODY_PART, zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        Bytes::from(writer.finish().unwrap().into_inner())
    }

    #[tokio::test]
    async fn test_docx_paragraphs_joined_with_space() {
        let data = docx_with_body(concat!(
            "<w:p><w:r><w:t>Senior </w:t></w:r><w:r><w:t>Legal Counsel</w:t></w:r></w:p>",
            "<w:p/>",
            "<w:p><w:r><w:t xml:space=\"preserve\">   </w:t></w:r></w:p>",
            "<w:p><w:r><w:t>Contract &amp; compliance</w:t></w:r></w:p>",
        ));
        let text = FileTextExtractor
            .extract(DocumentKind::Docx, data)
            .await
            .unwrap();
        assert_eq!(text, "Senior Legal Counsel Contract & compliance");
    }

    #[test]
    fn test_docx_table_cells_are_not_body_paragraphs() {
        let paragraphs = body_paragraphs(concat!(
            "<w:document xmlns:w=\"w\"><w:body>",
            "<w:p><w:r><w:t>Intro</w:t><w:tab/><w:t>text</w:t></w:r></w:p>",
            "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>",
            "<w:p><w:r><w:t>Outro</w:t></w:r></w:p>",
            "</w:body></w:document>",
        ))
        .unwrap();
        assert_eq!(paragraphs, vec!["Intro\ttext", "Outro"]);
    }

    #[tokio::test]
    async fn test_docx_without_body_part_is_extraction_error() {
        let err = FileTextExtractor
            .extract(DocumentKind::Docx, Bytes::from_static(b"PK not really a zip"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }
}
