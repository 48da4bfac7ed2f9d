//! Multipart ingest for the analysis endpoints.
//!
//! Exactly one file field named `resume` is accepted. The MIME type is
//! checked from the field headers before any bytes are buffered, so a
//! disallowed type never touches memory or disk.

use axum::extract::Multipart;
use bytes::Bytes;

use crate::errors::AppError;

pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const ALLOWED_MIME_TYPES: [&str; 2] = [MIME_PDF, MIME_DOCX];

/// A validated resume upload, buffered in memory.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

/// Pulls the `resume` field out of the multipart body and validates it.
///
/// Unknown fields are drained and ignored. Errors: missing field → 400,
/// disallowed MIME type → 400, larger than 2 MiB → 400.
pub async fn extract_resume(multipart: &mut Multipart) -> Result<ResumeUpload, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("resume") {
            continue;
        }

        let mime_type = field.content_type().unwrap_or_default().to_string();
        if !ALLOWED_MIME_TYPES.contains(&mime_type.as_str()) {
            return Err(AppError::Validation(
                "Only PDF and DOCX files are allowed.".to_string(),
            ));
        }

        let file_name = field.file_name().unwrap_or("resume").to_string();
        let bytes = field.bytes().await?;

        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::Validation(
                "File exceeds the 2 MiB size limit.".to_string(),
            ));
        }

        return Ok(ResumeUpload {
            file_name,
            mime_type,
            bytes,
        });
    }

    Err(AppError::MissingFile)
}
