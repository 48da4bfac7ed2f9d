//! Scoped temp-file staging for uploaded resumes.
//!
//! One acquisition routine serves every endpoint: acquire writes the
//! buffered bytes under a unique name in the uploads directory, release
//! deletes the file when the guard leaves scope. Success, adapter failure,
//! and sanitizer failure all funnel through the same drop path, so each
//! request creates and deletes exactly one file.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tempfile::{Builder, NamedTempFile};
use tracing::warn;

/// Guard over a staged upload on disk. Dropping it deletes the file.
pub struct ScopedUpload {
    file: Option<NamedTempFile>,
    path: PathBuf,
}

impl ScopedUpload {
    /// Writes `bytes` to a uniquely named file inside `upload_dir`, creating
    /// the directory if absent. Names carry a millisecond timestamp prefix
    /// and the sanitized original file name, with a random infix to rule out
    /// collisions between concurrent requests.
    pub fn stage(upload_dir: &Path, original_name: &str, bytes: &[u8]) -> std::io::Result<Self> {
        std::fs::create_dir_all(upload_dir)?;

        let mut file = Builder::new()
            .prefix(&format!("{}-", Utc::now().timestamp_millis()))
            .suffix(&format!("-{}", sanitize_file_name(original_name)))
            .tempfile_in(upload_dir)?;
        file.write_all(bytes)?;
        file.flush()?;

        let path = file.path().to_path_buf();
        Ok(Self {
            file: Some(file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScopedUpload {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            // Best-effort: a failed delete is logged, never propagated.
            if let Err(e) = file.close() {
                warn!("Failed to delete staged upload: {e}");
            }
        }
    }
}

/// Restricts a client-supplied file name to a filesystem-safe subset.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "resume".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_writes_bytes_and_drop_deletes() {
        let dir = tempfile::tempdir().unwrap();
        let path;
        {
            let staged = ScopedUpload::stage(dir.path(), "resume.pdf", b"%PDF-1.4 test").unwrap();
            path = staged.path().to_path_buf();
            assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4 test");
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_stage_creates_missing_upload_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("uploads");
        let staged = ScopedUpload::stage(&nested, "resume.pdf", b"data").unwrap();
        assert!(nested.is_dir());
        assert!(staged.path().exists());
    }

    #[test]
    fn test_concurrent_stages_get_unique_names() {
        let dir = tempfile::tempdir().unwrap();
        let a = ScopedUpload::stage(dir.path(), "resume.pdf", b"a").unwrap();
        let b = ScopedUpload::stage(dir.path(), "resume.pdf", b"b").unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_sanitize_file_name_strips_path_separators() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_file_name("my resume.pdf"), "my_resume.pdf");
        assert_eq!(sanitize_file_name(""), "resume");
    }
}
