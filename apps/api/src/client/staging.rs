//! Client-side staging of an uploaded resume.
//!
//! The selected file is captured once, encoded as a data URI, and handed to
//! the next page as an explicit value. This replaces the old implicit
//! session-storage channel: whoever navigates owns the handoff.

use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StagingError {
    #[error("Staged content is not a base64 data URI")]
    MalformedDataUri,

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// The staged representation of the user's uploaded file, held only for the
/// duration of one navigation. Overwritten by the next upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagedResume {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(rename = "size")]
    pub size_bytes: usize,
    /// `data:<mime>;base64,<payload>` URI over the file bytes.
    pub content: String,
}

impl StagedResume {
    /// Encodes a freshly selected file for the cross-page handoff.
    pub fn from_bytes(name: &str, mime_type: &str, bytes: &[u8]) -> Self {
        let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self {
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            size_bytes: bytes.len(),
            content: format!("data:{mime_type};base64,{payload}"),
        }
    }

    /// Reconstructs the original file bytes from the data URI.
    pub fn decode(&self) -> Result<Vec<u8>, StagingError> {
        let payload = self
            .content
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
            .map(|(_, payload)| payload)
            .ok_or(StagingError::MalformedDataUri)?;
        Ok(base64::engine::general_purpose::STANDARD.decode(payload)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staging_round_trip() {
        let bytes = b"%PDF-1.4 sample resume bytes";
        let staged = StagedResume::from_bytes("resume.pdf", "application/pdf", bytes);

        assert_eq!(staged.name, "resume.pdf");
        assert_eq!(staged.size_bytes, bytes.len());
        assert!(staged.content.starts_with("data:application/pdf;base64,"));
        assert_eq!(staged.decode().unwrap(), bytes);
    }

    #[test]
    fn test_decode_rejects_non_data_uri() {
        let staged = StagedResume {
            name: "resume.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            size_bytes: 4,
            content: "not a data uri".to_string(),
        };
        assert!(matches!(
            staged.decode(),
            Err(StagingError::MalformedDataUri)
        ));
    }
}
