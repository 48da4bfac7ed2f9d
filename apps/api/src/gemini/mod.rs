/// Gemini adapter — the single point of entry for all model calls in CareerLens.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All model interactions MUST go through this module.
///
/// Each analysis is a two-step exchange: the resume file is pushed to the
/// Gemini file store, then referenced from a `generateContent` call together
/// with the per-endpoint prompt. Failures surface as-is; there is no retry.
use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// The model used for all analyses.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("File handling error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Model returned no generated text")]
    EmptyContent,
}

/// Handle returned by the file-store upload; `uri` is what the generation
/// call references.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub uri: String,
    pub mime_type: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadFileResponse {
    file: UploadedFile,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<ContentPart>,
}

/// Untagged union of the part kinds we exchange with the model.
///
/// Variant order matters for `#[serde(untagged)]` decoding.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum ContentPart {
    Text {
        text: String,
    },
    FileData {
        #[serde(rename = "fileData")]
        file_data: FileData,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileData {
    mime_type: String,
    file_uri: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct GeminiApiError {
    error: GeminiApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiApiErrorBody {
    message: String,
}

/// The model adapter seam. `AppState` carries `Arc<dyn ResumeAnalyzer>` so
/// handlers stay network-free under test.
#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    /// Uploads the file at `path` and returns the raw generated text for
    /// `prompt`. The caller owns sanitization and parsing.
    async fn analyze(
        &self,
        path: &Path,
        mime_type: &str,
        display_name: &str,
        prompt: &str,
    ) -> Result<String, GeminiError>;
}

/// Production analyzer backed by the Gemini REST API.
#[derive(Clone)]
pub struct GeminiAnalyzer {
    client: Client,
    api_key: String,
}

impl GeminiAnalyzer {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Pushes the file into the Gemini file store with its MIME type and
    /// display name.
    async fn upload_file(
        &self,
        path: &Path,
        mime_type: &str,
        display_name: &str,
    ) -> Result<UploadedFile, GeminiError> {
        let bytes = tokio::fs::read(path).await?;

        let metadata = serde_json::json!({ "file": { "display_name": display_name } });
        let form = Form::new()
            .part(
                "metadata",
                Part::text(metadata.to_string())
                    .mime_str("application/json")
                    .map_err(GeminiError::Http)?,
            )
            .part(
                "file",
                Part::bytes(bytes)
                    .file_name(display_name.to_string())
                    .mime_str(mime_type)
                    .map_err(GeminiError::Http)?,
            );

        let response = self
            .client
            .post(format!(
                "{GEMINI_BASE_URL}/upload/v1beta/files?key={}",
                self.api_key
            ))
            .header("X-Goog-Upload-Protocol", "multipart")
            .multipart(form)
            .send()
            .await?;

        let response = check_status(response).await?;
        let uploaded: UploadFileResponse = response.json().await?;

        info!(
            "Uploaded file {} as: {}",
            uploaded.file.display_name.as_deref().unwrap_or(display_name),
            uploaded.file.uri
        );

        Ok(uploaded.file)
    }

    /// Issues the generation call referencing an uploaded file.
    async fn generate(&self, file: &UploadedFile, prompt: &str) -> Result<String, GeminiError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    ContentPart::FileData {
                        file_data: FileData {
                            mime_type: file.mime_type.clone(),
                            file_uri: file.uri.clone(),
                        },
                    },
                    ContentPart::Text {
                        text: prompt.to_string(),
                    },
                ],
            }],
        };

        let response = self
            .client
            .post(format!(
                "{GEMINI_BASE_URL}/v1beta/models/{MODEL}:generateContent?key={}",
                self.api_key
            ))
            .json(&request_body)
            .send()
            .await?;

        let response = check_status(response).await?;
        let generated: GenerateContentResponse = response.json().await?;

        let text = generated
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .filter_map(|p| match p {
                        ContentPart::Text { text } => Some(text),
                        ContentPart::FileData { .. } => None,
                    })
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|t| !t.is_empty())
            .ok_or(GeminiError::EmptyContent)?;

        debug!("Generation succeeded: {} chars", text.len());

        Ok(text)
    }
}

#[async_trait]
impl ResumeAnalyzer for GeminiAnalyzer {
    async fn analyze(
        &self,
        path: &Path,
        mime_type: &str,
        display_name: &str,
        prompt: &str,
    ) -> Result<String, GeminiError> {
        let uploaded = self.upload_file(path, mime_type, display_name).await?;
        self.generate(&uploaded, prompt).await
    }
}

/// Maps a non-success response to `GeminiError::Api`, extracting the API
/// error message when the body carries one.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GeminiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<GeminiApiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);

    Err(GeminiError::Api {
        status: status.as_u16(),
        message,
    })
}
