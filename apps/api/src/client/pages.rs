//! Page flows for the three analysis views.
//!
//! Each page mount performs exactly one request: decode the staged resume,
//! POST it to the page's endpoint, extract and validate the model's JSON,
//! and settle into `Ready` or `Failed`. No retry, no cancellation, no
//! caching.

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::analysis::handlers::AnalyzeResponse;
use crate::client::staging::{StagedResume, StagingError};
use crate::models::analysis::{AnalysisKind, AnalysisResult};
use crate::sanitize::{clean_markdown_json, extract_json};

#[derive(Debug, Error)]
pub enum PageError {
    #[error("No resume data found")]
    NoResumeData,

    #[error(transparent)]
    Staging(#[from] StagingError),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Upstream reply contained no JSON value")]
    MissingJson,

    #[error("Upstream reply is not valid JSON: {0}")]
    MalformedJson(serde_json::Error),

    #[error("Upstream contract violation: {0}")]
    ContractViolation(serde_json::Error),
}

/// Render states a page moves through. A mounted page starts in `Loading`
/// and settles exactly once.
#[derive(Debug)]
pub enum PageState {
    Loading,
    Ready(AnalysisResult),
    Failed(String),
}

/// One analysis page, identified by the kind of result it renders.
pub struct AnalysisPage {
    kind: AnalysisKind,
    pub state: PageState,
}

impl AnalysisPage {
    pub fn career_path() -> Self {
        Self::new(AnalysisKind::CareerPath)
    }

    pub fn recommendations() -> Self {
        Self::new(AnalysisKind::Recommendations)
    }

    pub fn job_matches() -> Self {
        Self::new(AnalysisKind::JobMatches)
    }

    fn new(kind: AnalysisKind) -> Self {
        Self {
            kind,
            state: PageState::Loading,
        }
    }

    /// Runs the page's single fetch and settles the state machine. A missing
    /// staged resume fails fast without touching the network.
    pub async fn mount(
        &mut self,
        http: &reqwest::Client,
        base_url: &str,
        staged: Option<&StagedResume>,
    ) {
        self.state = match fetch_analysis(http, base_url, self.kind, staged).await {
            Ok(result) => PageState::Ready(result),
            Err(e) => PageState::Failed(e.to_string()),
        };
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

async fn fetch_analysis(
    http: &reqwest::Client,
    base_url: &str,
    kind: AnalysisKind,
    staged: Option<&StagedResume>,
) -> Result<AnalysisResult, PageError> {
    let staged = staged.ok_or(PageError::NoResumeData)?;
    let bytes = staged.decode()?;

    let part = Part::bytes(bytes)
        .file_name(staged.name.clone())
        .mime_str(&staged.mime_type)?;
    let form = Form::new().part("resume", part);

    let response = http
        .post(format!("{base_url}{}", kind.endpoint()))
        .multipart(form)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        return Err(PageError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let envelope: AnalyzeResponse = response.json().await?;
    parse_summary(kind, &envelope.summary)
}

/// Extracts the JSON value from the raw summary and validates it against the
/// shape the page expects.
fn parse_summary(kind: AnalysisKind, summary: &str) -> Result<AnalysisResult, PageError> {
    let cleaned = clean_markdown_json(summary);
    let json = extract_json(&cleaned).ok_or(PageError::MissingJson)?;
    let value: Value = serde_json::from_str(json).map_err(PageError::MalformedJson)?;

    match kind {
        AnalysisKind::CareerPath => Ok(AnalysisResult::CareerPath(into_array(value)?)),
        AnalysisKind::JobMatches => Ok(AnalysisResult::JobMatches(into_array(value)?)),
        AnalysisKind::Recommendations => serde_json::from_value(value)
            .map(|bundle| AnalysisResult::Recommendations(Box::new(bundle)))
            .map_err(PageError::ContractViolation),
    }
}

/// Normalizes a value to an array where an array is expected, wrapping a
/// bare object into a one-element list.
fn into_array<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, PageError> {
    let value = match value {
        Value::Array(_) => value,
        other => Value::Array(vec![other]),
    };
    serde_json::from_value(value).map_err(PageError::ContractViolation)
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::config::Config;
    use crate::gemini::{GeminiError, ResumeAnalyzer};
    use crate::routes::build_router;
    use crate::state::AppState;

    /// Analyzer stub that always returns the same summary text.
    struct FixedAnalyzer(String);

    #[async_trait]
    impl ResumeAnalyzer for FixedAnalyzer {
        async fn analyze(
            &self,
            _path: &Path,
            _mime_type: &str,
            _display_name: &str,
            _prompt: &str,
        ) -> Result<String, GeminiError> {
            Ok(self.0.clone())
        }
    }

    /// Binds the full router on an ephemeral port and returns its base URL.
    async fn spawn_server(summary: &str, upload_dir: PathBuf) -> String {
        let state = AppState {
            analyzer: Arc::new(FixedAnalyzer(summary.to_string())),
            config: Config {
                gemini_api_key: "test-key".to_string(),
                upload_dir,
                base_url: String::new(),
                port: 0,
                rust_log: "info".to_string(),
            },
        };
        let app = build_router(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn staged_pdf(size: usize) -> StagedResume {
        StagedResume::from_bytes("resume.pdf", "application/pdf", &vec![b'x'; size])
    }

    #[tokio::test]
    async fn test_career_path_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let base_url = spawn_server(
            "```json\n[{\"title\":\"Junior Developer\",\"experience\":\"0-2 years\"}]\n```",
            dir.path().to_path_buf(),
        )
        .await;

        let staged = staged_pdf(10 * 1024);
        let mut page = AnalysisPage::career_path();
        page.mount(&reqwest::Client::new(), &base_url, Some(&staged))
            .await;

        match &page.state {
            PageState::Ready(AnalysisResult::CareerPath(stages)) => {
                assert_eq!(stages.len(), 1);
                assert_eq!(stages[0].title, "Junior Developer");
                assert_eq!(stages[0].experience.as_deref(), Some("0-2 years"));
            }
            other => panic!("unexpected page state: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_staged_resume_fails_without_request() {
        // An unroutable base URL: any network attempt would surface as a
        // request error, not this exact message.
        let mut page = AnalysisPage::recommendations();
        page.mount(&reqwest::Client::new(), "http://127.0.0.1:9", None)
            .await;

        match &page.state {
            PageState::Failed(msg) => assert_eq!(msg, "No resume data found"),
            other => panic!("unexpected page state: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bare_object_is_wrapped_into_one_element_array() {
        let dir = tempfile::tempdir().unwrap();
        let base_url = spawn_server(
            "{\"company\":\"Acme\",\"role\":\"Engineer\",\"matchScore\":91}",
            dir.path().to_path_buf(),
        )
        .await;

        let staged = staged_pdf(512);
        let mut page = AnalysisPage::job_matches();
        page.mount(&reqwest::Client::new(), &base_url, Some(&staged))
            .await;

        match &page.state {
            PageState::Ready(AnalysisResult::JobMatches(matches)) => {
                assert_eq!(matches.len(), 1);
                assert_eq!(matches[0].company, "Acme");
                assert_eq!(matches[0].match_score, 91);
            }
            other => panic!("unexpected page state: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_a_contract_violation() {
        let dir = tempfile::tempdir().unwrap();
        // Valid JSON, wrong shape for a career stage (no title).
        let base_url = spawn_server("[{\"salary\": 100}]", dir.path().to_path_buf()).await;

        let staged = staged_pdf(512);
        let mut page = AnalysisPage::career_path();
        page.mount(&reqwest::Client::new(), &base_url, Some(&staged))
            .await;

        match &page.state {
            PageState::Failed(msg) => assert!(msg.contains("Upstream contract violation")),
            other => panic!("unexpected page state: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_validation_error_reaches_the_page() {
        let dir = tempfile::tempdir().unwrap();
        let base_url = spawn_server("{}", dir.path().to_path_buf()).await;

        let staged = StagedResume::from_bytes("resume.txt", "text/plain", b"plain text");
        let mut page = AnalysisPage::career_path();
        page.mount(&reqwest::Client::new(), &base_url, Some(&staged))
            .await;

        match &page.state {
            PageState::Failed(msg) => {
                assert!(msg.contains("Only PDF and DOCX files are allowed."));
            }
            other => panic!("unexpected page state: {other:?}"),
        }
    }

    #[test]
    fn test_summary_with_prose_around_json_still_parses() {
        let summary = "Sure! Here is the career path:\n```json\n[{\"title\":\"Tech Lead\"}]\n```\nGood luck!";
        let result = parse_summary(AnalysisKind::CareerPath, summary).unwrap();
        match result {
            AnalysisResult::CareerPath(stages) => {
                assert_eq!(stages.len(), 1);
                assert_eq!(stages[0].title, "Tech Lead");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
