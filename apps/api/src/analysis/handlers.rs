use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::ingest::extract_resume;
use crate::analysis::prompts;
use crate::analysis::upload_store::ScopedUpload;
use crate::errors::AppError;
use crate::models::analysis::AnalysisKind;
use crate::state::AppState;

/// Response envelope shared by all three analysis endpoints. `summary` is
/// the raw generated text; structural validation happens on the client.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub message: String,
    pub summary: String,
}

/// POST /api/analyzeResume
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    run_analysis(state, multipart, AnalysisKind::CareerPath).await
}

/// POST /api/analyzeProgress
pub async fn handle_analyze_progress(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    run_analysis(state, multipart, AnalysisKind::Recommendations).await
}

/// POST /api/analyzeRecomendation
pub async fn handle_analyze_recomendation(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    run_analysis(state, multipart, AnalysisKind::JobMatches).await
}

/// The shared relay pipeline: ingest → temp-file staging → model call.
///
/// `ScopedUpload` guarantees the temp file is gone by the time this returns,
/// whether the adapter call succeeds or bails through `?`.
async fn run_analysis(
    state: AppState,
    mut multipart: Multipart,
    kind: AnalysisKind,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let upload = extract_resume(&mut multipart).await?;

    info!(
        "Analyzing {} ({}, {} bytes) for {:?}",
        upload.file_name,
        upload.mime_type,
        upload.bytes.len(),
        kind
    );

    let staged = ScopedUpload::stage(&state.config.upload_dir, &upload.file_name, &upload.bytes)?;

    let summary = state
        .analyzer
        .analyze(
            staged.path(),
            &upload.mime_type,
            &upload.file_name,
            prompts::prompt_for(kind),
        )
        .await?;

    Ok(Json(AnalyzeResponse {
        message: "File uploaded and analyzed successfully.".to_string(),
        summary,
    }))
}
