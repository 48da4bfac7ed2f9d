pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::analysis::ingest::MAX_UPLOAD_BYTES;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/analyzeResume",
            post(handlers::handle_analyze_resume),
        )
        .route(
            "/api/analyzeProgress",
            post(handlers::handle_analyze_progress),
        )
        .route(
            "/api/analyzeRecomendation",
            post(handlers::handle_analyze_recomendation),
        )
        // The 2 MiB file limit is enforced in ingest; the body limit only
        // needs headroom for multipart framing.
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 1024 * 1024))
        .with_state(state)
}
