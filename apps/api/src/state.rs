use std::sync::Arc;

use crate::config::Config;
use crate::gemini::ResumeAnalyzer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable model adapter. Production wires `GeminiAnalyzer`; tests
    /// inject a stub so no network call leaves the process.
    pub analyzer: Arc<dyn ResumeAnalyzer>,
    pub config: Config,
}
