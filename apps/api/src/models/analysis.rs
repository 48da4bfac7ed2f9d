//! Typed shapes for the three analysis results.
//!
//! The model is prompted for these structures; nothing upstream enforces
//! them. Page flows validate against these types immediately after JSON
//! extraction, so a shape mismatch becomes a typed contract violation
//! instead of reaching the rendering layer.

use serde::{Deserialize, Serialize};

/// Which analysis an endpoint/page pair performs.
///
/// Endpoint names are kept verbatim from the public API contract, including
/// the historical `analyzeRecomendation` spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    CareerPath,
    Recommendations,
    JobMatches,
}

impl AnalysisKind {
    pub fn endpoint(&self) -> &'static str {
        match self {
            AnalysisKind::CareerPath => "/api/analyzeResume",
            AnalysisKind::Recommendations => "/api/analyzeProgress",
            AnalysisKind::JobMatches => "/api/analyzeRecomendation",
        }
    }
}

/// One step of the generated career progression timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerStage {
    pub title: String,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
}

/// The full recommendation bundle returned by the progress analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationBundle {
    pub recommendation: RoleRecommendation,
    pub action_plan: Vec<ActionItem>,
    pub career_progress: CareerProgress,
    pub skill_gaps: Vec<String>,
    pub recommended_courses: Vec<Course>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRecommendation {
    pub role: String,
    pub description: String,
    pub match_score: u32,
    pub key_skills: Vec<String>,
    pub salary: SalaryRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRange {
    pub min: u64,
    pub max: u64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: u32,
    pub task: String,
    pub completed: bool,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerProgress {
    pub current_stage: String,
    pub stage_progress: u32,
    pub next_milestone: String,
    pub time_to_next_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub title: String,
    pub provider: String,
    pub duration: String,
    pub level: String,
}

/// One job match card from the referral-leads analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatch {
    pub company: String,
    pub role: String,
    pub match_score: u32,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub matched_skills: Vec<String>,
}

/// Tagged union of the three result shapes, produced by the page flows.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum AnalysisResult {
    CareerPath(Vec<CareerStage>),
    Recommendations(Box<RecommendationBundle>),
    JobMatches(Vec<JobMatch>),
}
