// Fixed prompt constants for the three analysis endpoints. Each prompt asks
// the model for a specific JSON shape; the shape is requested, not enforced,
// so callers must sanitize and validate the reply.

use crate::models::analysis::AnalysisKind;

/// Career-path prompt — requests an array of career stages.
pub const CAREER_PATH_PROMPT: &str = r#"Based on the provided resume, generate a detailed career progression path for the candidate.
Please include:
- Role titles (e.g., Junior Developer, Senior Developer, Tech Lead).
- Recommended years of experience for each step (e.g., 0-2 years for Junior Developer).
Provide the response as a JSON array so each entry can be rendered directly, with the following structure.
Just give this, do not give any extra detail:
[
  {
    "title": "Junior Developer",
    "experience": "0-2 years"
  },
  {
    "title": "Senior Developer",
    "experience": "3-5 years"
  },
  {
    "title": "Tech Lead",
    "experience": "5+ years"
  }
]"#;

/// Recommendation prompt — requests the full career-analysis bundle.
pub const RECOMMENDATION_PROMPT: &str = r#"Based on the provided resume, generate a detailed career analysis with the following structure:
{
  "recommendation": {
    "role": "string",
    "description": "string",
    "matchScore": number,
    "keySkills": string[],
    "salary": {
      "min": number,
      "max": number,
      "currency": "USD"
    }
  },
  "actionPlan": [
    {
      "id": number,
      "task": "string",
      "completed": boolean,
      "priority": "high" | "medium" | "low"
    }
  ],
  "careerProgress": {
    "currentStage": "string",
    "stageProgress": number,
    "nextMilestone": "string",
    "timeToNextLevel": "string"
  },
  "skillGaps": string[],
  "recommendedCourses": [
    {
      "title": "string",
      "provider": "string",
      "duration": "string",
      "level": "string"
    }
  ]
}

Ensure all responses strictly follow this JSON structure."#;

/// Job-match prompt — requests an array of matched openings.
pub const JOB_MATCH_PROMPT: &str = r#"Based on the provided resume, suggest companies and roles that fit the candidate's skills and experience.
Provide the response as a JSON array so each match can be rendered directly, with the following structure.
Just give this, do not give any extra detail:
[
  {
    "company": "string",
    "role": "string",
    "matchScore": number,
    "experience": "string",
    "matchedSkills": string[]
  }
]"#;

pub fn prompt_for(kind: AnalysisKind) -> &'static str {
    match kind {
        AnalysisKind::CareerPath => CAREER_PATH_PROMPT,
        AnalysisKind::Recommendations => RECOMMENDATION_PROMPT,
        AnalysisKind::JobMatches => JOB_MATCH_PROMPT,
    }
}
