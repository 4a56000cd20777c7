//! Request, response, and analysis shapes for the signup pipeline.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Form fields and résumé upload carried by one signup request.
/// Exists only for the request's duration; nothing persists.
#[derive(Debug)]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    /// Raw string as submitted (JSON-array-shaped by convention). Never
    /// parsed — interpolated verbatim into the career-coach prompt.
    pub selected_domains: String,
    pub degree: String,
    pub resume_filename: String,
    pub resume_bytes: Bytes,
}

/// One phase of the generated learning path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPhase {
    pub phase: String,
    pub title: String,
    pub tasks: Vec<String>,
}

/// A project suggestion with a difficulty label.
/// The wire field for the description is `desc`, matching the schema the
/// model is prompted with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedProject {
    pub title: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub difficulty: String,
}

/// The structured career-development plan. This is the one real shape
/// contract in the service: whether it comes from the fallback constant or
/// from the model, the response body validates against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub match_score: u8,
    pub skills_to_learn: Vec<String>,
    pub learning_path: Vec<LearningPhase>,
    pub suggested_projects: Vec<SuggestedProject>,
    pub advice: String,
}

impl AnalysisResult {
    /// Shape checks serde cannot express. A violating upstream payload is
    /// rejected and the caller falls back.
    pub fn validate(&self) -> Result<(), String> {
        if self.match_score > 100 {
            return Err(format!("match_score {} out of range 0-100", self.match_score));
        }
        Ok(())
    }
}

/// The canned plan served whenever a collaborator is unconfigured or fails.
pub fn fallback_analysis() -> AnalysisResult {
    AnalysisResult {
        match_score: 85,
        skills_to_learn: vec![
            "Python".to_string(),
            "React".to_string(),
            "Cloud Basics".to_string(),
        ],
        learning_path: vec![
            LearningPhase {
                phase: "Week 1".to_string(),
                title: "Foundation".to_string(),
                tasks: vec!["Learn Syntax".to_string(), "Build Calculator".to_string()],
            },
            LearningPhase {
                phase: "Week 2".to_string(),
                title: "Advanced".to_string(),
                tasks: vec!["API Integration".to_string(), "DB Design".to_string()],
            },
        ],
        suggested_projects: vec![SuggestedProject {
            title: "Portfolio Site".to_string(),
            description: "Build a personal site".to_string(),
            difficulty: "Beginner".to_string(),
        }],
        advice: "Focus on building practical projects.".to_string(),
    }
}

/// Which path produced the analysis. The HTTP envelope does not expose this;
/// logs and tests do.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// A collaborator was unconfigured or failed; the canned plan is served.
    Fallback,
    /// The model produced a plan, but without extracted résumé text.
    Partial(AnalysisResult),
    /// Extraction and the model both succeeded.
    Full(AnalysisResult),
}

impl AnalysisOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisOutcome::Fallback => "fallback",
            AnalysisOutcome::Partial(_) => "partial",
            AnalysisOutcome::Full(_) => "full",
        }
    }

    /// The plan to serve: the model's if one survived validation, the canned
    /// one otherwise.
    pub fn into_analysis(self) -> AnalysisResult {
        match self {
            AnalysisOutcome::Fallback => fallback_analysis(),
            AnalysisOutcome::Partial(analysis) | AnalysisOutcome::Full(analysis) => analysis,
        }
    }
}

/// Success envelope returned for every signup, fallback or not.
#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub status: String,
    pub message: String,
    pub ai_analysis: AnalysisResult,
}

impl SignupResponse {
    pub fn new(ai_analysis: AnalysisResult) -> Self {
        Self {
            status: "success".to_string(),
            message: "Signup Successful".to_string(),
            ai_analysis,
        }
    }
}
