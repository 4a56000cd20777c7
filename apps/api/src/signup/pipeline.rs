//! The signup analysis pipeline.
//!
//! Linear stages: spool → extract (optional) → prompt (optional) →
//! call (optional) → validate → release. Collaborator failures inside the
//! guarded stages never escape; they degrade the outcome to the canned
//! fallback plan. Nothing is retried.

use anyhow::anyhow;
use tracing::{info, warn};

use crate::doc_intel::DocIntelClient;
use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::signup::models::{AnalysisOutcome, AnalysisResult, SignupRequest};
use crate::signup::prompts::build_career_prompt;
use crate::signup::resume_file::ResumeFile;

/// What the prompt carries when no extraction collaborator is configured.
const EXTRACTION_SKIPPED: &str = "Resume text missing (extraction skipped).";

/// Runs the full analysis for one signup. The only error that escapes is a
/// failure to spool the upload — everything after that point degrades to
/// `AnalysisOutcome::Fallback`. The temp file is released on every path.
pub async fn analyze(
    llm: Option<&LlmClient>,
    doc_intel: Option<&DocIntelClient>,
    request: &SignupRequest,
) -> Result<AnalysisOutcome, AppError> {
    let resume_file = ResumeFile::spool(&request.resume_filename, &request.resume_bytes)
        .await
        .map_err(AppError::Internal)?;

    let outcome = match guarded_stages(llm, doc_intel, request, &resume_file).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("analysis failed, serving fallback: {e:#}");
            AnalysisOutcome::Fallback
        }
    };

    drop(resume_file); // release before responding, success or failure
    Ok(outcome)
}

/// The guarded stages: any error here means the caller serves the fallback.
async fn guarded_stages(
    llm: Option<&LlmClient>,
    doc_intel: Option<&DocIntelClient>,
    request: &SignupRequest,
    resume_file: &ResumeFile,
) -> anyhow::Result<AnalysisOutcome> {
    let mut resume_text = EXTRACTION_SKIPPED.to_string();
    let mut extracted = false;

    if let Some(doc_intel) = doc_intel {
        info!("extracting resume text");
        resume_text = doc_intel.extract_text(resume_file.path()).await?;
        extracted = true;
    }

    let Some(llm) = llm else {
        return Ok(AnalysisOutcome::Fallback);
    };

    info!("requesting career analysis");
    let prompt = build_career_prompt(&request.full_name, &request.selected_domains, &resume_text);
    let analysis: AnalysisResult = llm.complete_json(JSON_ONLY_SYSTEM, &prompt).await?;
    analysis
        .validate()
        .map_err(|reason| anyhow!("model payload rejected: {reason}"))?;

    Ok(if extracted {
        AnalysisOutcome::Full(analysis)
    } else {
        AnalysisOutcome::Partial(analysis)
    })
}
