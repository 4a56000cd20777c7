use axum::extract::{Multipart, State};
use axum::Json;
use tracing::info;

use crate::errors::AppError;
use crate::signup::models::{SignupRequest, SignupResponse};
use crate::signup::pipeline::analyze;
use crate::state::AppState;

/// POST /signup-student
///
/// Accepts the signup form plus résumé upload, runs the analysis pipeline,
/// and always replies with the success envelope — a failed collaborator
/// degrades the plan, never the status.
pub async fn handle_signup(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SignupResponse>, AppError> {
    let request = parse_signup(multipart).await?;
    info!("processing signup for {}", request.full_name);

    let outcome = analyze(state.llm.as_ref(), state.doc_intel.as_ref(), &request).await?;
    info!(source = outcome.label(), "signup analysis complete");

    Ok(Json(SignupResponse::new(outcome.into_analysis())))
}

/// Pulls the form fields out of the multipart body. Every text field has a
/// default; the résumé file is the one required part.
async fn parse_signup(mut multipart: Multipart) -> Result<SignupRequest, AppError> {
    let mut full_name = "Student".to_string();
    let mut email = "test@test.com".to_string();
    let mut selected_domains = "[]".to_string();
    let mut degree = String::new();
    let mut resume: Option<(String, bytes::Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "full_name" => full_name = read_text(field, &field_name).await?,
            "email" => email = read_text(field, &field_name).await?,
            "selected_domains" => selected_domains = read_text(field, &field_name).await?,
            "degree" => degree = read_text(field, &field_name).await?,
            "resume" => {
                let filename = field.file_name().unwrap_or("unknown").to_string();
                let data = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("failed to read resume upload: {e}"))
                })?;
                resume = Some((filename, data));
            }
            _ => {
                // Unknown parts are drained and ignored.
                let _ = field.bytes().await;
            }
        }
    }

    let (resume_filename, resume_bytes) =
        resume.ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;

    Ok(SignupRequest {
        full_name,
        email,
        selected_domains,
        degree,
        resume_filename,
        resume_bytes,
    })
}

async fn read_text(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("failed to read field '{name}': {e}")))
}
