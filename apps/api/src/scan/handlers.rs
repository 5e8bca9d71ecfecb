//! Axum route handlers for the Scan API.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::ranking::{assess_document, extract_skills, AtsReport, RankingPriorities, SkillSet, Weights};
use crate::scan::pipeline::{scan_resumes, ResumeText, ScanResponse};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// Optional priority labels; missing ones fall back to the ranking defaults.
#[derive(Debug, Default, Deserialize)]
pub struct PriorityFields {
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub relevance: Option<String>,
}

impl PriorityFields {
    fn resolve(&self) -> Result<Weights, AppError> {
        RankingPriorities::parse(
            self.skills.as_deref(),
            self.experience.as_deref(),
            self.education.as_deref(),
            self.relevance.as_deref(),
        )
        .map(|p| p.weights())
        .map_err(|e| AppError::Validation(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
pub struct ScanTextRequest {
    pub job_description: String,
    pub resumes: Vec<ResumeText>,
    #[serde(default)]
    pub priorities: PriorityFields,
}

#[derive(Debug, Deserialize)]
pub struct AtsRequest {
    pub resume_text: String,
    pub job_description: Option<String>,
    pub reference_skills: Option<Vec<String>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/scan/pdf
///
/// Multipart form: `job_description`, optional `*_priority` labels, and one or
/// more `files`. Every file must yield text or the whole scan is rejected.
pub async fn handle_scan_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScanResponse>, AppError> {
    let mut job_description: Option<String> = None;
    let mut priorities = PriorityFields::default();
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "job_description" => {
                job_description = Some(field.text().await.map_err(multipart_error)?)
            }
            "skills_priority" => priorities.skills = Some(field.text().await.map_err(multipart_error)?),
            "experience_priority" => {
                priorities.experience = Some(field.text().await.map_err(multipart_error)?)
            }
            "education_priority" => {
                priorities.education = Some(field.text().await.map_err(multipart_error)?)
            }
            "relevance_priority" => {
                priorities.relevance = Some(field.text().await.map_err(multipart_error)?)
            }
            "files" => {
                let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                files.push((file_name, bytes));
            }
            other => debug!("Ignoring unexpected multipart field '{other}'"),
        }
    }

    if files.is_empty() {
        return Err(AppError::Validation(
            "At least one resume PDF is required".to_string(),
        ));
    }

    let job_description = job_description.unwrap_or_default();
    validate_job_description(&job_description, state.config.min_job_description_chars)?;

    let mut resumes = Vec::with_capacity(files.len());
    for (file_name, bytes) in files {
        let text = state.extractor.extract_text(&file_name, bytes).await;
        if text.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "Could not extract text from {file_name}"
            )));
        }
        resumes.push(ResumeText {
            name: file_name,
            text,
        });
    }

    let weights = priorities.resolve()?;
    info!("PDF scan: {} resumes extracted", resumes.len());

    let response =
        scan_resumes(Arc::clone(&state.normalizer), job_description, resumes, weights).await?;
    Ok(Json(response))
}

/// POST /api/v1/scan/text
///
/// Same scoring as the PDF endpoint for callers that already hold resume text.
pub async fn handle_scan_text(
    State(state): State<AppState>,
    Json(request): Json<ScanTextRequest>,
) -> Result<Json<ScanResponse>, AppError> {
    if request.resumes.is_empty() {
        return Err(AppError::Validation(
            "At least one resume is required".to_string(),
        ));
    }
    validate_job_description(
        &request.job_description,
        state.config.min_job_description_chars,
    )?;
    if let Some(blank) = request.resumes.iter().find(|r| r.text.trim().is_empty()) {
        return Err(AppError::Validation(format!(
            "Resume '{}' has no text",
            blank.name
        )));
    }

    let weights = request.priorities.resolve()?;

    let response = scan_resumes(
        Arc::clone(&state.normalizer),
        request.job_description,
        request.resumes,
        weights,
    )
    .await?;
    Ok(Json(response))
}

/// POST /api/v1/ats
///
/// Scores one resume's ATS quality. Reference skills come from the explicit
/// list, else from the job description, else none.
pub async fn handle_ats(Json(request): Json<AtsRequest>) -> Result<Json<AtsReport>, AppError> {
    let report = tokio::task::spawn_blocking(move || {
        let reference: Option<SkillSet> = match (request.reference_skills, request.job_description) {
            (Some(skills), _) => Some(skills.into_iter().collect()),
            (None, Some(jd)) => Some(extract_skills(&jd)),
            (None, None) => None,
        };
        assess_document(&request.resume_text, reference.as_ref())
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in ATS scoring: {e}")))?;

    Ok(Json(report))
}

fn validate_job_description(job_description: &str, min_chars: usize) -> Result<(), AppError> {
    if job_description.trim().chars().count() < min_chars {
        return Err(AppError::Validation(
            "Job description is too short to analyze".to_string(),
        ));
    }
    Ok(())
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("Malformed multipart body: {}", e.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_job_description_rejected() {
        assert!(validate_job_description("  Rust dev  ", 20).is_err());
        assert!(validate_job_description("Senior Rust engineer for payments", 20).is_ok());
    }

    #[test]
    fn test_priority_fields_default_to_ranking_defaults() {
        let weights = PriorityFields::default().resolve().unwrap();
        assert_eq!(weights, Weights::default());
    }

    #[test]
    fn test_unknown_priority_label_is_validation_error() {
        let fields = PriorityFields {
            skills: Some("Urgent".to_string()),
            ..Default::default()
        };
        assert!(matches!(fields.resolve(), Err(AppError::Validation(_))));
    }
}
