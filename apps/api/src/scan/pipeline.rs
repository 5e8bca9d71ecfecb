//! Scan pipeline: normalizes texts, ranks the batch, and attaches ATS scores.

use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::TextNormalizer;
use crate::ranking::{
    ats_score, format_years, rank_detailed, DateRange, Document, RankingError, Weights,
};

/// A resume whose text is already available.
#[derive(Debug, Clone, Deserialize)]
pub struct ResumeText {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateResult {
    pub name: String,
    pub final_score: f64,
    pub skills_score: f64,
    pub exp_score: f64,
    pub edu_score: f64,
    pub relevance_score: f64,
    pub ats_score: f64,
    pub matched_skills_count: usize,
    pub matched_skills: Vec<String>,
    /// Every vocabulary skill found in the resume.
    pub skills: Vec<String>,
    pub experience: String,
    /// Date ranges that made up the experience total.
    pub experience_ranges: Vec<DateRange>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanResponse {
    pub scan_id: Uuid,
    pub results: Vec<CandidateResult>,
}

/// Runs a full scan on the blocking pool. Results keep the order of `resumes`.
pub async fn scan_resumes(
    normalizer: Arc<dyn TextNormalizer>,
    job_description: String,
    resumes: Vec<ResumeText>,
    weights: Weights,
) -> Result<ScanResponse, AppError> {
    let scan_id = Uuid::new_v4();
    info!(
        %scan_id,
        candidates = resumes.len(),
        skills = weights.skills,
        experience = weights.experience,
        education = weights.education,
        relevance = weights.relevance,
        "Starting resume scan"
    );

    // CPU-bound: run on the blocking pool.
    let results = tokio::task::spawn_blocking(move || {
        score_resumes(&job_description, &resumes, &weights, normalizer.as_ref())
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in scan: {e}")))??;

    info!(%scan_id, "Resume scan complete");
    Ok(ScanResponse { scan_id, results })
}

/// Synchronous core of a scan: one ranking batch plus a per-candidate ATS score
/// that uses the job description's skills as reference.
pub fn score_resumes(
    job_description: &str,
    resumes: &[ResumeText],
    weights: &Weights,
    normalizer: &dyn TextNormalizer,
) -> Result<Vec<CandidateResult>, RankingError> {
    let query = Document::new(job_description, normalizer.normalize(job_description));
    let candidates: Vec<Document> = resumes
        .par_iter()
        .map(|r| Document::new(r.text.as_str(), normalizer.normalize(&r.text)))
        .collect();

    let batch = rank_detailed(&query, &candidates, weights)?;
    let reference_skills = batch.query_skills;

    Ok(resumes
        .par_iter()
        .zip(batch.candidates.into_par_iter())
        .map(|(resume, evaluation)| CandidateResult {
            name: resume.name.clone(),
            final_score: evaluation.scores.final_score,
            skills_score: evaluation.scores.skills,
            exp_score: evaluation.scores.experience,
            edu_score: evaluation.scores.education,
            relevance_score: evaluation.scores.relevance,
            ats_score: ats_score(&resume.text, Some(&reference_skills)),
            matched_skills_count: evaluation.matched_skills.len(),
            matched_skills: evaluation.matched_skills,
            skills: evaluation.skills.into_iter().collect(),
            experience: format_years(evaluation.experience.years),
            experience_ranges: evaluation.experience.ranges,
        })
        .collect())
}
