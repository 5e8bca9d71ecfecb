//! Composite Ranker: combines the four signals per candidate under caller weights.
//!
//! Component scores never depend on the weights; only `final_score` does.
//! The relevance batch is computed once for the whole request, the remaining
//! per-document signals fan out across candidates with rayon.

use chrono::{NaiveDate, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ranking::education::education_score;
use crate::ranking::experience::{extract_experience_at, ExperienceSummary};
use crate::ranking::relevance::relevance_scores;
use crate::ranking::skills::{extract_skills, matched_skills, SkillSet};
use crate::ranking::weights::Weights;
use crate::ranking::{round_to, RankingError};

/// Skill count treated as full credit when the query names no vocabulary skills.
const SKILL_FALLBACK_SATURATION: f64 = 20.0;
/// Years of experience treated as full credit.
const EXPERIENCE_SATURATION_YEARS: f64 = 10.0;

/// A query or candidate document. `raw_text` feeds skill, experience and
/// education extraction; `normalized_text` feeds the relevance scorer only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub raw_text: String,
    pub normalized_text: String,
}

impl Document {
    pub fn new(raw_text: impl Into<String>, normalized_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            normalized_text: normalized_text.into(),
        }
    }
}

/// Per-candidate scores on a 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentScores {
    pub final_score: f64,
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub relevance: f64,
}

/// Unit-interval signals for one candidate, before weighting and scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signals {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub relevance: f64,
}

impl Signals {
    /// Weighted mean of the signals in [0, 1]. Zero when every weight is zero.
    pub fn weighted_final(&self, weights: &Weights) -> f64 {
        let total = weights.sum();
        if total <= 0.0 {
            return 0.0;
        }
        let raw = self.skills * weights.skills
            + self.experience * weights.experience
            + self.education * weights.education
            + self.relevance * weights.relevance;
        raw / total
    }

    pub fn scores(&self, weights: &Weights) -> ComponentScores {
        ComponentScores {
            final_score: round_to(self.weighted_final(weights) * 100.0, 2),
            skills: round_to(self.skills * 100.0, 1),
            experience: round_to(self.experience * 100.0, 1),
            education: round_to(self.education * 100.0, 1),
            relevance: round_to(self.relevance * 100.0, 1),
        }
    }
}

/// Everything the ranker learned about one candidate.
#[derive(Debug, Clone)]
pub struct CandidateEvaluation {
    pub scores: ComponentScores,
    pub skills: SkillSet,
    pub matched_skills: Vec<String>,
    pub experience: ExperienceSummary,
}

/// Output of [`rank_detailed`]: the query's own skills plus one evaluation per
/// candidate, in input order.
#[derive(Debug, Clone)]
pub struct RankedBatch {
    pub query_skills: SkillSet,
    pub candidates: Vec<CandidateEvaluation>,
}

/// Scores every candidate against the query, one result per candidate in input order.
#[allow(dead_code)]
pub fn rank(
    query: &Document,
    candidates: &[Document],
    weights: &Weights,
) -> Result<Vec<ComponentScores>, RankingError> {
    Ok(rank_detailed(query, candidates, weights)?
        .candidates
        .into_iter()
        .map(|e| e.scores)
        .collect())
}

/// Like [`rank`], but keeps the extracted skills and experience for reporting.
pub fn rank_detailed(
    query: &Document,
    candidates: &[Document],
    weights: &Weights,
) -> Result<RankedBatch, RankingError> {
    rank_detailed_at(query, candidates, weights, Utc::now().date_naive())
}

/// [`rank_detailed`] with an explicit date for open-ended experience ranges.
pub fn rank_detailed_at(
    query: &Document,
    candidates: &[Document],
    weights: &Weights,
    today: NaiveDate,
) -> Result<RankedBatch, RankingError> {
    validate_request(query, candidates, weights)?;

    let corpus: Vec<&str> = candidates
        .iter()
        .map(|c| c.normalized_text.as_str())
        .collect();
    let similarities = relevance_scores(&query.normalized_text, &corpus);
    let query_skills = extract_skills(&query.raw_text);

    let evaluations: Vec<CandidateEvaluation> = candidates
        .par_iter()
        .enumerate()
        .map(|(idx, candidate)| {
            // Empty when the normalized query has no content; relevance is then 0.
            let similarity = similarities.get(idx).copied().unwrap_or(0.0);
            let evaluation =
                evaluate_candidate(candidate, &query_skills, similarity, weights, today);
            debug!(
                candidate = idx,
                final_score = evaluation.scores.final_score,
                skills = evaluation.scores.skills,
                experience = evaluation.scores.experience,
                education = evaluation.scores.education,
                relevance = evaluation.scores.relevance,
                "Candidate scored"
            );
            evaluation
        })
        .collect();

    Ok(RankedBatch {
        query_skills,
        candidates: evaluations,
    })
}

fn validate_request(
    query: &Document,
    candidates: &[Document],
    weights: &Weights,
) -> Result<(), RankingError> {
    if query.raw_text.trim().is_empty() {
        return Err(RankingError::InvalidInput(
            "query document is empty".to_string(),
        ));
    }
    if candidates.is_empty() {
        return Err(RankingError::InvalidInput(
            "at least one candidate document is required".to_string(),
        ));
    }
    if let Some(idx) = candidates
        .iter()
        .position(|c| c.raw_text.trim().is_empty())
    {
        return Err(RankingError::InvalidInput(format!(
            "candidate {idx} has no text"
        )));
    }
    weights.validate()
}

fn evaluate_candidate(
    candidate: &Document,
    query_skills: &SkillSet,
    similarity: f64,
    weights: &Weights,
    today: NaiveDate,
) -> CandidateEvaluation {
    let candidate_skills = extract_skills(&candidate.raw_text);
    let matched = matched_skills(query_skills, &candidate_skills);
    let experience = extract_experience_at(&candidate.raw_text, today);

    let signals = Signals {
        skills: skill_overlap(query_skills, matched.len(), &candidate_skills),
        experience: (experience.years / EXPERIENCE_SATURATION_YEARS).min(1.0),
        education: education_score(&candidate.raw_text),
        relevance: similarity.clamp(0.0, 1.0),
    };

    CandidateEvaluation {
        scores: signals.scores(weights),
        skills: candidate_skills,
        matched_skills: matched,
        experience,
    }
}

fn skill_overlap(query_skills: &SkillSet, matched: usize, candidate_skills: &SkillSet) -> f64 {
    let ratio = if query_skills.is_empty() {
        candidate_skills.len() as f64 / SKILL_FALLBACK_SATURATION
    } else {
        matched as f64 / query_skills.len() as f64
    };
    ratio.clamp(0.0, 1.0)
}
