// Candidate Ranking Engine
// Implements: skill, experience, education and relevance signals, weighted
// composition, and the standalone ATS document-quality score.
// Everything here is synchronous and CPU-bound; async callers go through spawn_blocking.

pub mod ats;
pub mod education;
pub mod experience;
pub mod ranker;
pub mod relevance;
pub mod skills;
pub mod vocabulary;
pub mod weights;

use thiserror::Error;

pub use ats::{assess_document, ats_score, AtsReport};
pub use experience::{format_years, DateRange};
pub use ranker::{rank_detailed, Document};
pub use skills::{extract_skills, SkillSet};
pub use weights::{RankingPriorities, Weights};

/// Errors surfaced by the ranking engine. Malformed fragments inside a document
/// (bad dates, odd tokens) are skipped locally and never reach this type.
#[derive(Debug, Error, PartialEq)]
pub enum RankingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Rounds half away from zero to the given number of decimal places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
