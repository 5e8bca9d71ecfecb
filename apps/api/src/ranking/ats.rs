//! Document Quality (ATS) Scorer: how well a resume would fare in an
//! automated applicant-tracking filter, independent of ranking weights.
//!
//! Base score = 0.40 × skill saturation + 0.25 × section coverage
//!            + 0.15 × experience plausibility + 0.20 × parseability,
//! then an impact-keyword bonus (≤ +0.12) and a penalty (≤ −0.20) for very
//! short text or skill stuffing. Tiers are step functions.

use std::collections::HashSet;

use serde::Serialize;

use crate::ranking::experience::extract_experience;
use crate::ranking::round_to;
use crate::ranking::skills::{extract_skills, SkillSet};
use crate::ranking::vocabulary::{ATS_SECTIONS, IMPACT_KEYWORDS};

const SKILL_WEIGHT: f64 = 0.40;
const SECTION_WEIGHT: f64 = 0.25;
const EXPERIENCE_WEIGHT: f64 = 0.15;
const PARSEABILITY_WEIGHT: f64 = 0.20;

/// Skill count treated as full credit when no reference skills are given.
const UNREFERENCED_SKILL_SATURATION: f64 = 8.0;
const MAX_PENALTY: f64 = 0.2;
const SHORT_TEXT_WORDS: usize = 60;
const STUFFING_SKILL_COUNT: usize = 40;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtsReport {
    /// Final score, 0–100.
    pub score: f64,
    pub skill_saturation: f64,
    pub section_coverage: f64,
    pub experience_plausibility: f64,
    pub parseability: f64,
    pub impact_bonus: f64,
    pub penalty: f64,
    pub word_count: usize,
    pub skills_found: usize,
    pub matched_reference_skills: Vec<String>,
}

impl AtsReport {
    fn empty() -> Self {
        Self {
            score: 0.0,
            skill_saturation: 0.0,
            section_coverage: 0.0,
            experience_plausibility: 0.0,
            parseability: 0.0,
            impact_bonus: 0.0,
            penalty: 0.0,
            word_count: 0,
            skills_found: 0,
            matched_reference_skills: vec![],
        }
    }
}

/// ATS score in [0, 100]. Blank input scores 0 without evaluating any signal.
pub fn ats_score(raw_text: &str, reference_skills: Option<&SkillSet>) -> f64 {
    assess_document(raw_text, reference_skills).score
}

pub fn assess_document(raw_text: &str, reference_skills: Option<&SkillSet>) -> AtsReport {
    if raw_text.trim().is_empty() {
        return AtsReport::empty();
    }

    let lowered = raw_text.to_lowercase();
    let word_count = lowered.split_whitespace().count();
    let resume_skills = extract_skills(raw_text);

    // An empty reference set carries no information; fall back to absolute counts.
    let reference = reference_skills.filter(|r| !r.is_empty());
    let (skill_saturation, matched_reference_skills) = match reference {
        Some(reference) => {
            let found: HashSet<String> = resume_skills.iter().map(|s| s.to_lowercase()).collect();
            let matched: Vec<String> = reference
                .iter()
                .filter(|s| found.contains(&s.to_lowercase()))
                .cloned()
                .collect();
            let ratio = matched.len() as f64 / reference.len() as f64;
            (saturation_curve(ratio), matched)
        }
        None => (
            (resume_skills.len() as f64 / UNREFERENCED_SKILL_SATURATION).min(1.0),
            vec![],
        ),
    };

    let section_coverage = ATS_SECTIONS
        .iter()
        .filter(|s| lowered.contains(*s))
        .count() as f64
        / ATS_SECTIONS.len() as f64;

    let experience_plausibility = experience_tier(extract_experience(raw_text));
    let parseability = parseability_tier(word_count);

    let impact_hits = IMPACT_KEYWORDS
        .iter()
        .filter(|k| lowered.contains(*k))
        .count();
    let impact_bonus = match impact_hits {
        n if n >= 6 => 0.12,
        n if n >= 3 => 0.08,
        _ => 0.0,
    };

    let mut penalty = 0.0;
    if word_count < SHORT_TEXT_WORDS {
        penalty += 0.1;
    }
    if resume_skills.len() > STUFFING_SKILL_COUNT {
        penalty += 0.1;
    }
    let penalty: f64 = f64::min(penalty, MAX_PENALTY);

    let base = SKILL_WEIGHT * skill_saturation
        + SECTION_WEIGHT * section_coverage
        + EXPERIENCE_WEIGHT * experience_plausibility
        + PARSEABILITY_WEIGHT * parseability;
    let score = round_to((base + impact_bonus - penalty).clamp(0.0, 1.0) * 100.0, 2);

    AtsReport {
        score,
        skill_saturation,
        section_coverage,
        experience_plausibility,
        parseability,
        impact_bonus,
        penalty,
        word_count,
        skills_found: resume_skills.len(),
        matched_reference_skills,
    }
}

fn saturation_curve(ratio: f64) -> f64 {
    if ratio >= 0.6 {
        1.0
    } else if ratio >= 0.4 {
        0.85
    } else if ratio >= 0.25 {
        0.7
    } else {
        ratio
    }
}

/// Zero years still earns moderate credit; missing dates are common for graduates.
fn experience_tier(years: f64) -> f64 {
    if years == 0.0 {
        0.6
    } else if years <= 2.0 {
        0.7
    } else if years <= 5.0 {
        0.85
    } else {
        1.0
    }
}

fn parseability_tier(word_count: usize) -> f64 {
    match word_count {
        0..=79 => 0.3,
        80..=149 => 0.6,
        150..=299 => 0.85,
        _ => 1.0,
    }
}
