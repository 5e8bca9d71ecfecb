//! Education Signal: coarse keyword tiers over raw text.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::warn;

use crate::ranking::vocabulary::{is_short_term, DEGREE_KEYWORDS, HIGHER_DEGREE_KEYWORDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationTier {
    HigherDegree,
    Degree,
    Mentioned,
    None,
}

impl EducationTier {
    pub fn score(self) -> f64 {
        match self {
            EducationTier::HigherDegree => 1.0,
            EducationTier::Degree => 0.5,
            EducationTier::Mentioned => 0.3,
            EducationTier::None => 0.0,
        }
    }
}

/// Long keywords match as substrings ("masters", "university's"); short ones
/// ("ms", "bs") need word boundaries so "systems" is not a degree but "(PhD)" is.
enum KeywordMatcher {
    Substring(&'static str),
    Bounded(Regex),
}

impl KeywordMatcher {
    fn matches(&self, lowered: &str) -> bool {
        match self {
            KeywordMatcher::Substring(keyword) => lowered.contains(keyword),
            KeywordMatcher::Bounded(re) => re.is_match(lowered),
        }
    }
}

fn compile(keywords: &[&'static str]) -> Vec<KeywordMatcher> {
    keywords
        .iter()
        .filter_map(|&keyword| {
            if !is_short_term(keyword) {
                return Some(KeywordMatcher::Substring(keyword));
            }
            match Regex::new(&format!(r"\b{}\b", regex::escape(keyword))) {
                Ok(re) => Some(KeywordMatcher::Bounded(re)),
                Err(e) => {
                    warn!("Skipping education keyword '{keyword}': {e}");
                    None
                }
            }
        })
        .collect()
}

static HIGHER_DEGREE: LazyLock<Vec<KeywordMatcher>> =
    LazyLock::new(|| compile(HIGHER_DEGREE_KEYWORDS));
static DEGREE: LazyLock<Vec<KeywordMatcher>> = LazyLock::new(|| compile(DEGREE_KEYWORDS));

pub fn education_tier(text: &str) -> EducationTier {
    let lowered = text.to_lowercase();
    if HIGHER_DEGREE.iter().any(|m| m.matches(&lowered)) {
        EducationTier::HigherDegree
    } else if DEGREE.iter().any(|m| m.matches(&lowered)) {
        EducationTier::Degree
    } else if lowered.contains("education") {
        EducationTier::Mentioned
    } else {
        EducationTier::None
    }
}

/// One of `0.0`, `0.3`, `0.5`, `1.0`.
pub fn education_score(text: &str) -> f64 {
    education_tier(text).score()
}
