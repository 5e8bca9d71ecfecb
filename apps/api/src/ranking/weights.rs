use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ranking::RankingError;

/// Per-request weights for the four ranking signals.
///
/// Any non-negative combination is legal, including all zeros (final score 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub relevance: f64,
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.education + self.relevance
    }

    pub fn validate(&self) -> Result<(), RankingError> {
        let all = [
            ("skills", self.skills),
            ("experience", self.experience),
            ("education", self.education),
            ("relevance", self.relevance),
        ];
        for (name, value) in all {
            if !value.is_finite() || value < 0.0 {
                return Err(RankingError::InvalidInput(format!(
                    "weight '{name}' must be a non-negative number, got {value}"
                )));
            }
        }
        if !self.sum().is_finite() {
            return Err(RankingError::InvalidInput(
                "weights are too large to combine".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Weights {
    fn default() -> Self {
        RankingPriorities::default().weights()
    }
}

/// Caller-facing priority label for a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Ignore,
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn weight(self) -> f64 {
        match self {
            Priority::Ignore => 0.0,
            Priority::Low => 0.25,
            Priority::Medium => 0.5,
            Priority::High => 0.75,
            Priority::Critical => 1.0,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("Invalid priority value '{0}'. Must be one of Ignore | Low | Medium | High | Critical")]
pub struct UnknownPriority(pub String);

impl FromStr for Priority {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        [
            Priority::Ignore,
            Priority::Low,
            Priority::Medium,
            Priority::High,
            Priority::Critical,
        ]
        .into_iter()
        .find(|p| format!("{p:?}").eq_ignore_ascii_case(label))
        .ok_or_else(|| UnknownPriority(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingPriorities {
    pub skills: Priority,
    pub experience: Priority,
    pub education: Priority,
    pub relevance: Priority,
}

impl Default for RankingPriorities {
    fn default() -> Self {
        Self {
            skills: Priority::High,
            experience: Priority::Medium,
            education: Priority::Low,
            relevance: Priority::Low,
        }
    }
}

impl RankingPriorities {
    /// Parses optional labels; a missing label keeps that signal's default.
    pub fn parse(
        skills: Option<&str>,
        experience: Option<&str>,
        education: Option<&str>,
        relevance: Option<&str>,
    ) -> Result<Self, UnknownPriority> {
        let defaults = Self::default();
        let resolve = |label: Option<&str>, fallback: Priority| match label {
            Some(l) if !l.trim().is_empty() => l.parse::<Priority>(),
            _ => Ok(fallback),
        };
        Ok(Self {
            skills: resolve(skills, defaults.skills)?,
            experience: resolve(experience, defaults.experience)?,
            education: resolve(education, defaults.education)?,
            relevance: resolve(relevance, defaults.relevance)?,
        })
    }

    pub fn weights(&self) -> Weights {
        Weights {
            skills: self.skills.weight(),
            experience: self.experience.weight(),
            education: self.education.weight(),
            relevance: self.relevance.weight(),
        }
    }
}
