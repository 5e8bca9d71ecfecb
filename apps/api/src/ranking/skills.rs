//! Skill Extractor: matches the fixed skill vocabulary against raw document text.
//!
//! Raw text is required: normalization strips tokens like "C++" and "C#".

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::ranking::vocabulary::{keyword_pattern, SKILL_VOCABULARY};

/// Canonical skill names found in a document. Ordered for stable output.
pub type SkillSet = BTreeSet<String>;

struct SkillPattern {
    name: &'static str,
    regex: Regex,
}

static SKILL_PATTERNS: LazyLock<Vec<SkillPattern>> = LazyLock::new(|| {
    SKILL_VOCABULARY
        .iter()
        .filter_map(|&name| match Regex::new(&keyword_pattern(name)) {
            Ok(regex) => Some(SkillPattern { name, regex }),
            Err(e) => {
                warn!("Skipping skill '{name}': pattern failed to compile: {e}");
                None
            }
        })
        .collect()
});

/// Returns every vocabulary skill mentioned in `text`. Each skill appears at
/// most once regardless of how often it occurs.
pub fn extract_skills(text: &str) -> SkillSet {
    if text.trim().is_empty() {
        return SkillSet::new();
    }

    let lowered = text.to_lowercase();
    SKILL_PATTERNS
        .iter()
        .filter(|p| p.regex.is_match(&lowered))
        .map(|p| p.name.to_string())
        .collect()
}

/// Skills present in both sets, compared case-insensitively, in the query's spelling.
pub fn matched_skills(query: &SkillSet, candidate: &SkillSet) -> Vec<String> {
    let candidate_lower: HashSet<String> = candidate.iter().map(|s| s.to_lowercase()).collect();
    query
        .iter()
        .filter(|s| candidate_lower.contains(&s.to_lowercase()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const RESUME: &str = r#"
        Jane Smith
        Skills: Python, Django, AWS, Docker
        Built CI/CD pipelines and REST API services in Node.js.
    "#;

    #[test]
    fn test_extracts_expected_skills() {
        let skills = extract_skills(RESUME);
        for expected in ["Python", "Django", "AWS", "Docker", "CI/CD", "REST API", "Node.js"] {
            assert!(skills.contains(expected), "missing {expected}: {skills:?}");
        }
    }

    #[test]
    fn test_c_family_is_distinguished() {
        let skills = extract_skills("Proficient in C++ and C#");
        assert!(skills.contains("C++"));
        assert!(skills.contains("C#"));
        assert!(!skills.contains("C"));
    }

    #[test]
    fn test_single_letter_skill_not_matched_inside_word() {
        let skills = extract_skills("Managed the Data Center Relocation");
        assert!(!skills.contains("C"));
        assert!(!skills.contains("R"));
    }

    #[test]
    fn test_case_insensitive_and_deduplicated() {
        let skills = extract_skills("PYTHON python Python");
        assert_eq!(skills.len(), 1);
        assert!(skills.contains("Python"));
    }

    #[test]
    fn test_empty_text_yields_empty_set() {
        assert!(extract_skills("").is_empty());
        assert!(extract_skills("   \n").is_empty());
    }

    #[test]
    fn test_matched_skills_intersection() {
        let query = extract_skills("Python, Django and AWS");
        let candidate = extract_skills("aws python kotlin");
        assert_eq!(matched_skills(&query, &candidate), vec!["AWS", "Python"]);
    }

    proptest! {
        #[test]
        fn extraction_is_idempotent(s in ".{0,200}") {
            prop_assert_eq!(extract_skills(&s), extract_skills(&s));
        }

        #[test]
        fn extracted_skills_come_from_vocabulary(s in "[a-zA-Z+#/., ]{0,200}") {
            for skill in extract_skills(&s) {
                prop_assert!(SKILL_VOCABULARY.contains(&skill.as_str()));
            }
        }
    }
}
