//! Default text normalization for the relevance scorer.
//!
//! Output is lowercase, alphabetic-only and stop-word free. Skill, experience
//! and education extraction never see this text.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::ranking::vocabulary::is_stop_word;

pub trait TextNormalizer: Send + Sync {
    fn normalize(&self, raw: &str) -> String;
}

static URL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"http\S+")
        .map_err(|e| warn!("URL pattern failed to compile: {e}"))
        .ok()
});

static EMAIL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\S+@\S+")
        .map_err(|e| warn!("E-mail pattern failed to compile: {e}"))
        .ok()
});

/// Lowercases, strips URLs, e-mail addresses and non-letters, drops stop words.
/// No lemmatization is applied.
pub struct BasicNormalizer;

impl TextNormalizer for BasicNormalizer {
    fn normalize(&self, raw: &str) -> String {
        if raw.trim().is_empty() {
            return String::new();
        }

        let mut text = raw.to_lowercase();
        for pattern in [&URL_PATTERN, &EMAIL_PATTERN] {
            if let Some(re) = pattern.as_ref() {
                text = re.replace_all(&text, " ").into_owned();
            }
        }

        let letters: String = text
            .chars()
            .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
            .collect();

        letters
            .split_whitespace()
            .filter(|w| !is_stop_word(w))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_urls_emails_and_punctuation() {
        let out = BasicNormalizer
            .normalize("Contact: jane@example.com, https://github.com/jane — Full-Stack Engineer!");
        assert_eq!(out, "contact fullstack engineer");
    }

    #[test]
    fn test_drops_stop_words_and_digits() {
        let out = BasicNormalizer.normalize("The 5 years of Rust and C++ work");
        assert_eq!(out, "years rust c work");
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(BasicNormalizer.normalize("  \n "), "");
    }
}
