//! Relevance Scorer: TF-IDF vector space over the query plus the whole candidate batch.
//!
//! IDF weights are only comparable inside one fit, so the query and every
//! candidate are vectorized together, once per ranking request.
//!
//! Weighting: raw term counts × smoothed IDF (`ln((1 + n) / (1 + df)) + 1`),
//! then L2-normalized. Tokens are runs of two or more word characters with
//! English stop words removed.

use std::collections::{HashMap, HashSet};
use std::iter;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::ranking::vocabulary::is_stop_word;

static TOKEN_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\b\w\w+\b")
        .map_err(|e| warn!("Token pattern failed to compile: {e}"))
        .ok()
});

pub fn tokenize(text: &str) -> Vec<String> {
    let Some(re) = TOKEN_PATTERN.as_ref() else {
        return vec![];
    };
    let lowered = text.to_lowercase();
    re.find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !is_stop_word(t))
        .map(String::from)
        .collect()
}

/// Sparse term vector keyed by vocabulary index.
#[derive(Debug, Clone, Default)]
pub struct SparseVector(HashMap<usize, f64>);

impl SparseVector {
    pub fn norm(&self) -> f64 {
        self.0.values().map(|w| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (small, large) = if self.0.len() <= other.0.len() {
            (&self.0, &other.0)
        } else {
            (&other.0, &self.0)
        };
        small
            .iter()
            .filter_map(|(idx, w)| large.get(idx).map(|v| w * v))
            .sum()
    }
}

/// Vocabulary and IDF weights fitted over one batch of tokenized documents.
#[derive(Debug, Clone)]
pub struct TfIdfSpace {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfSpace {
    pub fn fit(documents: &[Vec<String>]) -> Self {
        let n = documents.len() as f64;
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();

        for doc in documents {
            let unique: HashSet<&str> = doc.iter().map(String::as_str).collect();
            for term in unique {
                let next = vocabulary.len();
                let idx = *vocabulary.entry(term.to_string()).or_insert(next);
                if idx == document_frequency.len() {
                    document_frequency.push(0);
                }
                document_frequency[idx] += 1;
            }
        }

        let idf = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        Self { vocabulary, idf }
    }

    #[cfg(test)]
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// L2-normalized TF-IDF vector. Terms outside the fitted vocabulary are ignored.
    pub fn transform(&self, tokens: &[String]) -> SparseVector {
        let mut weights: HashMap<usize, f64> = HashMap::new();
        for token in tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                *weights.entry(idx).or_insert(0.0) += self.idf[idx];
            }
        }

        let vector = SparseVector(weights);
        let norm = vector.norm();
        if norm == 0.0 {
            return vector;
        }
        SparseVector(vector.0.into_iter().map(|(i, w)| (i, w / norm)).collect())
    }
}

pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denominator = a.norm() * b.norm();
    if denominator == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denominator).clamp(0.0, 1.0)
}

/// Cosine similarity of the query against every corpus document, in corpus order.
///
/// Returns an empty vector for an empty query or an empty corpus.
pub fn relevance_scores<S: AsRef<str>>(query: &str, corpus: &[S]) -> Vec<f64> {
    if query.trim().is_empty() || corpus.is_empty() {
        return vec![];
    }

    let documents: Vec<Vec<String>> = iter::once(query)
        .chain(corpus.iter().map(|doc| doc.as_ref()))
        .map(tokenize)
        .collect();

    let space = TfIdfSpace::fit(&documents);
    let query_vector = space.transform(&documents[0]);

    documents[1..]
        .iter()
        .map(|doc| cosine_similarity(&query_vector, &space.transform(doc)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_document_scores_one() {
        let scores = relevance_scores("rust tokio axum", &["rust tokio axum"]);
        assert!((scores[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_document_scores_zero() {
        let scores = relevance_scores("rust tokio axum", &["painting pottery"]);
        assert_eq!(scores, vec![0.0]);
    }

    #[test]
    fn test_order_matches_corpus() {
        let corpus = ["python java", "rust tokio axum", "rust python"];
        let scores = relevance_scores("rust tokio axum", &corpus);
        assert_eq!(scores.len(), 3);
        assert!(scores[1] > scores[2]);
        assert!(scores[2] > scores[0]);
    }

    #[test]
    fn test_empty_inputs_yield_empty_result() {
        assert!(relevance_scores("", &["rust"]).is_empty());
        assert!(relevance_scores("   ", &["rust"]).is_empty());
        let empty: [&str; 0] = [];
        assert!(relevance_scores("rust", &empty).is_empty());
    }

    #[test]
    fn test_stop_words_only_scores_zero() {
        let scores = relevance_scores("the and of", &["the and of"]);
        assert_eq!(scores, vec![0.0]);
    }

    #[test]
    fn test_tokenize_drops_stop_words_and_single_chars() {
        assert_eq!(tokenize("The Rust engineer a b"), vec!["rust", "engineer"]);
    }

    #[test]
    fn test_idf_downweights_common_terms() {
        let docs: Vec<Vec<String>> = ["rust engineer", "python engineer", "java engineer"]
            .iter()
            .map(|d| tokenize(d))
            .collect();
        let space = TfIdfSpace::fit(&docs);
        assert_eq!(space.vocabulary_len(), 4);
        let v = space.transform(&tokenize("rust engineer"));
        let rust = space.transform(&tokenize("rust"));
        let engineer = space.transform(&tokenize("engineer"));
        assert!(v.dot(&rust) > v.dot(&engineer));
    }

    #[test]
    fn test_scores_are_bounded() {
        let scores = relevance_scores("rust rust tokio", &["rust", "tokio tokio", "rust tokio"]);
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
    }
}
