use std::sync::Arc;

use crate::config::Config;
use crate::extraction::{TextExtractor, TextNormalizer};

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data; every scan builds its own documents and scores.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable document-to-text extractor. Default: PdfTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
    /// Normalizer feeding the relevance scorer. Default: BasicNormalizer.
    pub normalizer: Arc<dyn TextNormalizer>,
}
