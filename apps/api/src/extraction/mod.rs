//! Collaborators that turn uploaded documents into text the ranking engine can score.
//!
//! Both are carried in `AppState` as trait objects so tests and alternative
//! backends can be swapped in without touching handlers.

pub mod normalize;
pub mod pdf;

pub use normalize::{BasicNormalizer, TextNormalizer};
pub use pdf::{PdfTextExtractor, TextExtractor};
