//! Text normalization ahead of vectorization.
//!
//! A raw cell value is split on whitespace runs, every token is reduced to
//! its stem, and the stems are re-joined with single spaces. Stemming is
//! repeated until a token stops changing, so normalizing already normalized
//! text is a no-op.

use std::sync::Arc;

use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::stem::{FixpointStemmer, PorterStemmer, StemFilter, Stemmer};
use crate::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer};
use crate::error::Result;

/// Collapses whitespace and stems every token of a text value.
///
/// ```
/// use textcluster::analysis::normalizer::TextNormalizer;
///
/// let normalizer = TextNormalizer::new();
/// assert_eq!(normalizer.normalize("  Running   dogs\tbarked ").unwrap(), "run dog bark");
/// assert_eq!(normalizer.normalize("").unwrap(), "");
/// assert_eq!(normalizer.normalize_opt(None).unwrap(), None);
/// ```
#[derive(Clone)]
pub struct TextNormalizer {
    tokenizer: WhitespaceTokenizer,
    stem_filter: StemFilter,
}

impl TextNormalizer {
    /// Create a normalizer using the Porter stemmer.
    pub fn new() -> Self {
        Self::with_stemmer(Arc::new(PorterStemmer::new()))
    }

    /// Create a normalizer with a custom stemmer, applied to a fixpoint.
    pub fn with_stemmer(stemmer: Arc<dyn Stemmer>) -> Self {
        TextNormalizer {
            tokenizer: WhitespaceTokenizer::new(),
            stem_filter: StemFilter::with_stemmer(Arc::new(FixpointStemmer::new(stemmer))),
        }
    }

    /// Normalize a possibly absent value. Absent input stays absent.
    pub fn normalize_opt(&self, text: Option<&str>) -> Result<Option<String>> {
        text.map(|t| self.normalize(t)).transpose()
    }

    /// Normalize a text value. Empty input is returned unchanged.
    pub fn normalize(&self, text: &str) -> Result<String> {
        if text.is_empty() {
            return Ok(String::new());
        }

        let tokens = self.stem_filter.filter(self.tokenizer.tokenize(text)?)?;
        let stems: Vec<String> = tokens.map(|token| token.text).collect();

        Ok(stems.join(" "))
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("stemmer", &self.stem_filter.stemmer().name())
            .finish()
    }
}
