//! Stemming token filter and stemmer implementations.

use std::sync::Arc;

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for stemming algorithms.
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

pub mod porter;

pub use porter::PorterStemmer;

/// Upper bound on passes of [`FixpointStemmer`]. Every rewrite of a real
/// stemmer shortens the word, so words settle long before this.
pub const MAX_STEM_PASSES: usize = 16;

/// Applies an inner stemmer until the word stops changing.
///
/// A single Porter pass is not idempotent: "agreed" stems to "agre", which
/// stems to "agr". Stemming to a fixpoint makes `stem(stem(w)) == stem(w)`
/// hold.
///
/// ```
/// use std::sync::Arc;
/// use textcluster::analysis::token_filter::stem::{FixpointStemmer, PorterStemmer, Stemmer};
///
/// assert_eq!(PorterStemmer::new().stem("agreed"), "agre");
///
/// let stemmer = FixpointStemmer::new(Arc::new(PorterStemmer::new()));
/// assert_eq!(stemmer.stem("agreed"), "agr");
/// ```
#[derive(Clone)]
pub struct FixpointStemmer {
    inner: Arc<dyn Stemmer>,
    max_passes: usize,
}

impl FixpointStemmer {
    pub fn new(inner: Arc<dyn Stemmer>) -> Self {
        FixpointStemmer {
            inner,
            max_passes: MAX_STEM_PASSES,
        }
    }

    /// The stemmer applied on every pass.
    pub fn inner(&self) -> &dyn Stemmer {
        self.inner.as_ref()
    }
}

impl std::fmt::Debug for FixpointStemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixpointStemmer")
            .field("inner", &self.inner.name())
            .field("max_passes", &self.max_passes)
            .finish()
    }
}

impl Stemmer for FixpointStemmer {
    fn stem(&self, word: &str) -> String {
        let mut current = self.inner.stem(word);
        for _ in 0..self.max_passes {
            let next = self.inner.stem(&current);
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

/// Filter that applies stemming to tokens.
#[derive(Clone)]
pub struct StemFilter {
    stemmer: Arc<dyn Stemmer>,
}

impl std::fmt::Debug for StemFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StemFilter")
            .field("stemmer", &self.stemmer.name())
            .finish()
    }
}

impl StemFilter {
    /// Create a new stem filter with the Porter stemmer.
    pub fn new() -> Self {
        Self::with_stemmer(Arc::new(PorterStemmer::new()))
    }

    /// Create a stem filter with a custom stemmer.
    pub fn with_stemmer(stemmer: Arc<dyn Stemmer>) -> Self {
        StemFilter { stemmer }
    }

    /// The wrapped stemmer.
    pub fn stemmer(&self) -> &dyn Stemmer {
        self.stemmer.as_ref()
    }
}

impl Default for StemFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StemFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let stemmer = Arc::clone(&self.stemmer);
        Ok(Box::new(tokens.map(move |token| {
            let stemmed = stemmer.stem(&token.text);
            token.with_text(stemmed)
        })))
    }

    fn name(&self) -> &'static str {
        "stem"
    }
}
