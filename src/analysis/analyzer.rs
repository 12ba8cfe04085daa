//! Analyzers combine a tokenizer with a chain of token filters.
//!
//! The vectorizer uses [`PipelineAnalyzer::terms`] to turn normalized text
//! into vocabulary terms:
//!
//! ```
//! use textcluster::analysis::analyzer::{Analyzer, PipelineAnalyzer};
//! use textcluster::analysis::token_filter::stop::StopWordSet;
//! use textcluster::analysis::tokenizer::TokenizerKind;
//!
//! let analyzer = PipelineAnalyzer::terms(TokenizerKind::Regex, 2, &StopWordSet::English);
//! let terms: Vec<_> = analyzer.analyze("The quick, brown fox!").unwrap().map(|t| t.text).collect();
//! assert_eq!(terms, vec!["quick", "brown", "fox"]);
//! ```

use std::sync::Arc;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::length::LengthFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stop::StopWordSet;
use crate::analysis::tokenizer::{RegexTokenizer, Tokenizer, TokenizerKind, UnicodeWordTokenizer};
use crate::error::Result;

/// Trait for analyzers that turn text into a token stream.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer.
    fn name(&self) -> &str;
}

/// A configurable analyzer that combines a tokenizer with a chain of filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// The term analyzer used for vocabulary building and matrix filling:
    /// word tokenizer, lowercase, minimum length, stop words.
    pub fn terms(kind: TokenizerKind, min_token_length: usize, stop_words: &StopWordSet) -> Self {
        let tokenizer: Arc<dyn Tokenizer> = match kind {
            TokenizerKind::Regex => Arc::new(RegexTokenizer::default()),
            TokenizerKind::UnicodeWord => Arc::new(UnicodeWordTokenizer::new()),
        };

        PipelineAnalyzer::new(tokenizer)
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(LengthFilter::new(min_token_length)))
            .add_filter(Arc::new(stop_words.to_filter()))
            .with_name("terms")
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = self.tokenizer.tokenize(text)?;

        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        Ok(tokens)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
