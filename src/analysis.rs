//! Text analysis for clustering.
//!
//! Two independent paths live here:
//!
//! - [`normalizer::TextNormalizer`] turns a raw cell value into its stemmed,
//!   whitespace-collapsed form before vectorization.
//! - [`analyzer::PipelineAnalyzer`] splits normalized text into the terms the
//!   vectorizer counts (tokenizer followed by a chain of token filters).

pub mod analyzer;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{Analyzer, PipelineAnalyzer};
pub use normalizer::TextNormalizer;
pub use token::{Token, TokenStream};
