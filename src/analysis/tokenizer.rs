//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step of an analysis pipeline: they split text into
//! tokens which token filters then transform.
//!
//! - [`whitespace::WhitespaceTokenizer`] - Splits on whitespace runs
//! - [`regex::RegexTokenizer`] - Emits every match of a pattern (default `\w+`)
//! - [`unicode_word::UnicodeWordTokenizer`] - Uses Unicode word boundaries
//!
//! # Examples
//!
//! ```
//! use textcluster::analysis::tokenizer::Tokenizer;
//! use textcluster::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello   world").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so one tokenizer can be shared by
/// concurrent pipeline runs.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod regex;
pub mod unicode_word;
pub mod whitespace;

pub use self::regex::RegexTokenizer;
pub use unicode_word::UnicodeWordTokenizer;
pub use whitespace::WhitespaceTokenizer;

/// Word tokenizer selection for the vectorizer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerKind {
    /// Regex `\w+` matches.
    #[default]
    Regex,
    /// Unicode (UAX #29) word segments.
    UnicodeWord,
}
