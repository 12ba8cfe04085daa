//! Token filter implementations for token transformation.
//!
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`length::LengthFilter`] - Drops tokens shorter than a minimum length
//! - [`stop::StopFilter`] - Removes stop words
//! - [`stem::StemFilter`] - Reduces words to their stem form
//!
//! Filters are chained after a tokenizer inside an analyzer:
//!
//! ```text
//! Tokenizer → Lowercase → Length → Stop Words → Vocabulary
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// Filters receive a stream of tokens and produce a new stream, allowing
/// them to modify or drop tokens. The trait requires `Send + Sync` to allow
/// use in concurrent contexts.
///
/// # Examples
///
/// ```
/// use textcluster::analysis::token::{Token, TokenStream};
/// use textcluster::analysis::token_filter::Filter;
/// use textcluster::error::Result;
///
/// struct ReverseFilter;
///
/// impl Filter for ReverseFilter {
///     fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
///         let reversed: Vec<Token> = tokens
///             .map(|mut t| {
///                 t.text = t.text.chars().rev().collect();
///                 t
///             })
///             .collect();
///         Ok(Box::new(reversed.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "reverse"
///     }
/// }
/// ```
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod length;
pub mod lowercase;
pub mod stem;
pub mod stop;

pub use length::LengthFilter;
pub use lowercase::LowercaseFilter;
pub use stem::StemFilter;
pub use stop::StopFilter;
