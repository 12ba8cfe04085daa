//! Minimum-length token filter.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Removes tokens with fewer than `min_length` characters.
///
/// With the default of 2 this reproduces the classic "two or more word
/// characters" term pattern used by bag-of-words vectorizers.
#[derive(Clone, Debug)]
pub struct LengthFilter {
    min_length: usize,
}

impl LengthFilter {
    /// Create a filter keeping tokens of at least `min_length` characters.
    pub fn new(min_length: usize) -> Self {
        LengthFilter { min_length }
    }

    /// The configured minimum length.
    pub fn min_length(&self) -> usize {
        self.min_length
    }
}

impl Default for LengthFilter {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Filter for LengthFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let min_length = self.min_length;
        let filtered_tokens: Vec<Token> = tokens
            .filter(|token| token.char_len() >= min_length)
            .collect();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "length"
    }
}
