//! Tokenizer implementations for splitting text into tokens.
//!
//! # Available Tokenizers
//!
//! - [`regex::RegexTokenizer`] - Extracts tokens matching a regex pattern
//! - [`whitespace::WhitespaceTokenizer`] - Splits on whitespace runs

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that split text into a stream of tokens.
///
/// The trait requires `Send + Sync` so tokenizers can be shared across the
/// trainer's worker threads and the dashboard's handler tasks.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a finite, restartable token stream.
    ///
    /// Empty input yields an empty stream; tokenization itself has no error
    /// conditions beyond pipeline construction.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer.
    fn name(&self) -> &'static str;
}

pub mod regex;
pub mod whitespace;

pub use regex::RegexTokenizer;
pub use whitespace::WhitespaceTokenizer;
