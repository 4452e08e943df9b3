//! Token filter implementations for token transformation.
//!
//! Filters transform token streams produced by tokenizers. The message
//! pipeline chains them as:
//!
//! ```text
//! Tokenizer → Lowercase → Stop Words → Lemmatize → Strip → Remove Empty
//! ```
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`stop::StopFilter`] - Removes stop words
//! - [`lemma::LemmaFilter`] - Reduces words to their dictionary lemma
//! - [`strip::StripFilter`] - Trims surrounding whitespace
//! - [`remove_empty::RemoveEmptyFilter`] - Removes empty and stopped tokens

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// All token filters must implement this trait to be used in the analysis
/// pipeline. Filters receive a stream of tokens and produce a new stream,
/// allowing them to modify, filter, or drop tokens.
///
/// The trait requires `Send + Sync` to allow use in concurrent contexts.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod lemma;
pub mod lowercase;
pub mod remove_empty;
pub mod stop;
pub mod strip;

pub use lemma::{LemmaFilter, Lemmatizer, RuleLemmatizer};
pub use lowercase::LowercaseFilter;
pub use remove_empty::RemoveEmptyFilter;
pub use stop::StopFilter;
pub use strip::StripFilter;
