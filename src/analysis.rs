//! Text analysis module for Mayday.
//!
//! This module provides the text processing functionality shared by the
//! trainer and the dashboard: character-level normalization, tokenization,
//! and token filtering chained into analyzers. The same analyzer instance is
//! used on both the training path and the serving path so that the fitted
//! vocabulary always matches the tokens produced at inference time.

pub mod analyzer;
pub mod char_filter;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::*;
pub use char_filter::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
