//! Analyzers that combine tokenizers and filters into complete pipelines.
//!
//! # Role in the Analysis Pipeline
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Token Filters → Token Stream
//! ```
//!
//! # Available Implementations
//!
//! - [`pipeline::PipelineAnalyzer`] - Custom char filter + tokenizer + filter chains
//! - [`message::MessageAnalyzer`] - The canonical disaster-message chain

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so one analyzer instance can be shared
/// between the trainer's worker threads and the dashboard's handler tasks.
/// The same instance must be used for fitting and for serving: the fitted
/// vocabulary is only meaningful for token streams produced the same way.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    ///
    /// Empty input yields an empty stream.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Provide access to the concrete type for downcasting.
    fn as_any(&self) -> &dyn std::any::Any;
}

pub mod message;
pub mod pipeline;

pub use message::MessageAnalyzer;
pub use pipeline::PipelineAnalyzer;
