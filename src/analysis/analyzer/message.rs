//! The canonical analyzer for disaster-response messages.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lemma::LemmaFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::remove_empty::RemoveEmptyFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::token_filter::strip::StripFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::Result;

/// Analyzer producing the cleaned tokens the classifier is trained on.
///
/// The chain is fixed: replace everything outside `[A-Za-z0-9]` with a
/// space, tokenize on alphanumeric runs, lowercase, drop English stop words,
/// lemmatize, strip surrounding whitespace, and drop empties. Training,
/// evaluation, and serving must all use this same chain; a vocabulary fitted
/// against one analyzer is meaningless for tokens from another.
///
/// # Examples
///
/// ```
/// use mayday::analysis::analyzer::Analyzer;
/// use mayday::analysis::analyzer::message::MessageAnalyzer;
///
/// let analyzer = MessageAnalyzer::new().unwrap();
/// let tokens: Vec<_> = analyzer
///     .analyze("We need food and water!")
///     .unwrap()
///     .map(|t| t.text)
///     .collect();
///
/// assert_eq!(tokens, vec!["need", "food", "water"]);
/// ```
pub struct MessageAnalyzer {
    inner: PipelineAnalyzer,
}

impl MessageAnalyzer {
    /// Create a new message analyzer with the default chain.
    pub fn new() -> Result<Self> {
        let tokenizer = Arc::new(RegexTokenizer::new()?);
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_char_filter(Arc::new(PatternReplaceCharFilter::alphanumeric()?))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(StopFilter::new()))
            .add_filter(Arc::new(LemmaFilter::new()))
            .add_filter(Arc::new(StripFilter::new()))
            .add_filter(Arc::new(RemoveEmptyFilter::new()))
            .with_name("message".to_string());

        Ok(Self { inner: analyzer })
    }

    /// Analyze text and collect the token texts into a vector.
    ///
    /// Convenience for callers that only need the cleaned strings, like the
    /// vectorizer and the dashboard's token counter.
    pub fn token_texts(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyze(text)?.map(|token| token.text).collect())
    }
}

impl Default for MessageAnalyzer {
    fn default() -> Self {
        Self::new().expect("Message analyzer should be creatable with default settings")
    }
}

impl Analyzer for MessageAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "message"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl Debug for MessageAnalyzer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_analyzer() {
        let analyzer = MessageAnalyzer::new().unwrap();

        let tokens = analyzer
            .token_texts("Houses are flooded, we need shelters!")
            .unwrap();

        assert_eq!(tokens, vec!["house", "flooded", "need", "shelter"]);
    }

    #[test]
    fn test_message_analyzer_empty_input() {
        let analyzer = MessageAnalyzer::new().unwrap();
        assert!(analyzer.token_texts("").unwrap().is_empty());
        assert!(analyzer.token_texts("...!?").unwrap().is_empty());
    }

    #[test]
    fn test_output_alphabet() {
        let analyzer = MessageAnalyzer::new().unwrap();
        let tokens = analyzer
            .token_texts("EARTHQUAKE hit @ 06:30 -- 120 injured, c'est grave")
            .unwrap();

        for token in &tokens {
            assert!(
                token.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
                "token {token:?} contains characters outside [a-z0-9]"
            );
        }
    }

    #[test]
    fn test_no_stop_words_in_output() {
        let analyzer = MessageAnalyzer::new().unwrap();
        let stop = StopFilter::new();
        let tokens = analyzer
            .token_texts("There is a fire and we are not able to leave the building")
            .unwrap();

        for token in &tokens {
            assert!(!stop.is_stop_word(token), "stop word {token:?} survived");
        }
    }

    #[test]
    fn test_idempotent_on_clean_input() {
        let analyzer = MessageAnalyzer::new().unwrap();

        let once = analyzer.token_texts("village flood child water 911").unwrap();
        let again = analyzer.token_texts(&once.join(" ")).unwrap();

        assert_eq!(once, again);
    }

    #[test]
    fn test_analyzer_name() {
        assert_eq!(MessageAnalyzer::new().unwrap().name(), "message");
    }
}
