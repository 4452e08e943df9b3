//! Regex-based replacement char filter.

use regex::Regex;

use crate::analysis::char_filter::CharFilter;
use crate::error::{MaydayError, Result};

/// A char filter that replaces characters matching a regex pattern.
///
/// The message pipeline uses this with the pattern `[^A-Za-z0-9]` and a
/// single-space replacement so that punctuation and other symbols become
/// token boundaries instead of token content.
#[derive(Clone, Debug)]
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| MaydayError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(Self {
            pattern: regex,
            replacement: replacement.to_string(),
        })
    }

    /// Create the filter used by the message pipeline: every character
    /// outside `[A-Za-z0-9]` becomes a space.
    pub fn alphanumeric() -> Result<Self> {
        Self::new(r"[^A-Za-z0-9]", " ")
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        self.pattern.replace_all(input, self.replacement.as_str()).into_owned()
    }

    fn name(&self) -> &'static str {
        "pattern_replace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_replace() {
        let filter = PatternReplaceCharFilter::new(r"\d+", "#").unwrap();
        assert_eq!(filter.filter("call 911 now"), "call # now");
    }

    #[test]
    fn test_alphanumeric_filter() {
        let filter = PatternReplaceCharFilter::alphanumeric().unwrap();
        assert_eq!(
            filter.filter("We need food, water & shelter!"),
            "We need food  water   shelter "
        );
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(PatternReplaceCharFilter::new(r"[", " ").is_err());
    }

    #[test]
    fn test_filter_name() {
        let filter = PatternReplaceCharFilter::alphanumeric().unwrap();
        assert_eq!(filter.name(), "pattern_replace");
    }
}
