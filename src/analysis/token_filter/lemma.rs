//! Lemmatization token filter.
//!
//! Reduces each token to its dictionary base form so that "floods",
//! "supplies", and "children" count toward the same vocabulary entries as
//! "flood", "supply", and "child". Lemmatization here is noun-oriented, the
//! same scope the classifier was trained with; verb inflections like
//! "flooding" are left untouched.
//!
//! # Examples
//!
//! ```
//! use mayday::analysis::token_filter::Filter;
//! use mayday::analysis::token_filter::lemma::LemmaFilter;
//! use mayday::analysis::token::Token;
//!
//! let filter = LemmaFilter::new();
//! let tokens = vec![Token::new("supplies", 0), Token::new("children", 1)];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result[0].text, "supply");
//! assert_eq!(result[1].text, "child");
//! ```

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Trait for lemmatization algorithms.
pub trait Lemmatizer: Send + Sync {
    /// Reduce a word to its dictionary base form.
    ///
    /// Must be idempotent: `lemmatize(lemmatize(w)) == lemmatize(w)`.
    fn lemmatize(&self, word: &str) -> String;

    /// Get the name of this lemmatizer.
    fn name(&self) -> &'static str;
}

/// Irregular plurals that no suffix rule recovers.
const EXCEPTIONS: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("buses", "bus"),
    ("children", "child"),
    ("crises", "crisis"),
    ("diagnoses", "diagnosis"),
    ("feet", "foot"),
    ("gases", "gas"),
    ("geese", "goose"),
    ("heroes", "hero"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("loaves", "loaf"),
    ("mice", "mouse"),
    ("oases", "oasis"),
    ("people", "person"),
    ("potatoes", "potato"),
    ("teeth", "tooth"),
    ("tomatoes", "tomato"),
    ("viruses", "virus"),
    ("wives", "wife"),
    ("women", "woman"),
];

/// Ordered noun suffix rules; the first matching rule wins.
///
/// The bare `s` rule is guarded separately in [`RuleLemmatizer::lemmatize`]:
/// it never fires on short words or on `ss`/`us`/`is` endings, which keeps
/// the whole rule set idempotent.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("lves", "lf"),
    ("rves", "rf"),
    ("ies", "y"),
    ("men", "man"),
];

/// Rule-based noun lemmatizer.
///
/// Applies an exception table for irregular plurals, then ordered suffix
/// substitution rules. Results are cached; the cache is shared behind a
/// read-write lock so one lemmatizer instance can serve the trainer's
/// parallel workers and the dashboard's handlers.
pub struct RuleLemmatizer {
    exceptions: AHashMap<&'static str, &'static str>,
    cache: RwLock<AHashMap<String, String>>,
}

impl RuleLemmatizer {
    /// Create a new rule lemmatizer.
    pub fn new() -> Self {
        RuleLemmatizer {
            exceptions: EXCEPTIONS.iter().copied().collect(),
            cache: RwLock::new(AHashMap::new()),
        }
    }

    fn apply_rules(&self, word: &str) -> String {
        if let Some(lemma) = self.exceptions.get(word) {
            return (*lemma).to_string();
        }

        for (suffix, replacement) in SUFFIX_RULES {
            if *suffix == "ies" && word.len() <= 4 {
                // "ties", "lies" and friends lemmatize by dropping the final
                // "s", not by the ies -> y rule
                continue;
            }
            if let Some(stem) = word.strip_suffix(suffix) {
                return format!("{stem}{replacement}");
            }
        }

        if word.len() > 3
            && word.ends_with('s')
            && !word.ends_with("ss")
            && !word.ends_with("us")
            && !word.ends_with("is")
        {
            return word[..word.len() - 1].to_string();
        }

        word.to_string()
    }
}

impl Default for RuleLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer for RuleLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = self.cache.read().get(word) {
            return lemma.clone();
        }

        let lemma = self.apply_rules(word);
        self.cache
            .write()
            .insert(word.to_string(), lemma.clone());
        lemma
    }

    fn name(&self) -> &'static str {
        "rule"
    }
}

/// Filter that applies lemmatization to tokens.
pub struct LemmaFilter {
    /// The lemmatizer to use.
    lemmatizer: Box<dyn Lemmatizer>,
}

impl std::fmt::Debug for LemmaFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LemmaFilter")
            .field("lemmatizer", &self.lemmatizer.name())
            .finish()
    }
}

impl LemmaFilter {
    /// Create a new lemma filter with the rule lemmatizer.
    pub fn new() -> Self {
        LemmaFilter {
            lemmatizer: Box::new(RuleLemmatizer::new()),
        }
    }

    /// Create a lemma filter with a custom lemmatizer.
    pub fn with_lemmatizer(lemmatizer: Box<dyn Lemmatizer>) -> Self {
        LemmaFilter { lemmatizer }
    }
}

impl Default for LemmaFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for LemmaFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                if token.is_stopped() {
                    token
                } else {
                    let lemma = self.lemmatizer.lemmatize(&token.text);
                    token.with_text(lemma)
                }
            })
            .collect::<Vec<_>>();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lemma"
    }
}
