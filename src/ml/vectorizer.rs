//! Count vectorization and TF-IDF weighting for message text.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::message::MessageAnalyzer;
use crate::error::{MaydayError, Result};

/// Configuration for the count vectorizer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    /// Inclusive range of word n-gram sizes, e.g. `(1, 2)` for unigrams and
    /// bigrams.
    pub ngram_range: (usize, usize),

    /// Terms appearing in more than this fraction of documents are excluded
    /// from the vocabulary.
    pub max_df: f64,

    /// Whether to apply inverse-document-frequency weighting.
    pub use_idf: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        VectorizerConfig {
            ngram_range: (1, 1),
            max_df: 1.0,
            use_idf: true,
        }
    }
}

impl VectorizerConfig {
    fn validate(&self) -> Result<()> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(MaydayError::invalid_argument(format!(
                "ngram range ({min_n}, {max_n}) is not a valid inclusive range"
            )));
        }
        if !(0.0..=1.0).contains(&self.max_df) || self.max_df == 0.0 {
            return Err(MaydayError::invalid_argument(format!(
                "max_df must be in (0, 1], got {}",
                self.max_df
            )));
        }
        Ok(())
    }
}

fn default_analyzer() -> Arc<dyn Analyzer> {
    Arc::new(MessageAnalyzer::default())
}

/// Count vectorizer over analyzer tokens.
///
/// `fit` builds a vocabulary of word n-grams from the training documents;
/// `transform` maps a document to its term-count vector against that fixed
/// vocabulary. The analyzer is part of the contract but not of the
/// serialized state: the message chain is fixed, so deserialization
/// reconstructs it.
#[derive(Serialize, Deserialize)]
pub struct CountVectorizer {
    config: VectorizerConfig,
    /// Term -> column index, in sorted term order.
    vocabulary: HashMap<String, usize>,
    n_documents: usize,
    #[serde(skip, default = "default_analyzer")]
    analyzer: Arc<dyn Analyzer>,
}

impl std::fmt::Debug for CountVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountVectorizer")
            .field("config", &self.config)
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl CountVectorizer {
    /// Create a new count vectorizer with the given analyzer and config.
    pub fn new(analyzer: Arc<dyn Analyzer>, config: VectorizerConfig) -> Self {
        CountVectorizer {
            config,
            vocabulary: HashMap::new(),
            n_documents: 0,
            analyzer,
        }
    }

    /// Create a vectorizer with the default message analyzer and config.
    pub fn with_defaults() -> Self {
        Self::new(default_analyzer(), VectorizerConfig::default())
    }

    /// The vectorizer configuration.
    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    /// Get the size of the fitted vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Extract the n-gram terms of a document.
    fn terms(&self, document: &str) -> Result<Vec<String>> {
        let tokens: Vec<String> = self
            .analyzer
            .analyze(document)?
            .map(|token| token.text)
            .collect();

        let (min_n, max_n) = self.config.ngram_range;
        let mut terms = Vec::with_capacity(tokens.len() * (max_n - min_n + 1));
        for n in min_n..=max_n {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        Ok(terms)
    }

    /// Fit the vocabulary on training documents.
    ///
    /// Terms with a document frequency above `max_df * n_documents` are
    /// dropped. Vocabulary indices follow sorted term order so repeated fits
    /// over the same corpus are identical.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        self.config.validate()?;
        if documents.is_empty() {
            return Err(MaydayError::model("Cannot fit vectorizer on zero documents"));
        }

        self.n_documents = documents.len();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let unique_terms: HashSet<String> = self.terms(doc)?.into_iter().collect();
            for term in unique_terms {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let max_count = self.config.max_df * self.n_documents as f64;
        let mut kept: Vec<String> = document_frequency
            .into_iter()
            .filter(|&(_, df)| (df as f64) <= max_count)
            .map(|(term, _)| term)
            .collect();
        kept.sort_unstable();

        self.vocabulary = kept
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx))
            .collect();

        if self.vocabulary.is_empty() {
            return Err(MaydayError::model(
                "Vectorizer vocabulary is empty after fitting; lower max_df or check the corpus",
            ));
        }

        Ok(())
    }

    /// Transform a document into its term-count vector.
    pub fn transform(&self, document: &str) -> Result<Vec<f64>> {
        if self.vocabulary.is_empty() {
            return Err(MaydayError::model("Vectorizer has not been fitted"));
        }

        let mut counts = vec![0.0; self.vocabulary.len()];
        for term in self.terms(document)? {
            if let Some(&idx) = self.vocabulary.get(&term) {
                counts[idx] += 1.0;
            }
        }
        Ok(counts)
    }
}

/// Inverse-document-frequency transformer with L2 normalization.
///
/// Uses the smoothed formula `idf = ln((1 + n) / (1 + df)) + 1`. With
/// `use_idf` disabled the transform degrades to plain L2 normalization of
/// the count vector, which keeps the two grid-search variants comparable.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TfidfTransformer {
    use_idf: bool,
    idf: Vec<f64>,
}

impl TfidfTransformer {
    /// Create a new transformer.
    pub fn new(use_idf: bool) -> Self {
        TfidfTransformer {
            use_idf,
            idf: Vec::new(),
        }
    }

    /// Fit IDF weights from the count matrix.
    pub fn fit(&mut self, counts: &[Vec<f64>]) -> Result<()> {
        if counts.is_empty() {
            return Err(MaydayError::model("Cannot fit IDF on zero documents"));
        }

        let n_terms = counts[0].len();
        let n_documents = counts.len() as f64;
        let mut document_frequency = vec![0usize; n_terms];

        for row in counts {
            if row.len() != n_terms {
                return Err(MaydayError::model(format!(
                    "Count row has {} terms, expected {n_terms}",
                    row.len()
                )));
            }
            for (df, &count) in document_frequency.iter_mut().zip(row) {
                if count > 0.0 {
                    *df += 1;
                }
            }
        }

        self.idf = document_frequency
            .into_iter()
            .map(|df| ((1.0 + n_documents) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        Ok(())
    }

    /// Transform a count vector into a weighted, L2-normalized vector.
    pub fn transform(&self, counts: &[f64]) -> Result<Vec<f64>> {
        if self.idf.is_empty() {
            return Err(MaydayError::model("IDF transformer has not been fitted"));
        }
        if counts.len() != self.idf.len() {
            return Err(MaydayError::model(format!(
                "Count vector has {} terms, expected {}",
                counts.len(),
                self.idf.len()
            )));
        }

        let mut weighted: Vec<f64> = if self.use_idf {
            counts.iter().zip(&self.idf).map(|(c, idf)| c * idf).collect()
        } else {
            counts.to_vec()
        };

        let norm = weighted.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut weighted {
                *value /= norm;
            }
        }

        Ok(weighted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fit_transform() {
        let documents = docs(&[
            "we need water and food",
            "water pipes burst in the flood",
            "shelter needed after the storm",
        ]);

        let mut vectorizer = CountVectorizer::with_defaults();
        vectorizer.fit(&documents).unwrap();
        assert!(vectorizer.vocabulary_size() > 0);

        let counts = vectorizer.transform("water water shelter").unwrap();
        assert_eq!(counts.len(), vectorizer.vocabulary_size());
        assert_eq!(counts.iter().sum::<f64>(), 3.0);
    }

    #[test]
    fn test_unknown_terms_ignored() {
        let documents = docs(&["fire in the village"]);
        let mut vectorizer = CountVectorizer::with_defaults();
        vectorizer.fit(&documents).unwrap();

        let counts = vectorizer.transform("zzzz qqqq").unwrap();
        assert!(counts.iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_bigrams() {
        let documents = docs(&["water food shelter"]);
        let config = VectorizerConfig {
            ngram_range: (1, 2),
            ..VectorizerConfig::default()
        };
        let mut vectorizer = CountVectorizer::new(default_analyzer(), config);
        vectorizer.fit(&documents).unwrap();

        // unigrams: water, food, shelter; bigrams: "water food", "food shelter"
        assert_eq!(vectorizer.vocabulary_size(), 5);
    }

    #[test]
    fn test_max_df_drops_common_terms() {
        let documents = docs(&["water fire", "water quake", "water storm", "water wind"]);
        let config = VectorizerConfig {
            max_df: 0.5,
            ..VectorizerConfig::default()
        };
        let mut vectorizer = CountVectorizer::new(default_analyzer(), config);
        vectorizer.fit(&documents).unwrap();

        // "water" appears in every document and is dropped
        assert_eq!(vectorizer.vocabulary_size(), 4);
        let counts = vectorizer.transform("water").unwrap();
        assert!(counts.iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let documents = docs(&["water"]);

        let mut vectorizer = CountVectorizer::new(
            default_analyzer(),
            VectorizerConfig {
                ngram_range: (2, 1),
                ..VectorizerConfig::default()
            },
        );
        assert!(vectorizer.fit(&documents).is_err());

        let mut vectorizer = CountVectorizer::new(
            default_analyzer(),
            VectorizerConfig {
                max_df: 0.0,
                ..VectorizerConfig::default()
            },
        );
        assert!(vectorizer.fit(&documents).is_err());
    }

    #[test]
    fn test_transform_before_fit_fails() {
        let vectorizer = CountVectorizer::with_defaults();
        assert!(vectorizer.transform("water").is_err());
    }

    #[test]
    fn test_idf_weighting() {
        let counts = vec![
            vec![1.0, 1.0, 0.0],
            vec![1.0, 0.0, 1.0],
            vec![1.0, 0.0, 0.0],
        ];
        let mut tfidf = TfidfTransformer::new(true);
        tfidf.fit(&counts).unwrap();

        let transformed = tfidf.transform(&[1.0, 1.0, 0.0]).unwrap();
        // The rarer second term outweighs the ubiquitous first
        assert!(transformed[1] > transformed[0]);

        let norm: f64 = transformed.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_idf_disabled_is_normalized_counts() {
        let counts = vec![vec![3.0, 4.0]];
        let mut tfidf = TfidfTransformer::new(false);
        tfidf.fit(&counts).unwrap();

        let transformed = tfidf.transform(&[3.0, 4.0]).unwrap();
        assert!((transformed[0] - 0.6).abs() < 1e-9);
        assert!((transformed[1] - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_zero_vector_stays_zero() {
        let counts = vec![vec![1.0, 0.0]];
        let mut tfidf = TfidfTransformer::new(true);
        tfidf.fit(&counts).unwrap();

        let transformed = tfidf.transform(&[0.0, 0.0]).unwrap();
        assert_eq!(transformed, vec![0.0, 0.0]);
    }
}
