//! The end-to-end classification pipeline and the `Model` trait.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::message::MessageAnalyzer;
use crate::data::labels::LabelMatrix;
use crate::error::{MaydayError, Result};
use crate::ml::forest::{ForestConfig, MultiOutputForest};
use crate::ml::vectorizer::{CountVectorizer, TfidfTransformer, VectorizerConfig};

/// Trait for trainable multi-label message classifiers.
///
/// Both the plain [`ClassificationPipeline`] and the grid-searched wrapper
/// implement this trait, so callers pick a strategy without caring which
/// one they got.
///
/// [`ClassificationPipeline`]: crate::ml::pipeline::ClassificationPipeline
pub trait Model: Send + Sync {
    /// Train on messages and their label matrix.
    fn fit(&mut self, messages: &[String], labels: &LabelMatrix) -> Result<()>;

    /// Predict the label matrix for messages (rows × categories).
    fn predict(&self, messages: &[String]) -> Result<LabelMatrix>;

    /// The ordered category names this model predicts.
    fn category_names(&self) -> &[String];

    /// Check if the model has been trained.
    fn is_trained(&self) -> bool;

    /// Get the name of this model (for logs and CLI output).
    fn name(&self) -> &'static str;
}

/// Combined configuration for a pipeline candidate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Vectorizer settings.
    pub vectorizer: VectorizerConfig,

    /// Forest settings.
    pub forest: ForestConfig,
}

/// The fitted artifact: vectorizer + IDF weights + per-category forests.
///
/// Created by a training run, written once via
/// [`save_model`](crate::ml::artifact::save_model), and loaded read-only by
/// serving processes. The analyzer chain is fixed and reconstructed on load.
#[derive(Serialize, Deserialize)]
pub struct ClassificationPipeline {
    vectorizer: CountVectorizer,
    tfidf: TfidfTransformer,
    forest: MultiOutputForest,
    category_names: Vec<String>,
    trained_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for ClassificationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationPipeline")
            .field("vectorizer", &self.vectorizer)
            .field("forest", &self.forest)
            .field("categories", &self.category_names.len())
            .field("trained_at", &self.trained_at)
            .finish()
    }
}

impl ClassificationPipeline {
    /// Create an untrained pipeline with default configuration.
    pub fn new(category_names: Vec<String>) -> Self {
        Self::with_config(category_names, PipelineConfig::default())
    }

    /// Create an untrained pipeline with explicit configuration.
    pub fn with_config(category_names: Vec<String>, config: PipelineConfig) -> Self {
        ClassificationPipeline {
            vectorizer: CountVectorizer::new(
                Arc::new(MessageAnalyzer::default()),
                config.vectorizer,
            ),
            tfidf: TfidfTransformer::new(config.vectorizer.use_idf),
            forest: MultiOutputForest::new(config.forest),
            category_names,
            trained_at: None,
        }
    }

    /// The configuration this pipeline was built with.
    pub fn config(&self) -> PipelineConfig {
        PipelineConfig {
            vectorizer: *self.vectorizer.config(),
            forest: *self.forest.config(),
        }
    }

    /// When the pipeline was trained, if it has been.
    pub fn trained_at(&self) -> Option<DateTime<Utc>> {
        self.trained_at
    }

    /// Size of the fitted vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    /// Transform messages into the feature matrix.
    fn features(&self, messages: &[String]) -> Result<Vec<Vec<f64>>> {
        messages
            .par_iter()
            .map(|message| {
                let counts = self.vectorizer.transform(message)?;
                self.tfidf.transform(&counts)
            })
            .collect()
    }

    /// Predict the label vector for a single message.
    pub fn predict_message(&self, message: &str) -> Result<Vec<u8>> {
        let predictions = self.predict(std::slice::from_ref(&message.to_string()))?;
        Ok(predictions.row(0).to_vec())
    }
}

impl Model for ClassificationPipeline {
    fn fit(&mut self, messages: &[String], labels: &LabelMatrix) -> Result<()> {
        if messages.len() != labels.rows() {
            return Err(MaydayError::model(format!(
                "Got {} messages but {} label rows",
                messages.len(),
                labels.rows()
            )));
        }
        if labels.cols() != self.category_names.len() {
            return Err(MaydayError::model(format!(
                "Label matrix has {} categories but the pipeline expects {}",
                labels.cols(),
                self.category_names.len()
            )));
        }

        self.vectorizer.fit(messages)?;

        let counts = messages
            .par_iter()
            .map(|message| self.vectorizer.transform(message))
            .collect::<Result<Vec<_>>>()?;
        self.tfidf.fit(&counts)?;

        let features = counts
            .par_iter()
            .map(|row| self.tfidf.transform(row))
            .collect::<Result<Vec<_>>>()?;

        self.forest.fit(&features, labels)?;
        self.trained_at = Some(Utc::now());

        tracing::info!(
            messages = messages.len(),
            vocabulary = self.vectorizer.vocabulary_size(),
            categories = self.category_names.len(),
            "trained classification pipeline"
        );

        Ok(())
    }

    fn predict(&self, messages: &[String]) -> Result<LabelMatrix> {
        if !self.is_trained() {
            return Err(MaydayError::model("Pipeline has not been trained"));
        }
        if messages.is_empty() {
            return Ok(LabelMatrix::zeros(0, self.category_names.len()));
        }

        let features = self.features(messages)?;
        self.forest.predict(&features)
    }

    fn category_names(&self) -> &[String] {
        &self.category_names
    }

    fn is_trained(&self) -> bool {
        self.forest.is_trained()
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}
