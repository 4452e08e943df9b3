//! Exhaustive hyperparameter search over pipeline candidates.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::data::labels::LabelMatrix;
use crate::error::{MaydayError, Result};
use crate::ml::evaluate::evaluate;
use crate::ml::forest::ForestConfig;
use crate::ml::pipeline::{ClassificationPipeline, Model, PipelineConfig};
use crate::ml::vectorizer::VectorizerConfig;

/// The candidate values searched for each hyperparameter.
///
/// The default grid covers vectorizer n-gram range, document-frequency
/// cutoff, the IDF toggle, tree count, and split threshold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamGrid {
    /// Candidate n-gram ranges.
    pub ngram_ranges: Vec<(usize, usize)>,
    /// Candidate document-frequency cutoffs.
    pub max_dfs: Vec<f64>,
    /// Candidate IDF toggles.
    pub use_idf: Vec<bool>,
    /// Candidate tree counts.
    pub n_trees: Vec<u16>,
    /// Candidate split thresholds.
    pub min_samples_split: Vec<usize>,
}

impl Default for ParamGrid {
    fn default() -> Self {
        ParamGrid {
            ngram_ranges: vec![(1, 1), (1, 2)],
            max_dfs: vec![0.5, 0.75, 1.0],
            use_idf: vec![true, false],
            n_trees: vec![50, 100, 200],
            min_samples_split: vec![2, 3, 4],
        }
    }
}

impl ParamGrid {
    /// Enumerate every configuration in the grid.
    pub fn candidates(&self) -> Vec<PipelineConfig> {
        let mut candidates = Vec::new();
        for &ngram_range in &self.ngram_ranges {
            for &max_df in &self.max_dfs {
                for &use_idf in &self.use_idf {
                    for &n_trees in &self.n_trees {
                        for &min_samples_split in &self.min_samples_split {
                            candidates.push(PipelineConfig {
                                vectorizer: VectorizerConfig {
                                    ngram_range,
                                    max_df,
                                    use_idf,
                                },
                                forest: ForestConfig {
                                    n_trees,
                                    min_samples_split,
                                    ..ForestConfig::default()
                                },
                            });
                        }
                    }
                }
            }
        }
        candidates
    }
}

/// Exhaustive search over a [`ParamGrid`], scored by cross-validated mean F1.
///
/// Implements [`Model`] so callers can swap it in wherever a plain
/// [`ClassificationPipeline`] is used. `fit` scores every candidate with
/// k-fold cross-validation, then refits the best candidate on the full
/// training set; `predict` delegates to that refitted pipeline.
pub struct GridSearch {
    grid: ParamGrid,
    folds: usize,
    seed: u64,
    category_names: Vec<String>,
    best: Option<ClassificationPipeline>,
    best_config: Option<PipelineConfig>,
    best_score: f64,
}

impl GridSearch {
    /// Default number of cross-validation folds.
    pub const DEFAULT_FOLDS: usize = 3;

    /// Create a grid search over the default grid.
    pub fn new(category_names: Vec<String>) -> Self {
        GridSearch {
            grid: ParamGrid::default(),
            folds: Self::DEFAULT_FOLDS,
            seed: 42,
            category_names,
            best: None,
            best_config: None,
            best_score: 0.0,
        }
    }

    /// Use a custom parameter grid.
    pub fn with_grid(mut self, grid: ParamGrid) -> Self {
        self.grid = grid;
        self
    }

    /// Set the number of cross-validation folds.
    pub fn with_folds(mut self, folds: usize) -> Self {
        self.folds = folds;
        self
    }

    /// Set the shuffle seed for fold assignment.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// The configuration of the winning candidate, once fitted.
    pub fn best_config(&self) -> Option<&PipelineConfig> {
        self.best_config.as_ref()
    }

    /// The cross-validated score of the winning candidate, once fitted.
    pub fn best_score(&self) -> Option<f64> {
        self.best.is_some().then_some(self.best_score)
    }

    /// Consume the search and return the refitted winning pipeline.
    pub fn into_best(self) -> Result<ClassificationPipeline> {
        self.best
            .ok_or_else(|| MaydayError::model("Grid search has not been fitted"))
    }

    /// Assign row indices to folds by seeded shuffle.
    fn fold_indices(&self, n: usize) -> Vec<Vec<usize>> {
        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(self.seed);
        indices.shuffle(&mut rng);

        let mut folds = vec![Vec::new(); self.folds];
        for (i, index) in indices.into_iter().enumerate() {
            folds[i % self.folds].push(index);
        }
        folds
    }

    /// Cross-validated mean F1 of one candidate configuration.
    fn score_candidate(
        &self,
        config: PipelineConfig,
        messages: &[String],
        labels: &LabelMatrix,
        folds: &[Vec<usize>],
    ) -> Result<f64> {
        let mut total = 0.0;

        for (fold, holdout) in folds.iter().enumerate() {
            let train: Vec<usize> = folds
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != fold)
                .flat_map(|(_, f)| f.iter().copied())
                .collect();

            let select = |indices: &[usize]| -> Result<(Vec<String>, LabelMatrix)> {
                let texts = indices.iter().map(|&i| messages[i].clone()).collect();
                let rows = indices.iter().map(|&i| labels.row(i).to_vec()).collect();
                Ok((texts, LabelMatrix::from_rows(rows)?))
            };

            let (train_messages, train_labels) = select(&train)?;
            let (holdout_messages, holdout_labels) = select(holdout)?;

            let mut candidate =
                ClassificationPipeline::with_config(self.category_names.clone(), config);
            candidate.fit(&train_messages, &train_labels)?;

            let predicted = candidate.predict(&holdout_messages)?;
            let report = evaluate(&predicted, &holdout_labels, &self.category_names)?;
            total += report.mean_f1;
        }

        Ok(total / folds.len() as f64)
    }
}

impl Model for GridSearch {
    fn fit(&mut self, messages: &[String], labels: &LabelMatrix) -> Result<()> {
        if self.folds < 2 {
            return Err(MaydayError::invalid_argument(format!(
                "Grid search needs at least 2 folds, got {}",
                self.folds
            )));
        }
        if messages.len() < self.folds {
            return Err(MaydayError::model(format!(
                "Cannot split {} messages into {} folds",
                messages.len(),
                self.folds
            )));
        }

        let candidates = self.grid.candidates();
        if candidates.is_empty() {
            return Err(MaydayError::invalid_argument("Parameter grid is empty"));
        }

        let folds = self.fold_indices(messages.len());
        let mut best_config = None;
        let mut best_score = f64::NEG_INFINITY;

        for (i, config) in candidates.iter().enumerate() {
            let score = self.score_candidate(*config, messages, labels, &folds)?;
            tracing::info!(
                candidate = i + 1,
                total = candidates.len(),
                score,
                "scored grid-search candidate"
            );

            if score > best_score {
                best_score = score;
                best_config = Some(*config);
            }
        }

        let config = best_config
            .ok_or_else(|| MaydayError::model("No grid-search candidate could be scored"))?;
        let mut best = ClassificationPipeline::with_config(self.category_names.clone(), config);
        best.fit(messages, labels)?;

        self.best = Some(best);
        self.best_config = Some(config);
        self.best_score = best_score;

        tracing::info!(score = best_score, ?config, "grid search finished");
        Ok(())
    }

    fn predict(&self, messages: &[String]) -> Result<LabelMatrix> {
        let best = self
            .best
            .as_ref()
            .ok_or_else(|| MaydayError::model("Grid search has not been fitted"))?;
        best.predict(messages)
    }

    fn category_names(&self) -> &[String] {
        &self.category_names
    }

    fn is_trained(&self) -> bool {
        self.best.is_some()
    }

    fn name(&self) -> &'static str {
        "grid_search"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::test_util::toy_corpus;

    fn tiny_grid() -> ParamGrid {
        ParamGrid {
            ngram_ranges: vec![(1, 1)],
            max_dfs: vec![1.0],
            use_idf: vec![true, false],
            n_trees: vec![10],
            min_samples_split: vec![2],
        }
    }

    #[test]
    fn test_default_grid_size() {
        // 2 ngram ranges x 3 cutoffs x 2 idf toggles x 3 tree counts x 3 thresholds
        assert_eq!(ParamGrid::default().candidates().len(), 108);
    }

    #[test]
    fn test_grid_search_fit_and_predict() {
        let (messages, labels, categories) = toy_corpus();
        let mut search = GridSearch::new(categories)
            .with_grid(tiny_grid())
            .with_folds(2);

        assert!(!search.is_trained());
        search.fit(&messages, &labels).unwrap();
        assert!(search.is_trained());
        assert!(search.best_config().is_some());
        assert!(search.best_score().unwrap() >= 0.0);

        let predictions = search.predict(&messages).unwrap();
        assert_eq!(predictions.shape(), labels.shape());
    }

    #[test]
    fn test_predict_before_fit_fails() {
        let search = GridSearch::new(vec!["water".to_string()]);
        assert!(search.predict(&["help".to_string()]).is_err());
    }

    #[test]
    fn test_too_few_folds_rejected() {
        let (messages, labels, categories) = toy_corpus();
        let mut search = GridSearch::new(categories).with_folds(1);
        assert!(search.fit(&messages, &labels).is_err());
    }

    #[test]
    fn test_fold_assignment_covers_all_rows() {
        let search = GridSearch::new(vec!["water".to_string()]).with_folds(3);
        let folds = search.fold_indices(10);

        assert_eq!(folds.len(), 3);
        let mut all: Vec<usize> = folds.into_iter().flatten().collect();
        all.sort_unstable();
        assert_eq!(all, (0..10).collect::<Vec<_>>());
    }
}
