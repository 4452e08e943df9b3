//! Multi-output random forest over per-category smartcore classifiers.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::data::labels::LabelMatrix;
use crate::error::{MaydayError, Result};

/// Configuration for the per-category forests.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees per forest.
    pub n_trees: u16,

    /// Minimum number of samples required to split a node.
    pub min_samples_split: usize,

    /// Seed for the bootstrap sampling.
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        ForestConfig {
            n_trees: 200,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

/// The trained model for a single category.
///
/// A category whose training column never varies gets no forest; it
/// predicts its constant instead. Small prepared datasets routinely contain
/// such columns and smartcore rejects single-class training sets.
#[derive(Serialize, Deserialize)]
enum CategoryModel {
    Constant(u8),
    Forest(Box<RandomForestClassifier<f64, i32, DenseMatrix<f64>, Vec<i32>>>),
}

/// One random-forest classifier per category over a shared feature matrix.
///
/// Forest training is delegated to `smartcore`; categories train in
/// parallel on the rayon pool.
#[derive(Serialize, Deserialize)]
pub struct MultiOutputForest {
    config: ForestConfig,
    models: Vec<CategoryModel>,
}

impl std::fmt::Debug for MultiOutputForest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiOutputForest")
            .field("config", &self.config)
            .field("n_categories", &self.models.len())
            .finish()
    }
}

fn dense_matrix(features: &[Vec<f64>]) -> Result<DenseMatrix<f64>> {
    let n_rows = features.len();
    let n_cols = features
        .first()
        .map(|row| row.len())
        .ok_or_else(|| MaydayError::model("Feature matrix has no rows"))?;

    let mut data = Vec::with_capacity(n_rows * n_cols);
    for row in features {
        if row.len() != n_cols {
            return Err(MaydayError::model(format!(
                "Feature row has {} columns, expected {n_cols}",
                row.len()
            )));
        }
        data.extend_from_slice(row);
    }

    Ok(DenseMatrix::new(n_rows, n_cols, data, false))
}

impl MultiOutputForest {
    /// Create a new, untrained multi-output forest.
    pub fn new(config: ForestConfig) -> Self {
        MultiOutputForest {
            config,
            models: Vec::new(),
        }
    }

    /// The forest configuration.
    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    /// Number of categories this forest was trained for.
    pub fn n_categories(&self) -> usize {
        self.models.len()
    }

    /// Check if the forest has been trained.
    pub fn is_trained(&self) -> bool {
        !self.models.is_empty()
    }

    /// Train one forest per label column.
    pub fn fit(&mut self, features: &[Vec<f64>], labels: &LabelMatrix) -> Result<()> {
        if features.len() != labels.rows() {
            return Err(MaydayError::model(format!(
                "Feature matrix has {} rows but label matrix has {}",
                features.len(),
                labels.rows()
            )));
        }
        if labels.cols() == 0 {
            return Err(MaydayError::model("Label matrix has no categories"));
        }

        let x = dense_matrix(features)?;
        let config = self.config;

        self.models = (0..labels.cols())
            .into_par_iter()
            .map(|col| {
                let column = labels.column(col);
                let first = column[0];
                if column.iter().all(|&value| value == first) {
                    return Ok(CategoryModel::Constant(first));
                }

                let y: Vec<i32> = column.iter().map(|&value| value as i32).collect();
                let params = RandomForestClassifierParameters::default()
                    .with_n_trees(config.n_trees)
                    .with_min_samples_split(config.min_samples_split)
                    .with_seed(config.seed);

                let forest = RandomForestClassifier::fit(&x, &y, params).map_err(|e| {
                    MaydayError::model(format!("Failed to train forest for category {col}: {e}"))
                })?;

                Ok(CategoryModel::Forest(Box::new(forest)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(())
    }

    /// Predict the label matrix for a feature matrix.
    pub fn predict(&self, features: &[Vec<f64>]) -> Result<LabelMatrix> {
        if !self.is_trained() {
            return Err(MaydayError::model("Forest has not been trained"));
        }
        if features.is_empty() {
            return Ok(LabelMatrix::zeros(0, self.models.len()));
        }

        let x = dense_matrix(features)?;
        let mut predictions = LabelMatrix::zeros(features.len(), self.models.len());

        for (col, model) in self.models.iter().enumerate() {
            match model {
                CategoryModel::Constant(value) => {
                    for row in 0..features.len() {
                        predictions.set(row, col, *value);
                    }
                }
                CategoryModel::Forest(forest) => {
                    let predicted = forest.predict(&x).map_err(|e| {
                        MaydayError::model(format!(
                            "Prediction failed for category {col}: {e}"
                        ))
                    })?;
                    for (row, &value) in predicted.iter().enumerate() {
                        predictions.set(row, col, value.clamp(0, 1) as u8);
                    }
                }
            }
        }

        Ok(predictions)
    }
}
