//! Per-category evaluation of predicted label matrices.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::labels::LabelMatrix;
use crate::error::{MaydayError, Result};

/// Precision/recall/F1 for a single category.
///
/// Metrics treat label 1 as the positive class and define `0/0` as `0.0`,
/// which is what a category with no positive examples degrades to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryMetrics {
    /// Category name.
    pub name: String,
    /// tp / (tp + fp), or 0.0 when nothing was predicted positive.
    pub precision: f64,
    /// tp / (tp + fn), or 0.0 when the category has no positive examples.
    pub recall: f64,
    /// Harmonic mean of precision and recall, or 0.0 when both are 0.
    pub f1: f64,
    /// Number of true positive examples in the evaluation set.
    pub support: u64,
}

/// Evaluation report: per-category metrics plus unweighted means.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Per-category metrics, in category order.
    pub categories: Vec<CategoryMetrics>,
    /// Unweighted mean precision across categories.
    pub mean_precision: f64,
    /// Unweighted mean recall across categories.
    pub mean_recall: f64,
    /// Unweighted mean F1 across categories.
    pub mean_f1: f64,
}

/// Compare predicted labels against the truth, category by category.
///
/// The matrices must have identical shape and the category name list must
/// match their width; anything else is an error, with no partial result.
pub fn evaluate(
    predicted: &LabelMatrix,
    truth: &LabelMatrix,
    category_names: &[String],
) -> Result<EvaluationReport> {
    if predicted.shape() != truth.shape() {
        return Err(MaydayError::invalid_argument(format!(
            "Prediction shape {:?} does not match truth shape {:?}",
            predicted.shape(),
            truth.shape()
        )));
    }
    if category_names.len() != truth.cols() {
        return Err(MaydayError::invalid_argument(format!(
            "Got {} category names for {} label columns",
            category_names.len(),
            truth.cols()
        )));
    }

    let mut categories = Vec::with_capacity(category_names.len());
    for (col, name) in category_names.iter().enumerate() {
        let mut tp = 0u64;
        let mut fp = 0u64;
        let mut fn_ = 0u64;

        for row in 0..truth.rows() {
            match (predicted.get(row, col), truth.get(row, col)) {
                (1, 1) => tp += 1,
                (1, 0) => fp += 1,
                (0, 1) => fn_ += 1,
                _ => {}
            }
        }

        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        categories.push(CategoryMetrics {
            name: name.clone(),
            precision,
            recall,
            f1,
            support: tp + fn_,
        });
    }

    let n = categories.len() as f64;
    let report = EvaluationReport {
        mean_precision: categories.iter().map(|c| c.precision).sum::<f64>() / n.max(1.0),
        mean_recall: categories.iter().map(|c| c.recall).sum::<f64>() / n.max(1.0),
        mean_f1: categories.iter().map(|c| c.f1).sum::<f64>() / n.max(1.0),
        categories,
    };

    Ok(report)
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<24} {:>9} {:>9} {:>9} {:>9}",
            "CATEGORY", "precision", "recall", "f1", "support"
        )?;
        writeln!(f, "{}", "-".repeat(64))?;
        for c in &self.categories {
            writeln!(
                f,
                "{:<24} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                c.name, c.precision, c.recall, c.f1, c.support
            )?;
        }
        writeln!(f, "{}", "-".repeat(64))?;
        writeln!(f, "Average precision: {:.2}", self.mean_precision)?;
        writeln!(f, "Average recall:    {:.2}", self.mean_recall)?;
        write!(f, "Average f1:        {:.2}", self.mean_f1)
    }
}
