//! Dense 0/1 label matrix.

use serde::{Deserialize, Serialize};

use crate::error::{MaydayError, Result};

/// A dense, row-major matrix of 0/1 labels.
///
/// Rows are messages, columns are categories. Construction validates that
/// every row has the same width and that every value is 0 or 1; afterwards
/// the matrix is immutable except through [`set`](LabelMatrix::set), which
/// keeps the invariant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelMatrix {
    data: Vec<u8>,
    n_rows: usize,
    n_cols: usize,
}

impl LabelMatrix {
    /// Create a label matrix from rows.
    ///
    /// Fails if rows have inconsistent widths or contain values other than
    /// 0 and 1. An empty row list yields a 0×0 matrix.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |row| row.len());

        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(MaydayError::data(format!(
                    "Label row {i} has {} columns, expected {n_cols}",
                    row.len()
                )));
            }
            for &value in &row {
                if value > 1 {
                    return Err(MaydayError::data(format!(
                        "Label row {i} contains non-binary value {value}"
                    )));
                }
            }
            data.extend(row);
        }

        Ok(LabelMatrix {
            data,
            n_rows,
            n_cols,
        })
    }

    /// Create a matrix of zeros.
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        LabelMatrix {
            data: vec![0; n_rows * n_cols],
            n_rows,
            n_cols,
        }
    }

    /// Number of rows (messages).
    pub fn rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns (categories).
    pub fn cols(&self) -> usize {
        self.n_cols
    }

    /// Shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// Check if the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Get the value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> u8 {
        assert!(row < self.n_rows && col < self.n_cols, "position out of bounds");
        self.data[row * self.n_cols + col]
    }

    /// Set the value at `(row, col)`; the value is clamped to 0/1.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        assert!(row < self.n_rows && col < self.n_cols, "position out of bounds");
        self.data[row * self.n_cols + col] = value.min(1);
    }

    /// Get row `row` as a slice.
    pub fn row(&self, row: usize) -> &[u8] {
        let start = row * self.n_cols;
        &self.data[start..start + self.n_cols]
    }

    /// Collect column `col` into a vector.
    pub fn column(&self, col: usize) -> Vec<u8> {
        (0..self.n_rows).map(|row| self.get(row, col)).collect()
    }

    /// Iterate over rows as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks(self.n_cols.max(1)).take(self.n_rows)
    }

    /// Sum of each column (messages per category).
    pub fn column_sums(&self) -> Vec<u64> {
        let mut sums = vec![0u64; self.n_cols];
        for row in self.iter_rows() {
            for (sum, &value) in sums.iter_mut().zip(row) {
                *sum += u64::from(value);
            }
        }
        sums
    }
}
