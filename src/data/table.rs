//! The in-memory message table.

use serde::{Deserialize, Serialize};

use crate::data::labels::LabelMatrix;
use crate::data::record::MessageRecord;
use crate::error::{MaydayError, Result};

/// The loaded message table: records plus the fixed, ordered category set.
///
/// The category set is established when the table is built and never changes
/// afterwards; a model trained against one table can only serve predictions
/// for tables with the identical category list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MessageTable {
    records: Vec<MessageRecord>,
    category_names: Vec<String>,
}

impl MessageTable {
    /// Create a table from records and category names.
    ///
    /// Fails if any record's label count differs from the category count.
    pub fn new(records: Vec<MessageRecord>, category_names: Vec<String>) -> Result<Self> {
        for record in &records {
            if record.labels.len() != category_names.len() {
                return Err(MaydayError::data(format!(
                    "Record {} has {} labels, expected {}",
                    record.id,
                    record.labels.len(),
                    category_names.len()
                )));
            }
        }

        Ok(MessageTable {
            records,
            category_names,
        })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records in table order.
    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    /// The ordered category names.
    pub fn category_names(&self) -> &[String] {
        &self.category_names
    }

    /// Collect the message texts in table order.
    pub fn messages(&self) -> Vec<String> {
        self.records.iter().map(|r| r.message.clone()).collect()
    }

    /// Iterate over the genre tags in table order.
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.genre.as_str())
    }

    /// Build the label matrix (rows in table order, columns in category order).
    pub fn labels(&self) -> Result<LabelMatrix> {
        LabelMatrix::from_rows(self.records.iter().map(|r| r.labels.clone()).collect())
    }

    /// Build a table containing the records at `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> Result<Self> {
        let records = indices
            .iter()
            .map(|&i| {
                self.records.get(i).cloned().ok_or_else(|| {
                    MaydayError::data(format!("Record index {i} out of bounds"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        MessageTable::new(records, self.category_names.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> MessageTable {
        MessageTable::new(
            vec![
                MessageRecord::new(1, "we need water", "direct", vec![1, 0]),
                MessageRecord::new(2, "storm warning issued", "news", vec![0, 1]),
                MessageRecord::new(3, "food supplies low", "social", vec![1, 0]),
            ],
            vec!["water".to_string(), "storm".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_table_accessors() {
        let table = sample_table();
        assert_eq!(table.len(), 3);
        assert_eq!(table.category_names(), &["water", "storm"]);
        assert_eq!(table.messages()[1], "storm warning issued");
        assert_eq!(table.genres().collect::<Vec<_>>(), vec!["direct", "news", "social"]);
    }

    #[test]
    fn test_table_labels() {
        let table = sample_table();
        let labels = table.labels().unwrap();
        assert_eq!(labels.shape(), (3, 2));
        assert_eq!(labels.column(0), vec![1, 0, 1]);
    }

    #[test]
    fn test_label_count_mismatch_rejected() {
        let result = MessageTable::new(
            vec![MessageRecord::new(1, "help", "direct", vec![1])],
            vec!["water".to_string(), "storm".to_string()],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_select() {
        let table = sample_table();
        let subset = table.select(&[2, 0]).unwrap();
        assert_eq!(subset.len(), 2);
        assert_eq!(subset.records()[0].id, 3);
        assert_eq!(subset.records()[1].id, 1);

        assert!(table.select(&[9]).is_err());
    }
}
