//! Message record type.

use serde::{Deserialize, Serialize};

/// A single disaster-response message with its category labels.
///
/// Labels are 0/1 indicators, one per category, in the table's category
/// order. The category set is fixed at data-preparation time; every record
/// in a table carries the same number of labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Identifier from the source table
    pub id: i64,

    /// The message text (translated to English)
    pub message: String,

    /// The original-language text, when it differs from `message`
    pub original: Option<String>,

    /// Coarse source-type tag ("direct", "news", "social")
    pub genre: String,

    /// 0/1 category indicators, one per category
    pub labels: Vec<u8>,
}

impl MessageRecord {
    /// Create a new message record.
    pub fn new<S: Into<String>>(id: i64, message: S, genre: S, labels: Vec<u8>) -> Self {
        MessageRecord {
            id,
            message: message.into(),
            original: None,
            genre: genre.into(),
            labels,
        }
    }

    /// Set the original-language text.
    pub fn with_original<S: Into<String>>(mut self, original: S) -> Self {
        self.original = Some(original.into());
        self
    }
}
