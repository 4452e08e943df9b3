//! Data model for disaster-response messages.
//!
//! This module provides the in-memory representation of the message table
//! (records with a fixed set of binary category labels), the label matrix
//! used for training and evaluation, the SQLite loader, and the seeded
//! train/test split.

pub mod labels;
pub mod record;
pub mod split;
pub mod sqlite;
pub mod table;

// Re-export commonly used types
pub use labels::LabelMatrix;
pub use record::MessageRecord;
pub use split::train_test_split;
pub use sqlite::load_table;
pub use table::MessageTable;
