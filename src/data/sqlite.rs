//! SQLite loading for the message table.

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Column, Row};

use crate::data::record::MessageRecord;
use crate::data::table::MessageTable;
use crate::error::{MaydayError, Result};

/// Name of the table holding the prepared messages.
pub const MESSAGE_TABLE_NAME: &str = "disasterdata";

/// Columns that are not category indicators.
const FIXED_COLUMNS: &[&str] = &["id", "message", "original", "genre"];

/// Load the message table from a file-backed SQLite database.
///
/// The table must carry the fixed columns `id, message, original, genre`;
/// every other column is treated as a 0/1 category indicator, in declared
/// order. An unreadable path, a missing table, or a non-binary label value
/// is an error; there are no retries.
pub async fn load_table(database_path: &Path) -> Result<MessageTable> {
    if !database_path.is_file() {
        return Err(MaydayError::data(format!(
            "Database file not found: {}",
            database_path.display()
        )));
    }

    let options = SqliteConnectOptions::new()
        .filename(database_path)
        .read_only(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    let rows = sqlx::query(&format!("SELECT * FROM {MESSAGE_TABLE_NAME}"))
        .fetch_all(&pool)
        .await?;
    pool.close().await;

    let first = rows.first().ok_or_else(|| {
        MaydayError::data(format!("Table {MESSAGE_TABLE_NAME} contains no rows"))
    })?;

    let column_names: Vec<String> = first
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    for fixed in FIXED_COLUMNS {
        if !column_names.iter().any(|name| name == fixed) {
            return Err(MaydayError::data(format!(
                "Table {MESSAGE_TABLE_NAME} is missing the {fixed} column"
            )));
        }
    }

    let category_names: Vec<String> = column_names
        .into_iter()
        .filter(|name| !FIXED_COLUMNS.contains(&name.as_str()))
        .collect();
    if category_names.is_empty() {
        return Err(MaydayError::data(format!(
            "Table {MESSAGE_TABLE_NAME} has no category columns"
        )));
    }

    let mut records = Vec::with_capacity(rows.len());
    for row in &rows {
        let id: i64 = row.try_get("id")?;
        let message: String = row.try_get("message")?;
        let original: Option<String> = row.try_get("original")?;
        let genre: String = row.try_get("genre")?;

        let mut labels = Vec::with_capacity(category_names.len());
        for name in &category_names {
            let value: i64 = row.try_get(name.as_str())?;
            if value != 0 && value != 1 {
                return Err(MaydayError::data(format!(
                    "Record {id} has non-binary value {value} in category {name}"
                )));
            }
            labels.push(value as u8);
        }

        let mut record = MessageRecord::new(id, message, genre, labels);
        record.original = original;
        records.push(record);
    }

    tracing::debug!(
        records = records.len(),
        categories = category_names.len(),
        "loaded message table"
    );

    MessageTable::new(records, category_names)
}
