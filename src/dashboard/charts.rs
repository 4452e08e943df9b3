//! Overview aggregations for the dashboard charts.

use ahash::AHashMap;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::message::MessageAnalyzer;
use crate::data::table::MessageTable;
use crate::error::Result;

/// Number of messages sampled for the token frequency list.
pub const TOKEN_SAMPLE_SIZE: usize = 1000;

/// Number of entries in the token frequency list.
pub const TOP_TOKEN_COUNT: usize = 10;

/// A single named count, the unit of every overview chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountEntry {
    /// Bar label.
    pub name: String,
    /// Bar height.
    pub count: u64,
}

/// Data behind the dashboard's overview charts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Overview {
    /// Message counts by genre, in genre name order.
    pub genre_counts: Vec<CountEntry>,
    /// Message counts by category, in category order.
    pub category_counts: Vec<CountEntry>,
    /// The most frequent analyzer tokens over a message sample.
    pub top_tokens: Vec<CountEntry>,
}

/// Compute the overview aggregates for the loaded table.
///
/// Recomputed on every request; the token list samples up to
/// [`TOKEN_SAMPLE_SIZE`] messages with the supplied RNG, so consecutive
/// requests may differ.
pub fn build_overview<R: rand::Rng + ?Sized>(
    table: &MessageTable,
    analyzer: &MessageAnalyzer,
    rng: &mut R,
) -> Result<Overview> {
    Ok(Overview {
        genre_counts: genre_counts(table),
        category_counts: category_counts(table)?,
        top_tokens: top_tokens(table, analyzer, rng)?,
    })
}

/// Message counts by genre, sorted by genre name.
pub fn genre_counts(table: &MessageTable) -> Vec<CountEntry> {
    let mut counts: AHashMap<&str, u64> = AHashMap::new();
    for genre in table.genres() {
        *counts.entry(genre).or_insert(0) += 1;
    }

    let mut entries: Vec<CountEntry> = counts
        .into_iter()
        .map(|(name, count)| CountEntry {
            name: name.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

/// Message counts by category, in the table's category order.
pub fn category_counts(table: &MessageTable) -> Result<Vec<CountEntry>> {
    let sums = table.labels()?.column_sums();
    Ok(table
        .category_names()
        .iter()
        .zip(sums)
        .map(|(name, count)| CountEntry {
            name: name.clone(),
            count,
        })
        .collect())
}

/// The top tokens over a random sample of up to [`TOKEN_SAMPLE_SIZE`] messages.
///
/// Ties break alphabetically so equal-count runs are stable.
pub fn top_tokens<R: rand::Rng + ?Sized>(
    table: &MessageTable,
    analyzer: &MessageAnalyzer,
    rng: &mut R,
) -> Result<Vec<CountEntry>> {
    let records = table.records();
    let sample: Vec<&str> = if records.len() <= TOKEN_SAMPLE_SIZE {
        records.iter().map(|r| r.message.as_str()).collect()
    } else {
        records
            .choose_multiple(rng, TOKEN_SAMPLE_SIZE)
            .map(|r| r.message.as_str())
            .collect()
    };

    let mut counts: AHashMap<String, u64> = AHashMap::new();
    for message in sample {
        for token in analyzer.token_texts(message)? {
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let mut entries: Vec<CountEntry> = counts
        .into_iter()
        .map(|(name, count)| CountEntry { name, count })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    entries.truncate(TOP_TOKEN_COUNT);
    Ok(entries)
}
