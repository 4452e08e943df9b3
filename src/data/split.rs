//! Seeded train/test splitting.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::data::table::MessageTable;
use crate::error::{MaydayError, Result};

/// Default fraction of records held out for evaluation.
pub const DEFAULT_TEST_FRACTION: f64 = 0.25;

/// Default seed for the shuffle, so repeated runs produce the same split.
pub const DEFAULT_SEED: u64 = 42;

/// Split a table into train and test tables by seeded shuffle.
///
/// `test_fraction` must lie strictly between 0 and 1, and both sides of the
/// split must end up non-empty.
pub fn train_test_split(
    table: &MessageTable,
    test_fraction: f64,
    seed: u64,
) -> Result<(MessageTable, MessageTable)> {
    if !(0.0..1.0).contains(&test_fraction) || test_fraction == 0.0 {
        return Err(MaydayError::invalid_argument(format!(
            "test fraction must be in (0, 1), got {test_fraction}"
        )));
    }

    let n = table.len();
    let n_test = ((n as f64) * test_fraction).round() as usize;
    if n_test == 0 || n_test >= n {
        return Err(MaydayError::data(format!(
            "Cannot split {n} records with test fraction {test_fraction}"
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_indices, train_indices) = indices.split_at(n_test);
    let train = table.select(train_indices)?;
    let test = table.select(test_indices)?;

    Ok((train, test))
}
