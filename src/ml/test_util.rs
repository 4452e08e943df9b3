//! Shared fixtures for the ml module tests.

use crate::data::labels::LabelMatrix;

/// A small, separable two-category corpus.
pub(crate) fn toy_corpus() -> (Vec<String>, LabelMatrix, Vec<String>) {
    let mut messages = Vec::new();
    let mut rows = Vec::new();
    let water = [
        "we need clean water",
        "water supply ran out",
        "send drinking water bottles",
        "no water since the storm",
        "thirsty families need water",
    ];
    let shelter = [
        "houses destroyed need shelter",
        "looking for emergency shelter",
        "shelter collapsed in the quake",
        "families sleeping outside need shelter",
        "tents and shelter required",
    ];
    for _ in 0..4 {
        for text in water {
            messages.push(text.to_string());
            rows.push(vec![1, 0]);
        }
        for text in shelter {
            messages.push(text.to_string());
            rows.push(vec![0, 1]);
        }
    }
    (
        messages,
        LabelMatrix::from_rows(rows).unwrap(),
        vec!["water".to_string(), "shelter".to_string()],
    )
}
