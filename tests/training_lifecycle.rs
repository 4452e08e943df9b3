//! Integration tests for the train → evaluate → persist → serve lifecycle.

use mayday::data::split::train_test_split;
use mayday::data::record::MessageRecord;
use mayday::data::table::MessageTable;
use mayday::error::Result;
use mayday::ml::artifact::{load_model, save_model};
use mayday::ml::evaluate::evaluate;
use mayday::ml::forest::ForestConfig;
use mayday::ml::pipeline::{ClassificationPipeline, Model, PipelineConfig};

/// A fixed dataset of 100 labeled messages across 3 categories.
fn fixed_dataset() -> MessageTable {
    let water = [
        "we need clean water urgently",
        "the water supply ran out yesterday",
        "please send drinking water bottles",
        "no water since the storm hit",
        "thirsty families are asking for water",
    ];
    let food = [
        "people here have no food left",
        "send rice and canned food",
        "children are hungry and need food",
        "food distribution point destroyed",
        "we are starving please bring food",
    ];
    let shelter = [
        "houses destroyed we need shelter",
        "looking for an emergency shelter",
        "the shelter collapsed in the quake",
        "families sleeping outside need tents",
        "roof gone shelter urgently required",
    ];
    let other = [
        "thank you for the update",
        "is the airport open again",
        "weather report says sunny tomorrow",
        "the meeting moved to monday",
        "radio station back on air",
    ];

    let mut records = Vec::with_capacity(100);
    for i in 0..100 {
        let (text, labels, genre) = match i % 4 {
            0 => (water[i / 4 % water.len()], vec![1, 0, 0], "direct"),
            1 => (food[i / 4 % food.len()], vec![0, 1, 0], "social"),
            2 => (shelter[i / 4 % shelter.len()], vec![0, 0, 1], "direct"),
            _ => (other[i / 4 % other.len()], vec![0, 0, 0], "news"),
        };
        records.push(MessageRecord::new(
            i as i64,
            text.to_string(),
            genre.to_string(),
            labels,
        ));
    }

    MessageTable::new(
        records,
        vec![
            "water".to_string(),
            "food".to_string(),
            "shelter".to_string(),
        ],
    )
    .unwrap()
}

fn small_forest() -> PipelineConfig {
    PipelineConfig {
        forest: ForestConfig {
            n_trees: 20,
            ..ForestConfig::default()
        },
        ..PipelineConfig::default()
    }
}

#[test]
fn test_end_to_end_training_run() -> Result<()> {
    let table = fixed_dataset();
    let (train, test) = train_test_split(&table, 0.25, 42)?;
    assert_eq!(train.len(), 75);
    assert_eq!(test.len(), 25);

    let mut pipeline =
        ClassificationPipeline::with_config(table.category_names().to_vec(), small_forest());
    pipeline.fit(&train.messages(), &train.labels()?)?;

    let predicted = pipeline.predict(&test.messages())?;
    let report = evaluate(&predicted, &test.labels()?, table.category_names())?;

    assert_eq!(report.categories.len(), 3);
    for category in &report.categories {
        assert!((0.0..=1.0).contains(&category.precision));
        assert!((0.0..=1.0).contains(&category.recall));
        assert!((0.0..=1.0).contains(&category.f1));
    }
    assert!((0.0..=1.0).contains(&report.mean_f1));

    // The templates are highly separable; the model should do well on them
    assert!(report.mean_f1 > 0.5, "mean F1 was {}", report.mean_f1);

    Ok(())
}

#[test]
fn test_artifact_round_trip_and_classification() -> Result<()> {
    let table = fixed_dataset();
    let (train, _test) = train_test_split(&table, 0.25, 42)?;

    let mut pipeline =
        ClassificationPipeline::with_config(table.category_names().to_vec(), small_forest());
    pipeline.fit(&train.messages(), &train.labels()?)?;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("classifier.mayday");
    save_model(&pipeline, &path)?;
    let loaded = load_model(&path)?;

    // The loaded pipeline predicts exactly like the in-memory one
    assert_eq!(
        loaded.predict_message("there is a fire")?,
        pipeline.predict_message("there is a fire")?
    );

    // Classifying a known phrase yields one 0/1 label per category
    let labels = loaded.predict_message("we need food and water")?;
    assert_eq!(labels.len(), 3);
    assert!(labels.iter().all(|&value| value <= 1));

    Ok(())
}

#[test]
fn test_training_is_deterministic_for_a_seed() -> Result<()> {
    let table = fixed_dataset();

    let run = || -> Result<Vec<u8>> {
        let (train, _) = train_test_split(&table, 0.25, 42)?;
        let mut pipeline =
            ClassificationPipeline::with_config(table.category_names().to_vec(), small_forest());
        pipeline.fit(&train.messages(), &train.labels()?)?;
        pipeline.predict_message("families need water and shelter")
    };

    assert_eq!(run()?, run()?);
    Ok(())
}
