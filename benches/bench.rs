//! Criterion benchmarks for the Mayday pipeline.
//!
//! Covers the two hot paths:
//! - Message analysis (tokenization through lemmatization)
//! - Single-message prediction against a fitted pipeline

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};

use mayday::analysis::analyzer::Analyzer;
use mayday::analysis::analyzer::message::MessageAnalyzer;
use mayday::data::labels::LabelMatrix;
use mayday::ml::forest::ForestConfig;
use mayday::ml::pipeline::{ClassificationPipeline, Model, PipelineConfig};

/// Generate test messages for benchmarking.
fn generate_messages(count: usize) -> Vec<String> {
    let words = [
        "water", "food", "shelter", "flood", "storm", "earthquake", "families", "children",
        "trapped", "urgent", "help", "supplies", "medical", "hospital", "road", "blocked",
        "village", "missing", "rescue", "volunteers",
    ];

    (0..count)
        .map(|i| {
            let mut message = String::new();
            for j in 0..12 {
                if j > 0 {
                    message.push(' ');
                }
                message.push_str(words[(i * 7 + j * 3) % words.len()]);
            }
            message
        })
        .collect()
}

fn bench_analysis(c: &mut Criterion) {
    let analyzer = MessageAnalyzer::new().unwrap();
    let messages = generate_messages(100);

    let mut group = c.benchmark_group("analysis");
    group.throughput(Throughput::Elements(messages.len() as u64));
    group.bench_function("analyze_100_messages", |b| {
        b.iter(|| {
            for message in &messages {
                let tokens: Vec<_> = analyzer.analyze(black_box(message)).unwrap().collect();
                black_box(tokens);
            }
        })
    });
    group.finish();
}

fn bench_predict(c: &mut Criterion) {
    let messages = generate_messages(200);
    let rows = (0..messages.len())
        .map(|i| vec![(i % 2) as u8, ((i / 2) % 2) as u8])
        .collect();
    let labels = LabelMatrix::from_rows(rows).unwrap();

    let mut pipeline = ClassificationPipeline::with_config(
        vec!["water".to_string(), "shelter".to_string()],
        PipelineConfig {
            forest: ForestConfig {
                n_trees: 50,
                ..ForestConfig::default()
            },
            ..PipelineConfig::default()
        },
    );
    pipeline.fit(&messages, &labels).unwrap();

    let mut group = c.benchmark_group("predict");
    group.bench_function("predict_single_message", |b| {
        b.iter(|| {
            let labels = pipeline
                .predict_message(black_box("families trapped need water and medical help"))
                .unwrap();
            black_box(labels);
        })
    });
    group.finish();
}

criterion_group!(benches, bench_analysis, bench_predict);
criterion_main!(benches);
