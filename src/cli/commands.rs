//! Command implementations for the Mayday CLI.

use std::net::SocketAddr;
use std::time::Instant;

use crate::cli::args::{ClassifyArgs, Command, MaydayArgs, OutputFormat, ServeArgs, TrainArgs};
use crate::cli::output::{
    CategoryLine, ClassificationResult, TrainingResult, output_result, print_classification,
};
use crate::dashboard::handlers::display_label;
use crate::dashboard::{self, AppState};
use crate::data::labels::LabelMatrix;
use crate::data::split::train_test_split;
use crate::data::sqlite::load_table;
use crate::error::{MaydayError, Result};
use crate::ml::artifact::{load_model, save_model};
use crate::ml::evaluate::{EvaluationReport, evaluate};
use crate::ml::grid_search::GridSearch;
use crate::ml::pipeline::{ClassificationPipeline, Model};

/// Execute a CLI command.
pub fn execute_command(args: MaydayArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train(train_args.clone(), &args),
        Command::Classify(classify_args) => classify(classify_args.clone(), &args),
        Command::Serve(serve_args) => serve(serve_args.clone(), &args),
    }
}

/// The async runtime for database loading and serving.
///
/// The CLI itself stays synchronous, the way training tools are usually
/// driven; only the sqlx and axum paths need the runtime.
fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Runtime::new()?)
}

/// Train a classifier, evaluate it on the held-out split, persist it.
fn train(args: TrainArgs, cli_args: &MaydayArgs) -> Result<()> {
    let verbosity = cli_args.verbosity();
    let start = Instant::now();

    if verbosity > 0 {
        println!(
            "Loading data...\n    DATABASE: {}",
            args.database_path.display()
        );
    }
    let table = runtime()?.block_on(load_table(&args.database_path))?;
    let (train_table, test_table) = train_test_split(&table, args.test_fraction, args.seed)?;

    let categories = table.category_names().to_vec();
    let train_messages = train_table.messages();
    let train_labels = train_table.labels()?;
    let test_messages = test_table.messages();
    let test_labels = test_table.labels()?;

    if verbosity > 0 {
        println!("Building model...");
    }
    let (pipeline, report) = if args.grid_search {
        if verbosity > 0 {
            println!("Searching for best parameters...");
        }
        let mut search = GridSearch::new(categories.clone())
            .with_folds(args.folds)
            .with_seed(args.seed);
        let report = fit_and_report(
            &mut search,
            &train_messages,
            &train_labels,
            &test_messages,
            &test_labels,
            cli_args,
        )?;
        (search.into_best()?, report)
    } else {
        let mut pipeline = ClassificationPipeline::new(categories.clone());
        let report = fit_and_report(
            &mut pipeline,
            &train_messages,
            &train_labels,
            &test_messages,
            &test_labels,
            cli_args,
        )?;
        (pipeline, report)
    };

    if verbosity > 0 {
        println!("Saving model...\n    MODEL: {}", args.model_path.display());
    }
    save_model(&pipeline, &args.model_path)?;

    let result = TrainingResult {
        database: args.database_path.to_string_lossy().to_string(),
        model: args.model_path.to_string_lossy().to_string(),
        records: table.len(),
        categories: categories.len(),
        vocabulary_size: pipeline.vocabulary_size(),
        duration_ms: start.elapsed().as_millis() as u64,
        report,
    };
    output_result("Trained model saved!", &result, cli_args)
}

/// Fit a model and print its held-out evaluation report.
fn fit_and_report<M: Model>(
    model: &mut M,
    train_messages: &[String],
    train_labels: &LabelMatrix,
    test_messages: &[String],
    test_labels: &LabelMatrix,
    cli_args: &MaydayArgs,
) -> Result<EvaluationReport> {
    let verbosity = cli_args.verbosity();

    if verbosity > 0 {
        println!("Training model...");
    }
    tracing::debug!(model = model.name(), "fitting model");
    model.fit(train_messages, train_labels)?;

    if verbosity > 0 {
        println!("Evaluating model...");
    }
    let predicted = model.predict(test_messages)?;
    let report = evaluate(&predicted, test_labels, model.category_names())?;

    if verbosity > 0 && matches!(cli_args.output_format, OutputFormat::Human) {
        println!("{report}");
    }

    Ok(report)
}

/// Classify one message with a persisted artifact.
fn classify(args: ClassifyArgs, cli_args: &MaydayArgs) -> Result<()> {
    let pipeline = load_model(&args.model_path)?;
    let labels = pipeline.predict_message(&args.message)?;

    let categories = pipeline
        .category_names()
        .iter()
        .zip(&labels)
        .map(|(name, &value)| CategoryLine {
            name: name.clone(),
            label: display_label(name),
            active: value == 1,
        })
        .collect();

    let result = ClassificationResult {
        message: args.message.clone(),
        categories,
    };

    match cli_args.output_format {
        OutputFormat::Human => {
            if cli_args.verbosity() > 0 {
                print_classification(&result);
            }
            Ok(())
        }
        OutputFormat::Json => output_result("", &result, cli_args),
    }
}

/// Load the artifact and the table, then serve the dashboard.
fn serve(args: ServeArgs, cli_args: &MaydayArgs) -> Result<()> {
    let verbosity = cli_args.verbosity();

    if verbosity > 0 {
        println!("Loading model...\n    MODEL: {}", args.model_path.display());
    }
    let pipeline = load_model(&args.model_path)?;

    if verbosity > 0 {
        println!(
            "Loading data...\n    DATABASE: {}",
            args.database_path.display()
        );
    }
    let rt = runtime()?;
    let table = rt.block_on(load_table(&args.database_path))?;

    // The artifact only makes sense against the category set it was
    // trained with
    if table.category_names() != pipeline.category_names() {
        return Err(MaydayError::data(format!(
            "Table categories {:?} do not match model categories {:?}",
            table.category_names(),
            pipeline.category_names()
        )));
    }

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|e| MaydayError::invalid_argument(format!("Invalid bind address: {e}")))?;

    if verbosity > 0 {
        println!("Dashboard running at http://{addr}/");
    }
    let state = AppState::new(pipeline, table)?;
    rt.block_on(dashboard::serve(state, addr))
}
