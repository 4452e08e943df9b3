//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{MaydayArgs, OutputFormat};
use crate::error::Result;
use crate::ml::evaluate::EvaluationReport;

/// Result structure for a training run.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingResult {
    pub database: String,
    pub model: String,
    pub records: usize,
    pub categories: usize,
    pub vocabulary_size: usize,
    pub duration_ms: u64,
    pub report: EvaluationReport,
}

/// One category line of a classification result.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryLine {
    pub name: String,
    pub label: String,
    pub active: bool,
}

/// Result structure for one-off classification.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub message: String,
    pub categories: Vec<CategoryLine>,
}

/// Output a result in the requested format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &MaydayArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{message}");
            }
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &MaydayArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

/// Print a classification result as a yes/no category list.
pub fn print_classification(result: &ClassificationResult) {
    println!("Message: {}", result.message);
    println!("Categories:");
    for category in &result.categories {
        let mark = if category.active { "x" } else { " " };
        println!("  [{mark}] {}", category.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_output_json_round_trip() {
        let result = ClassificationResult {
            message: "we need water".to_string(),
            categories: vec![CategoryLine {
                name: "water".to_string(),
                label: "Water".to_string(),
                active: true,
            }],
        };

        let json = serde_json::to_string(&result).unwrap();
        let parsed: ClassificationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.message, "we need water");
        assert!(parsed.categories[0].active);
    }

    #[test]
    fn test_output_result_human_quiet() {
        let args = MaydayArgs::parse_from(["mayday", "-q", "classify", "model", "msg"]);
        let result = serde_json::json!({"ok": true});
        // Quiet mode prints nothing and must not fail
        output_result("done", &result, &args).unwrap();
    }
}
