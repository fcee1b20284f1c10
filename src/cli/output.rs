//! Output formatting for CLI commands.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, VibeArgs};
use crate::error::Result;
use crate::heuristic::ScoreBreakdown;
use crate::label::VibeLabel;
use crate::nb::TokenContribution;

/// Result structure for training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingResult {
    pub model_path: String,
    pub rows_read: usize,
    pub doc_count: BTreeMap<String, u64>,
    pub vocab_size: u64,
    pub alpha: f64,
}

/// Result structure for prediction.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: String,
    pub probs: BTreeMap<String, f64>,
}

/// Result structure for explanation.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExplanationResult {
    pub label: String,
    pub tokens: Vec<TokenContribution>,
}

/// Result structure for heuristic scoring.
#[derive(Debug, Serialize, Deserialize)]
pub struct HeuristicResult {
    pub score: f64,
    pub label: VibeLabel,
    pub breakdown: ScoreBreakdown,
}

/// Result structure for run annotation.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnnotationResult {
    pub runs_annotated: usize,
    pub output: String,
    pub duration_ms: u64,
}

/// Output a result in the requested format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &VibeArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &VibeArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    // Convert to JSON value for easier manipulation
    let value = serde_json::to_value(result)?;

    match result {
        _ if std::any::type_name::<T>().contains("ExplanationResult") => {
            output_explanation_human(&value, args)
        }
        _ => output_generic_human(&value, args),
    }
}

/// Output an explanation as an aligned token table.
fn output_explanation_human(value: &serde_json::Value, _args: &VibeArgs) -> Result<()> {
    if let Some(obj) = value.as_object() {
        if let Some(label) = obj.get("label").and_then(|l| l.as_str()) {
            println!("Predicted: {label}");
        }

        if let Some(tokens) = obj.get("tokens").and_then(|t| t.as_array()) {
            println!();
            println!("Top tokens:");
            println!("───────────");

            let width = tokens
                .iter()
                .filter_map(|t| t.get("token").and_then(|s| s.as_str()))
                .map(|s| s.chars().count())
                .max()
                .unwrap_or(0);

            for token in tokens {
                let text = token.get("token").and_then(|s| s.as_str()).unwrap_or("");
                let contrib = token.get("contrib").and_then(|c| c.as_f64()).unwrap_or(0.0);
                println!("  {text:<width$}  {contrib:+.3}");
            }
        }
    }
    Ok(())
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value, _args: &VibeArgs) -> Result<()> {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &VibeArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for human display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Array(arr) => {
            if arr.is_empty() {
                "[]".to_string()
            } else {
                let items: Vec<String> = arr.iter().map(format_value).collect();
                format!("[{}]", items.join(", "))
            }
        }
        serde_json::Value::Object(obj) => {
            let items: Vec<String> = obj
                .iter()
                .map(|(k, v)| format!("{k}={}", format_value(v)))
                .collect();
            format!("{{{}}}", items.join(", "))
        }
    }
}
