//! Command line argument parsing for the vibescore CLI using clap.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VibeError};
use crate::nb::DEFAULT_TEXT_COLUMN;
use crate::report::DEFAULT_TOP_TOKENS;

/// Default output path for trained models.
pub const DEFAULT_MODEL_PATH: &str = "models/nb_model.json";

/// vibescore - heuristic and Naive Bayes vibe scoring for generated stories
#[derive(Parser, Debug, Clone)]
#[command(name = "vibescore")]
#[command(about = "Score how unhinged a generated story turned out")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct VibeArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl VibeArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a Naive Bayes model from labeled CSV corpora
    Train(TrainArgs),

    /// Predict the vibe label of a story
    Predict(PredictArgs),

    /// Explain which tokens drove a prediction
    Explain(ExplainArgs),

    /// Score a story with the keyword heuristic
    Score(ScoreArgs),

    /// Annotate a CSV of story runs with both classifiers
    Annotate(AnnotateArgs),
}

/// Story text, given inline or read from a file.
#[derive(Args, Debug, Clone)]
pub struct TextInput {
    /// Story text
    #[arg(value_name = "TEXT", required_unless_present = "file", conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the story text from a file
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

impl TextInput {
    /// Resolve the story text.
    pub fn read(&self) -> Result<String> {
        match (&self.text, &self.file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => Ok(fs::read_to_string(path)?),
            (None, None) => Err(VibeError::invalid_argument("no story text given")),
        }
    }
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Labeled CSV corpora (at least two)
    #[arg(value_name = "CORPUS", num_args = 2.., required = true)]
    pub corpora: Vec<PathBuf>,

    /// Where to write the model JSON
    #[arg(short, long, default_value = DEFAULT_MODEL_PATH)]
    pub output: PathBuf,

    /// Laplace smoothing constant
    #[arg(long, default_value = "1.0")]
    pub alpha: f64,

    /// Label set, in order (repeatable; defaults to the three vibe labels)
    #[arg(long = "label", value_name = "LABEL")]
    pub labels: Vec<String>,

    /// Column holding story text
    #[arg(long, default_value = DEFAULT_TEXT_COLUMN)]
    pub text_column: String,
}

/// Arguments for prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Trained model JSON
    #[arg(short, long, default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    #[command(flatten)]
    pub input: TextInput,
}

/// Arguments for explanation
#[derive(Parser, Debug, Clone)]
pub struct ExplainArgs {
    /// Trained model JSON
    #[arg(short, long, default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Number of tokens to report
    #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_TOKENS)]
    pub top_k: usize,

    #[command(flatten)]
    pub input: TextInput,
}

/// Arguments for heuristic scoring
#[derive(Parser, Debug, Clone)]
pub struct ScoreArgs {
    /// Heuristic config JSON (phrase lists, weights, clamp bounds)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of correct choices
    #[arg(long, default_value = "0")]
    pub correct: u32,

    /// Number of story steps
    #[arg(long, default_value = "0")]
    pub total: u32,

    #[command(flatten)]
    pub input: TextInput,
}

/// Arguments for run annotation
#[derive(Parser, Debug, Clone)]
pub struct AnnotateArgs {
    /// Runs CSV
    #[arg(value_name = "RUNS")]
    pub runs: PathBuf,

    /// Trained model JSON
    #[arg(short, long, default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Heuristic config JSON
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output CSV (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Explanation tokens per run
    #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_TOKENS)]
    pub top_k: usize,

    /// Column holding story text
    #[arg(long, default_value = DEFAULT_TEXT_COLUMN)]
    pub text_column: String,
}

/// Output formats available in CLI
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_train_command() {
        let args = VibeArgs::try_parse_from([
            "vibescore",
            "train",
            "wholesome.csv",
            "unhinged.csv",
            "--alpha",
            "0.5",
            "--label",
            "wholesome",
            "--label",
            "totally unhinged",
        ])
        .unwrap();

        if let Command::Train(train_args) = args.command {
            assert_eq!(train_args.corpora.len(), 2);
            assert_eq!(train_args.output, PathBuf::from(DEFAULT_MODEL_PATH));
            assert_eq!(train_args.alpha, 0.5);
            assert_eq!(train_args.labels, vec!["wholesome", "totally unhinged"]);
            assert_eq!(train_args.text_column, "generatedText");
        } else {
            panic!("Expected Train command");
        }
    }

    #[test]
    fn test_train_needs_two_corpora() {
        assert!(VibeArgs::try_parse_from(["vibescore", "train"]).is_err());
        assert!(VibeArgs::try_parse_from(["vibescore", "train", "only.csv"]).is_err());
    }

    #[test]
    fn test_predict_text_or_file() {
        let args =
            VibeArgs::try_parse_from(["vibescore", "predict", "--model", "m.json", "a cozy tale"])
                .unwrap();
        if let Command::Predict(predict_args) = args.command {
            assert_eq!(predict_args.model, PathBuf::from("m.json"));
            assert_eq!(predict_args.input.read().unwrap(), "a cozy tale");
        } else {
            panic!("Expected Predict command");
        }

        let args =
            VibeArgs::try_parse_from(["vibescore", "predict", "--file", "story.txt"]).unwrap();
        if let Command::Predict(predict_args) = args.command {
            assert_eq!(predict_args.input.file, Some(PathBuf::from("story.txt")));
            assert!(predict_args.input.text.is_none());
        } else {
            panic!("Expected Predict command");
        }

        assert!(VibeArgs::try_parse_from(["vibescore", "predict"]).is_err());
    }

    #[test]
    fn test_explain_top_k() {
        let args = VibeArgs::try_parse_from(["vibescore", "explain", "-k", "3", "text"]).unwrap();
        if let Command::Explain(explain_args) = args.command {
            assert_eq!(explain_args.top_k, 3);
        } else {
            panic!("Expected Explain command");
        }
    }

    #[test]
    fn test_score_command() {
        let args = VibeArgs::try_parse_from([
            "vibescore", "score", "--correct", "2", "--total", "3", "weird",
        ])
        .unwrap();
        if let Command::Score(score_args) = args.command {
            assert_eq!(score_args.correct, 2);
            assert_eq!(score_args.total, 3);
            assert!(score_args.config.is_none());
        } else {
            panic!("Expected Score command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        let args = VibeArgs::try_parse_from(["vibescore", "predict", "x"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = VibeArgs::try_parse_from(["vibescore", "-vv", "predict", "x"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args = VibeArgs::try_parse_from(["vibescore", "--quiet", "predict", "x"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            VibeArgs::try_parse_from(["vibescore", "--format", "json", "predict", "x"]).unwrap();
        assert!(matches!(args.output_format, OutputFormat::Json));
    }
}
