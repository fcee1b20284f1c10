//! Command implementations for the vibescore CLI.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::Path;
use std::time::Instant;

use log::info;

use crate::analysis::tokenize;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::heuristic::{HeuristicConfig, HeuristicScorer};
use crate::nb::{CorpusReader, NbModel, NbTrainer, explain_tokens, predict_tokens};
use crate::report::RunAnnotator;

/// Execute a CLI command.
pub fn execute_command(args: VibeArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train_model(train_args, &args),
        Command::Predict(predict_args) => predict_text(predict_args, &args),
        Command::Explain(explain_args) => explain_text(explain_args, &args),
        Command::Score(score_args) => score_text(score_args, &args),
        Command::Annotate(annotate_args) => annotate_runs(annotate_args, &args),
    }
}

/// Train a model from labeled corpora and save it.
fn train_model(args: &TrainArgs, cli_args: &VibeArgs) -> Result<()> {
    let reader = CorpusReader::new().with_text_column(args.text_column.as_str());
    let documents = reader.read_paths(args.corpora.as_slice())?;

    let mut trainer = NbTrainer::new().with_alpha(args.alpha)?;
    if !args.labels.is_empty() {
        trainer = trainer.with_labels(args.labels.iter().cloned())?;
    }

    let model = trainer.train(&documents);
    model.save(&args.output)?;

    let doc_count = model
        .labels()
        .iter()
        .map(|label| (label.clone(), model.doc_count(label)))
        .collect();

    output_result(
        "Model trained successfully",
        &TrainingResult {
            model_path: args.output.to_string_lossy().to_string(),
            rows_read: documents.len(),
            doc_count,
            vocab_size: model.vocab_size(),
            alpha: model.alpha(),
        },
        cli_args,
    )
}

/// Predict the label of a story.
fn predict_text(args: &PredictArgs, cli_args: &VibeArgs) -> Result<()> {
    let model = NbModel::from_path(&args.model)?;
    let text = args.input.read()?;

    let prediction = predict_tokens(&tokenize(&text), &model);

    output_result(
        "Prediction",
        &PredictionResult {
            label: prediction.label,
            probs: prediction.probs,
        },
        cli_args,
    )
}

/// Explain a prediction.
fn explain_text(args: &ExplainArgs, cli_args: &VibeArgs) -> Result<()> {
    let model = NbModel::from_path(&args.model)?;
    let text = args.input.read()?;

    let tokens = tokenize(&text);
    let prediction = predict_tokens(&tokens, &model);
    let contributions = explain_tokens(&tokens, &model, args.top_k);

    output_result(
        "Explanation",
        &ExplanationResult {
            label: prediction.label,
            tokens: contributions,
        },
        cli_args,
    )
}

/// Score a story with the keyword heuristic.
fn score_text(args: &ScoreArgs, cli_args: &VibeArgs) -> Result<()> {
    let scorer = HeuristicScorer::new(load_config(args.config.as_deref())?);
    let text = args.input.read()?;

    let result = scorer.score(&text, args.correct, args.total);

    output_result(
        "Heuristic score",
        &HeuristicResult {
            score: result.score,
            label: result.label,
            breakdown: result.breakdown,
        },
        cli_args,
    )
}

/// Annotate a runs CSV with heuristic and NB verdicts.
fn annotate_runs(args: &AnnotateArgs, cli_args: &VibeArgs) -> Result<()> {
    let model = NbModel::from_path(&args.model)?;
    let scorer = HeuristicScorer::new(load_config(args.config.as_deref())?);
    let annotator = RunAnnotator::new(&model, scorer)
        .with_top_k(args.top_k)
        .with_text_column(args.text_column.as_str());

    let start_time = Instant::now();
    let input = BufReader::new(File::open(&args.runs)?);

    let Some(output_path) = &args.output else {
        // CSV goes to stdout, so no summary.
        let stdout = io::stdout();
        annotator.annotate_csv(input, stdout.lock())?;
        return Ok(());
    };

    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let runs_annotated = annotator.annotate_csv(input, BufWriter::new(File::create(output_path)?))?;

    output_result(
        "Runs annotated successfully",
        &AnnotationResult {
            runs_annotated,
            output: output_path.to_string_lossy().to_string(),
            duration_ms: start_time.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Load a heuristic config, or the empty default when none is given.
fn load_config(path: Option<&Path>) -> Result<HeuristicConfig> {
    match path {
        Some(path) => {
            info!("loading heuristic config from {}", path.display());
            HeuristicConfig::from_path(path)
        }
        None => Ok(HeuristicConfig::default()),
    }
}
