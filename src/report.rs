//! Run annotation: heuristic score, NB prediction and explanation per story run.
//!
//! Takes a CSV of generated story runs and writes one annotated CSV row per
//! run, so the heuristic scorer and the NB classifier can be compared side
//! by side. Input columns:
//!
//! - the text column (default `generatedText`), required
//! - `storyId`, optional, passed through
//! - `correctCount` and `totalSteps`, optional; when absent, a
//!   `wrongChoices` column is used instead
//!
//! Rows are scored in parallel against one shared, read-only model.

use std::io;

use csv::{ReaderBuilder, WriterBuilder};
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::tokenize;
use crate::error::{Result, VibeError};
use crate::heuristic::{HeuristicScorer, ScoreResult};
use crate::nb::{DEFAULT_TEXT_COLUMN, NbModel, Prediction, TokenContribution, explain_tokens, predict_tokens};
use crate::util::round_to;

const STORY_ID_COLUMN: &str = "storyId";
const CORRECT_COUNT_COLUMN: &str = "correctCount";
const TOTAL_STEPS_COLUMN: &str = "totalSteps";
const WRONG_CHOICES_COLUMN: &str = "wrongChoices";

/// Number of explanation tokens per run by default.
pub const DEFAULT_TOP_TOKENS: usize = 8;

/// Separator for list-valued output cells.
const LIST_SEPARATOR: &str = "; ";

/// One story run to annotate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunInput {
    pub story_id: Option<String>,
    pub text: String,
    pub correct_count: u32,
    pub total_steps: u32,
}

/// A story run with both classifiers' verdicts attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedRun {
    pub input: RunInput,
    pub heuristic: ScoreResult,
    pub prediction: Prediction,
    pub top_tokens: Vec<TokenContribution>,
}

/// Annotates story runs with a heuristic scorer and an NB model.
#[derive(Debug)]
pub struct RunAnnotator<'m> {
    model: &'m NbModel,
    scorer: HeuristicScorer,
    top_k: usize,
    text_column: String,
}

impl<'m> RunAnnotator<'m> {
    /// Create an annotator.
    pub fn new(model: &'m NbModel, scorer: HeuristicScorer) -> Self {
        Self {
            model,
            scorer,
            top_k: DEFAULT_TOP_TOKENS,
            text_column: DEFAULT_TEXT_COLUMN.to_string(),
        }
    }

    /// Set how many explanation tokens to keep per run.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the text column name.
    pub fn with_text_column<S: Into<String>>(mut self, column: S) -> Self {
        self.text_column = column.into();
        self
    }

    /// Annotate a single run.
    pub fn annotate_run(&self, input: &RunInput) -> AnnotatedRun {
        let heuristic = self
            .scorer
            .score(&input.text, input.correct_count, input.total_steps);

        let tokens = tokenize(&input.text);
        let prediction = predict_tokens(&tokens, self.model);
        let top_tokens = explain_tokens(&tokens, self.model, self.top_k);

        AnnotatedRun {
            input: input.clone(),
            heuristic,
            prediction,
            top_tokens,
        }
    }

    /// Annotate many runs in parallel. Output order matches input order.
    pub fn annotate(&self, runs: &[RunInput]) -> Vec<AnnotatedRun> {
        runs.par_iter().map(|run| self.annotate_run(run)).collect()
    }

    /// Parse runs out of CSV.
    pub fn read_runs<R: io::Read>(&self, input: R) -> Result<Vec<RunInput>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        let headers = reader.headers()?.clone();
        // A repeated header name resolves to its last column.
        let column = |name: &str| {
            headers
                .iter()
                .enumerate()
                .filter(|(_, h)| *h == name)
                .map(|(idx, _)| idx)
                .last()
        };

        let text_idx = column(&self.text_column).ok_or_else(|| {
            VibeError::corpus(format!("runs file is missing column {:?}", self.text_column))
        })?;
        let story_idx = column(STORY_ID_COLUMN);
        let correct_idx = column(CORRECT_COUNT_COLUMN);
        let total_idx = column(TOTAL_STEPS_COLUMN);
        let wrong_idx = column(WRONG_CHOICES_COLUMN);

        if total_idx.is_none() && wrong_idx.is_none() {
            warn!("runs file has neither {TOTAL_STEPS_COLUMN:?} nor {WRONG_CHOICES_COLUMN:?}; assuming no wrong choices");
        }

        let mut runs = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            if record.is_empty() || (record.len() == 1 && record[0].is_empty()) {
                continue;
            }

            let number = |idx: Option<usize>| -> u32 {
                let Some(raw) = idx.and_then(|i| record.get(i)) else {
                    return 0;
                };
                raw.trim().parse().unwrap_or_else(|_| {
                    if !raw.trim().is_empty() {
                        warn!("row {}: {raw:?} is not a count, using 0", row + 1);
                    }
                    0
                })
            };

            // Without explicit steps, replay wrong choices as steps with none correct.
            let (correct_count, total_steps) = if total_idx.is_some() {
                (number(correct_idx), number(total_idx))
            } else {
                (0, number(wrong_idx))
            };

            runs.push(RunInput {
                story_id: story_idx
                    .and_then(|i| record.get(i))
                    .map(str::to_string),
                text: record.get(text_idx).unwrap_or("").to_string(),
                correct_count,
                total_steps,
            });
        }

        Ok(runs)
    }

    /// Output header: fixed columns plus one probability column per label.
    pub fn headers(&self) -> Vec<String> {
        let mut headers: Vec<String> = [
            STORY_ID_COLUMN,
            DEFAULT_TEXT_COLUMN,
            WRONG_CHOICES_COLUMN,
            "weirdHitWords",
            "selfAwareHitWords",
            "cozyHitWords",
            "weirdHits",
            "selfAwareHits",
            "cozyHits",
            "rawScore",
            "clampedScore",
            "label",
            "nbLabel",
            "nbP",
        ]
        .iter()
        .map(|h| h.to_string())
        .collect();

        headers.extend(self.model.labels().iter().map(|l| probability_column(l)));
        headers.push("nbTopTokens".to_string());
        headers
    }

    /// Write annotated runs as CSV. Values are quoted only when they
    /// contain a comma, quote or line break.
    pub fn write_csv<W: io::Write>(&self, runs: &[AnnotatedRun], output: W) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(output);

        writer.write_record(self.headers())?;

        for run in runs {
            let breakdown = &run.heuristic.breakdown;
            let mut record: Vec<String> = vec![
                run.input.story_id.clone().unwrap_or_default(),
                run.input.text.clone(),
                breakdown.wrong_choices.to_string(),
                breakdown.weird_hit_words.join(LIST_SEPARATOR),
                breakdown.self_aware_hit_words.join(LIST_SEPARATOR),
                breakdown.cozy_hit_words.join(LIST_SEPARATOR),
                breakdown.weird_hits.to_string(),
                breakdown.self_aware_hits.to_string(),
                breakdown.cozy_hits.to_string(),
                breakdown.raw.to_string(),
                run.heuristic.score.to_string(),
                run.heuristic.label.to_string(),
                run.prediction.label.clone(),
                round_to(run.prediction.confidence(), 4).to_string(),
            ];

            record.extend(
                self.model
                    .labels()
                    .iter()
                    .map(|l| round_to(run.prediction.probability(l), 4).to_string()),
            );
            record.push(
                run.top_tokens
                    .iter()
                    .map(|t| t.token.as_str())
                    .collect::<Vec<_>>()
                    .join(LIST_SEPARATOR),
            );

            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Read runs from `input`, annotate them and write CSV to `output`.
    /// Returns the number of runs written.
    pub fn annotate_csv<R: io::Read, W: io::Write>(&self, input: R, output: W) -> Result<usize> {
        let runs = self.read_runs(input)?;
        let annotated = self.annotate(&runs);
        self.write_csv(&annotated, output)?;
        info!("annotated {} runs", annotated.len());
        Ok(annotated.len())
    }
}

/// `"kinda odd"` → `"nbProbKindaOdd"`.
fn probability_column(label: &str) -> String {
    let mut column = String::from("nbProb");
    for word in label.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            column.extend(first.to_uppercase());
            column.push_str(chars.as_str());
        }
    }
    column
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::HeuristicConfig;
    use crate::nb::{LabeledDocument, NbTrainer};

    fn model() -> NbModel {
        NbTrainer::new().train(&[
            LabeledDocument::new("warm soft steam, a cozy mitten", "wholesome"),
            LabeledDocument::new("the wool was uncomfortably close", "kinda odd"),
            LabeledDocument::new("crunch crunch I bit the mitten", "totally unhinged"),
        ])
    }

    fn scorer() -> HeuristicScorer {
        HeuristicScorer::new(
            HeuristicConfig::default()
                .with_weird_words(vec!["crunch"])
                .with_cozy_words(vec!["warm", "cozy"]),
        )
    }

    #[test]
    fn test_probability_column() {
        assert_eq!(probability_column("wholesome"), "nbProbWholesome");
        assert_eq!(probability_column("kinda odd"), "nbProbKindaOdd");
        assert_eq!(probability_column("totally unhinged"), "nbProbTotallyUnhinged");
    }

    #[test]
    fn test_read_runs() {
        let model = model();
        let annotator = RunAnnotator::new(&model, scorer());

        let csv = "storyId,generatedText,correctCount,totalSteps\nstory1,\"warm, cozy\",3,3\n\nstory2,crunch,x,3\n";
        let runs = annotator.read_runs(csv.as_bytes()).unwrap();

        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].story_id.as_deref(), Some("story1"));
        assert_eq!(runs[0].text, "warm, cozy");
        assert_eq!(runs[0].correct_count, 3);
        assert_eq!(runs[1].correct_count, 0);
        assert_eq!(runs[1].total_steps, 3);
    }

    #[test]
    fn test_read_runs_from_wrong_choices() {
        let model = model();
        let annotator = RunAnnotator::new(&model, scorer());

        let runs = annotator
            .read_runs("generatedText,wrongChoices\ncrunch,2\n".as_bytes())
            .unwrap();

        assert_eq!(runs[0].story_id, None);
        assert_eq!(runs[0].correct_count, 0);
        assert_eq!(runs[0].total_steps, 2);
    }

    #[test]
    fn test_read_runs_repeated_header() {
        let model = model();
        let annotator = RunAnnotator::new(&model, scorer());

        let runs = annotator
            .read_runs("generatedText,wrongChoices,generatedText\ndraft,1,final\n".as_bytes())
            .unwrap();

        assert_eq!(runs[0].text, "final");
        assert_eq!(runs[0].total_steps, 1);
    }

    #[test]
    fn test_missing_text_column() {
        let model = model();
        let annotator = RunAnnotator::new(&model, scorer());
        assert!(annotator.read_runs("story,wrongChoices\na,1\n".as_bytes()).is_err());
    }

    #[test]
    fn test_annotate_preserves_order() {
        let model = model();
        let annotator = RunAnnotator::new(&model, scorer()).with_top_k(2);

        let runs: Vec<RunInput> = (0..50)
            .map(|i| RunInput {
                story_id: Some(format!("run{i}")),
                text: if i % 2 == 0 { "warm cozy steam".into() } else { "crunch crunch bit".into() },
                correct_count: 3,
                total_steps: 3,
            })
            .collect();

        let annotated = annotator.annotate(&runs);
        assert_eq!(annotated.len(), 50);
        for (i, run) in annotated.iter().enumerate() {
            assert_eq!(run.input.story_id.as_deref(), Some(format!("run{i}").as_str()));
            assert!(run.top_tokens.len() <= 2);
        }
        assert_eq!(annotated[0].prediction.label, "wholesome");
        assert_eq!(annotated[1].prediction.label, "totally unhinged");
    }

    #[test]
    fn test_write_csv() {
        let model = model();
        let annotator = RunAnnotator::new(&model, scorer());

        let input = "storyId,generatedText,correctCount,totalSteps\nstory1,\"warm, \"\"cozy\"\" steam\",3,3\n";
        let mut output = Vec::new();
        let written = annotator.annotate_csv(input.as_bytes(), &mut output).unwrap();
        assert_eq!(written, 1);

        let text = String::from_utf8(output).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "storyId,generatedText,wrongChoices,weirdHitWords,selfAwareHitWords,cozyHitWords,\
             weirdHits,selfAwareHits,cozyHits,rawScore,clampedScore,label,nbLabel,nbP,\
             nbProbWholesome,nbProbKindaOdd,nbProbTotallyUnhinged,nbTopTokens"
        );

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[1], "warm, \"cozy\" steam");
        assert_eq!(&record[5], "warm; cozy");
        assert_eq!(&record[9], "-2");
        assert_eq!(&record[10], "0");
        assert_eq!(&record[11], "wholesome");
        assert_eq!(&record[12], "wholesome");
        assert!(text.contains("\"warm, \"\"cozy\"\" steam\""));
    }
}
