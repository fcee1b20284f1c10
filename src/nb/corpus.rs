//! CSV training corpus reader.
//!
//! Corpora are CSV files with a header row, e.g. exported story runs:
//!
//! ```csv
//! storyId,generatedText,label
//! story1,"I pulled on the mittens, still warm.",wholesome
//! story1,"They said ""crunch"". I agreed.",totally unhinged
//! ```
//!
//! Fields follow normal CSV quoting: a value containing a comma, quote or
//! newline is wrapped in double quotes, with embedded quotes doubled.

use std::io;
use std::path::Path;

use csv::ReaderBuilder;
use log::{debug, info};

use super::trainer::LabeledDocument;
use crate::error::{Result, VibeError};

/// Column holding the document body by default.
pub const DEFAULT_TEXT_COLUMN: &str = "generatedText";

/// Column holding the label by default.
pub const DEFAULT_LABEL_COLUMN: &str = "label";

/// Reads labeled documents out of CSV corpora.
///
/// Blank rows are skipped and short rows are padded with empty fields.
/// Labels are passed through untouched; filtering unknown labels is the
/// trainer's job.
#[derive(Debug, Clone)]
pub struct CorpusReader {
    text_column: String,
    label_column: String,
    delimiter: u8,
}

impl Default for CorpusReader {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusReader {
    /// Create a reader for the default `generatedText`/`label` columns.
    pub fn new() -> Self {
        CorpusReader {
            text_column: DEFAULT_TEXT_COLUMN.to_string(),
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
            delimiter: b',',
        }
    }

    /// Set the text column name.
    pub fn with_text_column<S: Into<String>>(mut self, column: S) -> Self {
        self.text_column = column.into();
        self
    }

    /// Set the label column name.
    pub fn with_label_column<S: Into<String>>(mut self, column: S) -> Self {
        self.label_column = column.into();
        self
    }

    /// Set a custom single-byte delimiter, e.g. `b'\t'`.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read documents from CSV text.
    pub fn read_str(&self, input: &str) -> Result<Vec<LabeledDocument>> {
        self.read_from(input.as_bytes(), "<string>")
    }

    /// Read documents from a CSV file.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<LabeledDocument>> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let documents = self.read_from(file, &path.display().to_string())?;
        info!("read {} rows from {}", documents.len(), path.display());
        Ok(documents)
    }

    /// Read and concatenate several corpora, in the order given.
    pub fn read_paths<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<LabeledDocument>> {
        let mut documents = Vec::new();
        for path in paths {
            documents.extend(self.read_path(path)?);
        }
        Ok(documents)
    }

    fn read_from<R: io::Read>(&self, input: R, source: &str) -> Result<Vec<LabeledDocument>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(VibeError::corpus(format!("{source}: missing header row")));
        }

        // A repeated header name resolves to its last column.
        let column_index = |name: &str| {
            headers
                .iter()
                .enumerate()
                .filter(|(_, h)| *h == name)
                .map(|(idx, _)| idx)
                .last()
                .ok_or_else(|| {
                    VibeError::corpus(format!("{source}: missing required column {name:?}"))
                })
        };
        let text_idx = column_index(&self.text_column)?;
        let label_idx = column_index(&self.label_column)?;

        let mut documents = Vec::new();
        let mut blank = 0usize;

        for record in reader.records() {
            let record = record?;

            if record.is_empty() || (record.len() == 1 && record[0].is_empty()) {
                blank += 1;
                continue;
            }

            documents.push(LabeledDocument {
                text: record.get(text_idx).unwrap_or("").to_string(),
                label: record.get(label_idx).unwrap_or("").to_string(),
            });
        }

        if blank > 0 {
            debug!("{source}: skipped {blank} blank rows");
        }

        Ok(documents)
    }
}
