//! Report-to-CSV conversion job
//!
//! Reads the whole report, parses it, and writes the CSV next to it. The
//! output path is the input path with its first `txt` replaced by `csv`.

use crate::csv_output::CsvOutput;
use crate::parser::{parse_report, ParseError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while converting a report
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to read report {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write CSV {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed report")]
    Parse(#[from] ParseError),
}

/// Derive the CSV path by replacing the first `txt` anywhere in the path.
///
/// This is a plain substring replacement: `txt_runs/report.txt` becomes
/// `csv_runs/report.txt`, and a path without `txt` maps to itself.
pub fn derive_output_path(input: &Path) -> PathBuf {
    PathBuf::from(input.to_string_lossy().replacen("txt", "csv", 1))
}

/// Summary of a finished conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub output: PathBuf,
    pub peaks: usize,
}

/// One invocation's input and output paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl ConversionJob {
    /// Build a job whose output path is derived from `input`
    pub fn from_input(input: impl Into<PathBuf>) -> Self {
        let input = input.into();
        let output = derive_output_path(&input);
        Self { input, output }
    }

    /// Read, parse and write. Nothing is written if reading or parsing fails.
    pub fn run(&self) -> Result<ConversionSummary, ConvertError> {
        let text = fs::read_to_string(&self.input).map_err(|source| ConvertError::Read {
            path: self.input.clone(),
            source,
        })?;

        let table = parse_report(&text)?.into_table();
        let peaks = table.peak_count();

        if self.output == self.input {
            warn!(
                path = %self.input.display(),
                "input path contains no 'txt'; overwriting the report with CSV"
            );
        }

        fs::write(&self.output, CsvOutput::new(table).to_csv()).map_err(|source| {
            ConvertError::Write {
                path: self.output.clone(),
                source,
            }
        })?;

        info!(peaks, output = %self.output.display(), "wrote cluster table");

        Ok(ConversionSummary {
            output: self.output.clone(),
            peaks,
        })
    }
}
