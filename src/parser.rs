//! Single-pass parser for xjView cluster reports
//!
//! A report looks like:
//!
//! ```text
//! /labs/projects/research/fMRI/SVM_searchlight_masked_p05.nii,1
//! Type: S
//! df: 1
//! Threshold
//! -- p value = 1
//! -- intensity = -1.633123935319537e+16
//! -- cluster size = 10
//! Number of clusters found: 8
//! ----------------------
//! Cluster 1
//! Number of voxels: 4562
//! Peak MNI coordinate: -46 -70  20
//! Peak MNI coordinate region:  // Left Cerebrum // Temporal Lobe // Middle Temporal Gyrus // White Matter // undefined // Temporal_Mid_L (aal)
//! Peak intensity: 2.2768
//! ----------------------
//! ```
//!
//! The first line (the statistics image path) is always skipped. Every other
//! line is checked for threshold metadata, and a two-state machine walks the
//! `Cluster` blocks collecting fields into a [`ClusterAccumulator`].
//!
//! Field positions are fixed: coordinates are tokens 1..=3 of the
//! space-run split and labels are segments 3 and 6 of the `//` split. A
//! report laid out differently fails with a [`ParseError`] rather than being
//! reinterpreted.

use crate::normalize::normalize_lines;
use crate::report::{ClusterAccumulator, ClusterRecord, ParsedReport, Thresholds};
use thiserror::Error;
use tracing::debug;

/// Line prefix that opens a cluster block
pub const CLUSTER_START: &str = "Cluster";

/// Substring that closes a cluster block
pub const CLUSTER_SEPARATOR: &str = "----";

const REGION_DELIMITER: &str = "//";
const GENERAL_LABEL_SEGMENT: usize = 3;
const SPECIFIC_LABEL_SEGMENT: usize = 6;

/// Errors raised when a recognized line lacks the value it should carry.
///
/// Line numbers are 1-based positions in the input file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: threshold line has no '=' value: {text:?}")]
    MissingThresholdValue { line: usize, text: String },

    #[error("line {line}: cluster field has no ':' value: {text:?}")]
    MissingFieldValue { line: usize, text: String },

    #[error("line {line}: expected 3 peak coordinates, found {found}: {text:?}")]
    MissingCoordinate {
        line: usize,
        found: usize,
        text: String,
    },

    #[error("line {line}: expected 7 region segments, found {found}: {text:?}")]
    MissingRegionLabel {
        line: usize,
        found: usize,
        text: String,
    },
}

/// Parser position relative to cluster blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Looking for metadata or a `Cluster` line
    Seek,
    /// Reading fields until a `----` separator
    InCluster,
}

/// A classified line from inside a cluster block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterLine {
    VoxelCount(String),
    Coordinate { x: String, y: String, z: String },
    Region { general: String, specific: String },
    Intensity(String),
    Other,
}

/// Classify a line from inside a cluster block.
///
/// `line_no` is only used for error reporting.
pub fn classify(line: &str, line_no: usize) -> Result<ClusterLine, ParseError> {
    if line.starts_with("Number") {
        let value = field_value(line, line_no)?;
        return Ok(ClusterLine::VoxelCount(strip_spaces(value)));
    }

    if !line.starts_with("Peak") {
        return Ok(ClusterLine::Other);
    }

    if line.contains("coordinate:") {
        let value = field_value(line, line_no)?;
        let tokens = split_space_runs(value);
        match tokens.get(1..4) {
            Some([x, y, z]) => Ok(ClusterLine::Coordinate {
                x: x.to_string(),
                y: y.to_string(),
                z: z.to_string(),
            }),
            _ => Err(ParseError::MissingCoordinate {
                line: line_no,
                found: tokens.iter().filter(|token| !token.is_empty()).count(),
                text: line.to_string(),
            }),
        }
    } else if line.contains("region") {
        let value = field_value(line, line_no)?;
        let segments: Vec<&str> = value.split(REGION_DELIMITER).collect();
        match (
            segments.get(GENERAL_LABEL_SEGMENT),
            segments.get(SPECIFIC_LABEL_SEGMENT),
        ) {
            (Some(general), Some(specific)) => Ok(ClusterLine::Region {
                general: general.to_string(),
                specific: specific.to_string(),
            }),
            _ => Err(ParseError::MissingRegionLabel {
                line: line_no,
                found: segments.len(),
                text: line.to_string(),
            }),
        }
    } else if line.contains("intensity") {
        let value = field_value(line, line_no)?;
        Ok(ClusterLine::Intensity(strip_spaces(value)))
    } else {
        Ok(ClusterLine::Other)
    }
}

/// Segment between the first and second `:` of a field line
fn field_value(line: &str, line_no: usize) -> Result<&str, ParseError> {
    line.split(':')
        .nth(1)
        .ok_or_else(|| ParseError::MissingFieldValue {
            line: line_no,
            text: line.to_string(),
        })
}

/// Segment between the first and second `=` of a threshold line
fn threshold_value(line: &str, line_no: usize) -> Result<String, ParseError> {
    line.split('=')
        .nth(1)
        .map(strip_spaces)
        .ok_or_else(|| ParseError::MissingThresholdValue {
            line: line_no,
            text: line.to_string(),
        })
}

fn strip_spaces(value: &str) -> String {
    value.replace(' ', "")
}

/// Split on single spaces, collapsing runs of spaces into one separator.
///
/// A leading run still yields an empty first token (and a trailing run an
/// empty last token), so `" -46  -70 20"` becomes `["", "-46", "-70", "20"]`.
pub fn split_space_runs(value: &str) -> Vec<&str> {
    let parts: Vec<&str> = value.split(' ').collect();
    let last = parts.len() - 1;
    parts
        .into_iter()
        .enumerate()
        .filter(|(i, part)| !part.is_empty() || *i == 0 || *i == last)
        .map(|(_, part)| part)
        .collect()
}

/// Update `thresholds` from a header line, last match wins.
pub fn scan_thresholds(
    line: &str,
    line_no: usize,
    thresholds: &mut Thresholds,
) -> Result<(), ParseError> {
    if line.contains('p') && line.contains("value") {
        thresholds.p_value = threshold_value(line, line_no)?;
        debug!(line = line_no, p_value = %thresholds.p_value, "p-value threshold");
    }

    if line.contains("cluster") && line.contains("size") {
        thresholds.cluster_size = threshold_value(line, line_no)?;
        debug!(line = line_no, cluster_size = %thresholds.cluster_size, "cluster size threshold");
    }

    Ok(())
}

/// Report parser state: one forward pass over the lines
#[derive(Debug)]
pub struct ReportParser {
    state: ScanState,
    accumulator: ClusterAccumulator,
    thresholds: Thresholds,
    peaks: Vec<ClusterRecord>,
}

impl ReportParser {
    pub fn new() -> Self {
        Self {
            state: ScanState::Seek,
            accumulator: ClusterAccumulator::default(),
            thresholds: Thresholds::default(),
            peaks: Vec::new(),
        }
    }

    /// Current scan state
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Parse a full report. The first line is treated as the image path header.
    pub fn parse(mut self, text: &str) -> Result<ParsedReport, ParseError> {
        for (index, line) in normalize_lines(text).into_iter().enumerate().skip(1) {
            self.feed(index + 1, line)?;
        }
        Ok(self.finish())
    }

    /// Process one normalized line (never the header line).
    pub fn feed(&mut self, line_no: usize, line: &str) -> Result<(), ParseError> {
        scan_thresholds(line, line_no, &mut self.thresholds)?;

        let state = self.state;
        self.state = match state {
            ScanState::Seek if line.starts_with(CLUSTER_START) => {
                debug!(line = line_no, "entering cluster block");
                ScanState::InCluster
            }
            ScanState::Seek => ScanState::Seek,
            ScanState::InCluster if line.contains(CLUSTER_SEPARATOR) => {
                debug!(line = line_no, "leaving cluster block");
                ScanState::Seek
            }
            ScanState::InCluster => {
                self.apply(classify(line, line_no)?);
                ScanState::InCluster
            }
        };

        if let Some(record) = self.accumulator.take_ready() {
            debug!(
                line = line_no,
                intensity = %record.peak_intensity,
                voxels = %record.voxel_count,
                "emitting cluster peak"
            );
            self.peaks.push(record);
        }

        Ok(())
    }

    fn apply(&mut self, field: ClusterLine) {
        let acc = &mut self.accumulator;
        match field {
            ClusterLine::VoxelCount(count) => acc.voxel_count = count,
            ClusterLine::Coordinate { x, y, z } => {
                acc.peak_x = x;
                acc.peak_y = y;
                acc.peak_z = z;
            }
            ClusterLine::Region { general, specific } => {
                acc.general_label = general;
                acc.specific_label = specific;
            }
            ClusterLine::Intensity(value) => acc.peak_intensity = Some(value),
            ClusterLine::Other => {}
        }
    }

    /// Finish the scan. Input may end while still inside a cluster block.
    pub fn finish(self) -> ParsedReport {
        ParsedReport {
            peaks: self.peaks,
            thresholds: self.thresholds,
        }
    }
}

impl Default for ReportParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse report text into peak records and thresholds
pub fn parse_report(text: &str) -> Result<ParsedReport, ParseError> {
    ReportParser::new().parse(text)
}
