//! Data model for an xjView cluster report
//!
//! All numeric values are kept as the exact text found in the report so the
//! CSV reproduces the report's own formatting (e.g. `2.2768`, `-46`, `1e-3`).

/// Default value for a threshold that never appears in the report
pub const DEFAULT_THRESHOLD: &str = "0";

/// Significance cutoffs declared in the report header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thresholds {
    /// Text after `=` on the `-- p value = N` line
    pub p_value: String,
    /// Text after `=` on the `-- cluster size = N` line
    pub cluster_size: String,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            p_value: DEFAULT_THRESHOLD.to_string(),
            cluster_size: DEFAULT_THRESHOLD.to_string(),
        }
    }
}

/// One detected cluster peak, ready for output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterRecord {
    pub general_label: String,
    pub specific_label: String,
    pub peak_x: String,
    pub peak_y: String,
    pub peak_z: String,
    pub voxel_count: String,
    pub peak_intensity: String,
}

impl ClusterRecord {
    /// Fields in CSV column order: General, Specific, X, Y, Z, k, T
    pub fn fields(&self) -> [&str; 7] {
        [
            &self.general_label,
            &self.specific_label,
            &self.peak_x,
            &self.peak_y,
            &self.peak_z,
            &self.voxel_count,
            &self.peak_intensity,
        ]
    }
}

/// Running field values across cluster blocks.
///
/// Only `peak_intensity` is cleared after a record is emitted. Labels,
/// coordinates and voxel count carry over into the next cluster, so a block
/// that omits one of those lines reports the previous cluster's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterAccumulator {
    pub general_label: String,
    pub specific_label: String,
    pub peak_x: String,
    pub peak_y: String,
    pub peak_z: String,
    pub voxel_count: String,
    /// Set when a `Peak intensity:` line is read; marks a row as ready
    pub peak_intensity: Option<String>,
}

impl Default for ClusterAccumulator {
    fn default() -> Self {
        Self {
            general_label: String::new(),
            specific_label: String::new(),
            peak_x: "0".to_string(),
            peak_y: "0".to_string(),
            peak_z: "0".to_string(),
            voxel_count: "0".to_string(),
            peak_intensity: None,
        }
    }
}

impl ClusterAccumulator {
    /// Take a snapshot if a peak intensity has been seen, clearing the flag.
    pub fn take_ready(&mut self) -> Option<ClusterRecord> {
        let peak_intensity = self.peak_intensity.take()?;
        Some(ClusterRecord {
            general_label: self.general_label.clone(),
            specific_label: self.specific_label.clone(),
            peak_x: self.peak_x.clone(),
            peak_y: self.peak_y.clone(),
            peak_z: self.peak_z.clone(),
            voxel_count: self.voxel_count.clone(),
            peak_intensity,
        })
    }
}

/// Result of scanning a whole report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReport {
    pub peaks: Vec<ClusterRecord>,
    pub thresholds: Thresholds,
}

impl ParsedReport {
    /// Build the output table: peak rows, then cluster size, then p-value.
    pub fn into_table(self) -> OutputTable {
        let mut rows: Vec<Row> = self.peaks.into_iter().map(Row::Peak).collect();
        rows.push(Row::Threshold(self.thresholds.cluster_size));
        rows.push(Row::Threshold(self.thresholds.p_value));
        OutputTable { rows }
    }
}

/// A single output row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// Seven-column peak row
    Peak(ClusterRecord),
    /// Single-column trailing threshold row
    Threshold(String),
}

/// Ordered rows written below the CSV header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputTable {
    pub rows: Vec<Row>,
}

impl OutputTable {
    pub fn peak_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row, Row::Peak(_)))
            .count()
    }
}
