//! CSV output for parsed cluster reports
//!
//! Fields are joined with plain commas and never quoted, so labels are
//! written exactly as they appear in the report. The two trailing threshold
//! rows carry a single field each.

use crate::report::{OutputTable, Row};

/// Fixed header row
pub const CSV_HEADER: &str = "General,Specific,X,Y,Z,k,T";

/// Line terminator native to the platform
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// CSV output formatter
#[derive(Debug)]
pub struct CsvOutput {
    table: OutputTable,
    line_ending: &'static str,
}

impl CsvOutput {
    /// Create a formatter using the platform line ending
    pub fn new(table: OutputTable) -> Self {
        Self::with_line_ending(table, LINE_ENDING)
    }

    pub fn with_line_ending(table: OutputTable, line_ending: &'static str) -> Self {
        Self { table, line_ending }
    }

    /// Format a single row
    fn format_row(row: &Row) -> String {
        match row {
            Row::Peak(record) => record.fields().join(","),
            Row::Threshold(value) => value.clone(),
        }
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(CSV_HEADER);
        output.push_str(self.line_ending);

        for row in &self.table.rows {
            output.push_str(&Self::format_row(row));
            output.push_str(self.line_ending);
        }

        output
    }
}
