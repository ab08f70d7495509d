//! xjview2csv - convert xjView cluster reports into CSV tables
//!
//! The report is parsed in one pass: header thresholds are picked up from
//! any line, and each `Cluster` block contributes one peak row once its
//! `Peak intensity:` line is read.
//!
//! ```
//! use xjview2csv::csv_output::CsvOutput;
//! use xjview2csv::parser::parse_report;
//!
//! let report = "/img.nii,1\n-- p value = 0.001\n-- cluster size = 10\n";
//! let table = parse_report(report).unwrap().into_table();
//! let csv = CsvOutput::with_line_ending(table, "\n").to_csv();
//! assert_eq!(csv, "General,Specific,X,Y,Z,k,T\n10\n0.001\n");
//! ```

pub mod cli;
pub mod convert;
pub mod csv_output;
pub mod normalize;
pub mod parser;
pub mod report;
