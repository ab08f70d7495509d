//! CLI argument parsing for xjview2csv

use clap::Parser;
use std::path::PathBuf;

/// Printed when no report path is given
pub const USAGE: &str =
    "Pass in a report txt file from xjview and I'll make a CSV in the same directory";

#[derive(Parser, Debug)]
#[command(name = "xjview2csv")]
#[command(version)]
#[command(about = "Convert an xjView cluster report into a CSV table of cluster peaks", long_about = None)]
pub struct Cli {
    /// xjView report (.txt); the CSV is written next to it
    #[arg(value_name = "REPORT")]
    pub input: Option<PathBuf>,
}
