#![no_main]

use libfuzzer_sys::fuzz_target;
use xjview2csv::csv_output::CsvOutput;
use xjview2csv::parser::parse_report;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Malformed reports must surface as ParseError, never a panic
        if let Ok(report) = parse_report(input) {
            let _ = CsvOutput::new(report.into_table()).to_csv();
        }
    }
});
