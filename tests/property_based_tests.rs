//! Property-based tests for report parsing and CSV rendering
//!
//! Properties covered:
//! 1. Coordinate extraction is independent of space-run length
//! 2. N complete cluster blocks yield N + 3 CSV lines
//! 3. Parsing arbitrary text never panics

use proptest::prelude::*;
use xjview2csv::csv_output::CsvOutput;
use xjview2csv::parser::{classify, parse_report, ClusterLine};

fn cluster_block(index: usize, x: i32, y: i32, z: i32, voxels: u32, intensity: f32) -> String {
    format!(
        "Cluster {index}\n\
         Number of voxels: {voxels}\n\
         Peak MNI coordinate: {x} {y} {z}\n\
         Peak MNI coordinate region:  // Left Cerebrum // Frontal Lobe // Precentral Gyrus // Gray Matter // brodmann area 4 // Precentral_L (aal)\n\
         Peak intensity: {intensity}\n\
         ----------------------\n"
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_coordinates_ignore_space_runs(
        x in -90i32..90,
        y in -126i32..90,
        z in -72i32..108,
        gaps in prop::collection::vec(1usize..24, 3),
    ) {
        let line = format!(
            "Peak MNI coordinate:{}{}{}{}{}{}",
            " ".repeat(gaps[0]), x,
            " ".repeat(gaps[1]), y,
            " ".repeat(gaps[2]), z,
        );

        let parsed = classify(&line, 1).unwrap();
        prop_assert_eq!(
            parsed,
            ClusterLine::Coordinate {
                x: x.to_string(),
                y: y.to_string(),
                z: z.to_string(),
            }
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_row_count_matches_clusters(
        clusters in prop::collection::vec(
            (-90i32..90, -90i32..90, -90i32..90, 1u32..10_000, 0.5f32..9.0),
            0..12,
        ),
    ) {
        let mut report = String::from("/data/spmT_0001.nii,1\n-- p value = 0.001\n-- cluster size = 10\n----------------------\n");
        for (i, (x, y, z, voxels, intensity)) in clusters.iter().enumerate() {
            report.push_str(&cluster_block(i + 1, *x, *y, *z, *voxels, *intensity));
        }

        let parsed = parse_report(&report).unwrap();
        prop_assert_eq!(parsed.peaks.len(), clusters.len());

        let csv = CsvOutput::new(parsed.into_table()).to_csv();
        prop_assert_eq!(csv.lines().count(), clusters.len() + 3);

        let mut tail = csv.lines().rev();
        prop_assert_eq!(tail.next(), Some("0.001"));
        prop_assert_eq!(tail.next(), Some("10"));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_parse_never_panics(
        lines in prop::collection::vec(
            prop_oneof![
                Just("Cluster 1".to_string()),
                Just("----".to_string()),
                Just("-- p value = 0.05".to_string()),
                "Peak [a-z ]{0,12}:[-0-9 /]{0,20}",
                "Number[a-z ]{0,8}:?[0-9 ]{0,6}",
                "[ -~]{0,40}",
            ],
            0..30,
        ),
    ) {
        let text = lines.join("\n");
        // Property: malformed input is rejected with an error, never a panic
        let _ = parse_report(&text);
    }
}
