//! Line normalization for report text
//!
//! Reports arrive with either `\n` or `\r\n` terminators depending on the
//! machine that exported them. Each line is inspected individually and
//! exactly its own terminator is removed.

/// Split `text` into lines, stripping each line's terminator.
///
/// A line ending in `\r\n` loses both characters; a line ending in `\n`
/// loses only the newline. A final line with no terminator is kept as-is.
/// Any other carriage returns are left untouched.
pub fn normalize_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n')
        .map(|line| {
            line.strip_suffix("\r\n")
                .or_else(|| line.strip_suffix('\n'))
                .unwrap_or(line)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_line_endings() {
        let lines = normalize_lines("a\nb\nc\n");
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_windows_line_endings() {
        let lines = normalize_lines("a\r\nb\r\n");
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_mixed_line_endings() {
        let lines = normalize_lines("header\r\nCluster 1\nPeak intensity: 2\r\n");
        assert_eq!(lines, vec!["header", "Cluster 1", "Peak intensity: 2"]);
    }

    #[test]
    fn test_missing_final_terminator() {
        let lines = normalize_lines("a\nlast");
        assert_eq!(lines, vec!["a", "last"]);
    }

    #[test]
    fn test_blank_lines_preserved() {
        let lines = normalize_lines("a\n\r\n\nb\n");
        assert_eq!(lines, vec!["a", "", "", "b"]);
    }

    #[test]
    fn test_embedded_carriage_return_untouched() {
        let lines = normalize_lines("a\rb\n");
        assert_eq!(lines, vec!["a\rb"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize_lines("").is_empty());
    }
}
