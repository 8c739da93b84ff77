//! Positional line comparison.
//!
//! Two line sequences are walked by index and every position whose contents
//! differ is recorded. There is no realignment: a line inserted near the top
//! of one file makes every later position differ.

use crate::error::Result;
use crate::file::{LineFile, read_lines};
use crate::line::{join_lines, line_at};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;
use tracing::debug;

/// A mismatch between the two sequences at one position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difference {
    /// 1-based position in the positional walk
    pub line_number: usize,
    /// Content of the first sequence, empty when it has no line here
    pub left: String,
    /// Content of the second sequence, empty when it has no line here
    pub right: String,
}

/// Result of comparing two line sequences
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    /// Differences ordered by strictly increasing line number
    pub differences: Vec<Difference>,
    /// Lines of the first sequence, each terminated by `\n`
    pub left_text: String,
    /// Lines of the second sequence, each terminated by `\n`
    pub right_text: String,
}

impl Comparison {
    /// True when the two sequences are identical
    pub fn is_identical(&self) -> bool {
        self.differences.is_empty()
    }
}

/// Two files loaded from disk together with their comparison
#[derive(Debug, Clone)]
pub struct FileComparison {
    pub left: LineFile,
    pub right: LineFile,
    pub comparison: Comparison,
}

/// Compare two line sequences position by position
///
/// # Example
/// ```
/// use line_merge::compare_lines;
/// let left = vec!["x".to_string(), "y".to_string()];
/// let right = vec!["x".to_string(), "z".to_string()];
/// let comparison = compare_lines(&left, &right);
/// assert_eq!(comparison.differences.len(), 1);
/// assert_eq!(comparison.differences[0].line_number, 2);
/// ```
pub fn compare_lines(left: &[String], right: &[String]) -> Comparison {
    let max_lines = left.len().max(right.len());

    let differences = (0..max_lines)
        .filter_map(|i| {
            let left_line = line_at(left, i);
            let right_line = line_at(right, i);
            (left_line != right_line).then(|| Difference {
                line_number: i + 1,
                left: left_line.to_string(),
                right: right_line.to_string(),
            })
        })
        .collect();

    Comparison {
        differences,
        left_text: join_lines(left),
        right_text: join_lines(right),
    }
}

/// Load two files and compare their lines
///
/// The first file is loaded before the second; a failure on either side
/// aborts the comparison.
pub fn compare_files<P: AsRef<Path>, Q: AsRef<Path>>(left: P, right: Q) -> Result<FileComparison> {
    let left = read_lines(left)?;
    let right = read_lines(right)?;

    let comparison = compare_lines(&left.lines, &right.lines);
    debug!(
        left = %left.path,
        right = %right.path,
        differences = comparison.differences.len(),
        "compared files"
    );

    Ok(FileComparison {
        left,
        right,
        comparison,
    })
}

/// One line per difference: `Line {n}: File1 -> {left}, File2 -> {right}`
pub fn render_differences(differences: &[Difference]) -> String {
    let mut out = String::new();
    for diff in differences {
        let _ = writeln!(
            out,
            "Line {}: File1 -> {}, File2 -> {}",
            diff.line_number, diff.left, diff.right
        );
    }
    out
}

/// Column widths of the differences table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableWidths {
    pub line: usize,
    pub content: usize,
}

impl Default for TableWidths {
    fn default() -> Self {
        Self {
            line: 10,
            content: 70,
        }
    }
}

/// Fixed-width, left-aligned table of differences
///
/// Cells wider than their column are not truncated.
pub fn render_table(differences: &[Difference], widths: TableWidths) -> String {
    let TableWidths { line, content } = widths;
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "List of differences");
    let _ = writeln!(out);
    let header = format!(
        "{:<line$}{:<content$}{:<content$}",
        "Line", "First file Content", "Second file Content"
    );
    let _ = writeln!(out, "{}", header.trim_end());
    let _ = writeln!(out, "{}", "-".repeat(line.saturating_add(content.saturating_mul(2))));

    for diff in differences {
        let row = format!(
            "{:<line$}{:<content$}{:<content$}",
            diff.line_number, diff.left, diff.right
        );
        let _ = writeln!(out, "{}", row.trim_end());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_identical_sequences() {
        let a = lines(&["one", "two", "three"]);
        let comparison = compare_lines(&a, &a.clone());

        assert!(comparison.is_identical());
        assert_eq!(comparison.left_text, comparison.right_text);
        assert_eq!(comparison.left_text, "one\ntwo\nthree\n");
    }

    #[test]
    fn test_single_changed_line() {
        let comparison = compare_lines(&lines(&["x", "y"]), &lines(&["x", "z"]));

        assert_eq!(
            comparison.differences,
            vec![Difference {
                line_number: 2,
                left: "y".to_string(),
                right: "z".to_string(),
            }]
        );
    }

    #[test]
    fn test_empty_left_against_three_lines() {
        let comparison = compare_lines(&[], &lines(&["a", "b", "c"]));

        let numbers: Vec<usize> = comparison.differences.iter().map(|d| d.line_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(comparison.differences.iter().all(|d| d.left.is_empty()));
        assert_eq!(comparison.left_text, "");
        assert_eq!(comparison.right_text, "a\nb\nc\n");
    }

    #[test]
    fn test_insertion_shifts_every_following_line() {
        let left = lines(&["a", "b", "c"]);
        let right = lines(&["new", "a", "b", "c"]);

        let comparison = compare_lines(&left, &right);

        assert_eq!(comparison.differences.len(), 4);
        assert_eq!(comparison.differences[3].left, "");
        assert_eq!(comparison.differences[3].right, "c");
    }

    #[test]
    fn test_full_text_is_not_padded() {
        let comparison = compare_lines(&lines(&["a", "b", "c"]), &lines(&["a"]));
        assert_eq!(comparison.left_text, "a\nb\nc\n");
        assert_eq!(comparison.right_text, "a\n");
    }

    #[test]
    fn test_render_differences() {
        let comparison = compare_lines(&lines(&["x", "y", "q"]), &lines(&["x", "z"]));
        assert_eq!(
            render_differences(&comparison.differences),
            "Line 2: File1 -> y, File2 -> z\nLine 3: File1 -> q, File2 -> \n"
        );
        assert_eq!(render_differences(&[]), "");
    }

    #[test]
    fn test_render_table_columns() {
        let comparison = compare_lines(&lines(&["x", "y"]), &lines(&["x", "z"]));
        let table = render_table(&comparison.differences, TableWidths { line: 6, content: 4 });
        let rows: Vec<&str> = table.lines().collect();

        assert_eq!(rows[1], "List of differences");
        assert_eq!(rows[3], "Line  First file ContentSecond file Content");
        assert_eq!(rows[4], "-".repeat(14));
        assert_eq!(rows[5], "2     y   z");
    }

    #[test]
    fn test_compare_files_missing_left() {
        let dir = tempfile::tempdir().unwrap();
        let right = dir.path().join("right.txt");
        std::fs::write(&right, "a\n").unwrap();

        let result = compare_files(dir.path().join("missing.txt"), &right);
        assert!(matches!(result, Err(crate::Error::FileNotFound(_))));
    }

    #[test]
    fn test_compare_files_empty_right() {
        let dir = tempfile::tempdir().unwrap();
        let left = dir.path().join("left.txt");
        let right = dir.path().join("right.txt");
        std::fs::write(&left, "a\n").unwrap();
        std::fs::write(&right, "\n\n").unwrap();

        let result = compare_files(&left, &right);
        assert!(matches!(result, Err(crate::Error::EmptyFile(_))));
    }

    #[test]
    fn test_compare_files_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let left = dir.path().join("left.txt");
        let right = dir.path().join("right.txt");
        std::fs::write(&left, "a\n\nb\n").unwrap();
        std::fs::write(&right, "a\nb\n").unwrap();

        let loaded = compare_files(&left, &right).unwrap();
        assert!(loaded.comparison.is_identical());
        assert_eq!(loaded.left.lines, loaded.right.lines);
    }
}
