use crate::error::{Error, Result};
use crate::file::{checksum, read_file};
use crate::line::{LineNumber, ParseLineNumberError};
use crate::prompt::Interaction;
use crate::store::write_lines;
use std::path::Path;
use tracing::{debug, info};

/// Replacement of one line's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEdit {
    /// Line to replace (1-indexed)
    pub line_number: LineNumber,
    /// New content for the line
    pub replacement: String,
}

/// Result of an applied line edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    /// Line that was replaced
    pub line_number: LineNumber,
    /// Content the line held before the edit
    pub previous: String,
    /// BLAKE3 checksum of the rewritten content (hex-encoded)
    pub new_checksum: String,
}

/// Reasons a line edit is rejected before the file is touched
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// Target line is past the end of the file
    #[error(
        "The specified line number {line_number} exceeds the number of lines in the file ({line_count})"
    )]
    LineOutOfRange {
        line_number: usize,
        line_count: usize,
    },
    /// Target is zero or not a number
    #[error("Invalid line number: {0}")]
    InvalidLineNumber(#[from] ParseLineNumberError),
}

/// How an edit session came to an end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user did not ask to edit
    Declined,
    /// An edit was rejected and reported; the file kept its last content
    Rejected(EditError),
    /// Input ran out while an edit was being requested
    InputClosed,
}

/// Summary of one interactive edit session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    /// Edits applied, in order
    pub applied: Vec<EditResult>,
    pub end: SessionEnd,
}

/// Apply a line edit to an in-memory line list
///
/// # Returns
/// * `Ok(EditResult)` - The line was replaced
/// * `Err(EditError::LineOutOfRange)` - The list is left unchanged
pub fn apply_line_edit(lines: &mut [String], edit: &LineEdit) -> std::result::Result<EditResult, EditError> {
    if !edit.line_number.is_within(lines.len()) {
        return Err(EditError::LineOutOfRange {
            line_number: edit.line_number.get(),
            line_count: lines.len(),
        });
    }

    let slot = &mut lines[edit.line_number.to_index()];
    let previous = std::mem::replace(slot, edit.replacement.clone());

    let new_checksum = checksum(&crate::line::join_lines(lines));

    Ok(EditResult {
        line_number: edit.line_number,
        previous,
        new_checksum,
    })
}

/// Ask for a line number and its new content
fn ask_line_edit(interaction: &mut dyn Interaction) -> Result<LineEdit> {
    interaction.say("Enter the line number and the content you want to changed.")?;
    let number = interaction
        .prompt("Line number: ")?
        .ok_or_else(|| Error::InputClosed("line number".to_string()))?;
    let replacement = interaction
        .prompt("Content to be changed: ")?
        .ok_or_else(|| Error::InputClosed("replacement content".to_string()))?;

    let line_number = number.parse::<LineNumber>().map_err(EditError::from)?;
    Ok(LineEdit {
        line_number,
        replacement,
    })
}

/// Replace one line of the file at `path`, asking the user which and with what
///
/// The whole file is read into memory, the line is replaced, and the whole
/// file is truncated and rewritten. A rejected edit leaves the file as it
/// was. Blank lines in the file count as lines here.
pub fn edit_line<P: AsRef<Path>>(path: P, interaction: &mut dyn Interaction) -> Result<EditResult> {
    let path = path.as_ref();
    let edit = ask_line_edit(interaction)?;

    let file = read_file(path)?;
    let mut lines: Vec<String> = file.content.lines().map(str::to_string).collect();

    let result = apply_line_edit(&mut lines, &edit)?;
    write_lines(path, &lines)?;

    info!(
        path = %path.display(),
        line = %result.line_number,
        checksum = %result.new_checksum,
        "line edited"
    );
    interaction.say("Output file changed and saved accordingly.")?;
    Ok(result)
}

/// Keep editing lines until an edit is rejected or input runs out
///
/// Consent is not asked again between edits.
pub fn run_edit_session<P: AsRef<Path>>(path: P, interaction: &mut dyn Interaction) -> Result<EditSession> {
    let path = path.as_ref();
    let mut applied = Vec::new();

    loop {
        match edit_line(path, interaction) {
            Ok(result) => applied.push(result),
            Err(Error::Edit(err)) => {
                debug!(%err, "edit rejected");
                interaction.say(&format!("Error: {}", err))?;
                return Ok(EditSession {
                    applied,
                    end: SessionEnd::Rejected(err),
                });
            }
            Err(Error::InputClosed(_)) => {
                return Ok(EditSession {
                    applied,
                    end: SessionEnd::InputClosed,
                });
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedInteraction;
    use std::fs;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn edit(line: usize, replacement: &str) -> LineEdit {
        LineEdit {
            line_number: LineNumber::new(line).unwrap(),
            replacement: replacement.to_string(),
        }
    }

    #[test]
    fn test_apply_line_edit_replaces_line() {
        let mut content = lines(&["a", "b", "c"]);
        let result = apply_line_edit(&mut content, &edit(2, "B")).unwrap();

        assert_eq!(content, lines(&["a", "B", "c"]));
        assert_eq!(result.previous, "b");
        assert_eq!(result.new_checksum, checksum("a\nB\nc\n"));
    }

    #[test]
    fn test_apply_line_edit_out_of_range() {
        let mut content = lines(&["a", "b", "c"]);
        let result = apply_line_edit(&mut content, &edit(10, "x"));

        assert_eq!(
            result,
            Err(EditError::LineOutOfRange {
                line_number: 10,
                line_count: 3
            })
        );
        assert_eq!(content, lines(&["a", "b", "c"]));
    }

    #[test]
    fn test_edit_line_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "one\ntwo\nthree\n").unwrap();
        let mut script = ScriptedInteraction::new(["3", "THREE and more"]);

        let result = edit_line(&path, &mut script).unwrap();

        assert_eq!(result.previous, "three");
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\nTHREE and more\n");
    }

    #[test]
    fn test_edit_line_out_of_range_leaves_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "one\ntwo\nthree").unwrap();
        let mut script = ScriptedInteraction::new(["10", "ten"]);

        let result = edit_line(&path, &mut script);

        assert!(matches!(
            result,
            Err(Error::Edit(EditError::LineOutOfRange { line_number: 10, line_count: 3 }))
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\nthree");
    }

    #[test]
    fn test_edit_line_keeps_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "one\n\nthree\n").unwrap();
        let mut script = ScriptedInteraction::new(["2", "two"]);

        edit_line(&path, &mut script).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\nthree\n");
    }

    #[test]
    fn test_edit_line_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut script = ScriptedInteraction::new(["1", "x"]);

        let result = edit_line(dir.path().join("gone.txt"), &mut script);
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_session_chains_edits_until_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "a\nb\nc\n").unwrap();
        let mut script = ScriptedInteraction::new(["1", "A", "3", "C", "9", "nope"]);

        let session = run_edit_session(&path, &mut script).unwrap();

        assert_eq!(session.applied.len(), 2);
        assert_eq!(
            session.end,
            SessionEnd::Rejected(EditError::LineOutOfRange {
                line_number: 9,
                line_count: 3
            })
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "A\nb\nC\n");
        assert!(script.transcript.iter().any(|m| m.starts_with("Error: The specified line number 9")));
    }

    #[test]
    fn test_session_ends_when_input_closes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "a\nb\n").unwrap();
        let mut script = ScriptedInteraction::new(["2", "B"]);

        let session = run_edit_session(&path, &mut script).unwrap();

        assert_eq!(session.applied.len(), 1);
        assert_eq!(session.end, SessionEnd::InputClosed);
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nB\n");
    }

    #[test]
    fn test_session_rejects_zero_line_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "a\n").unwrap();
        let mut script = ScriptedInteraction::new(["0", "x"]);

        let session = run_edit_session(&path, &mut script).unwrap();

        assert_eq!(
            session.end,
            SessionEnd::Rejected(EditError::InvalidLineNumber(ParseLineNumberError::Zero))
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\n");
    }
}
