use crate::edit::{EditSession, SessionEnd, run_edit_session};
use crate::error::{Error, Result};
use crate::prompt::Interaction;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Truncate `path` and write one `\n`-terminated record per line
///
/// The file is rewritten in place; there is no temp-file-then-rename step.
pub fn write_lines<P: AsRef<Path>>(path: P, lines: &[String]) -> Result<()> {
    let path = path.as_ref();
    let write_error = |err: std::io::Error| Error::WriteError {
        path: path.display().to_string(),
        reason: err.to_string(),
    };

    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{}", line).map_err(write_error)?;
    }
    writer.flush().map_err(write_error)?;
    Ok(())
}

/// The merged line sequence and the file it is saved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedStore {
    lines: Vec<String>,
}

impl MergedStore {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Write the merged lines to `path`, replacing any existing content
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_lines(path.as_ref(), &self.lines)?;
        info!(path = %path.as_ref().display(), lines = self.lines.len(), "merged output saved");
        Ok(())
    }

    /// Offer to edit the saved file and run the edit session if accepted
    ///
    /// Only `Y` (or `y`) accepts. Consent is asked once; after that the
    /// session keeps asking for edits until one is rejected or input ends.
    pub fn prompt_edit<P: AsRef<Path>>(&self, path: P, interaction: &mut dyn Interaction) -> Result<EditSession> {
        interaction.say("")?;
        if interaction.confirm("Do you want to modify the output file? Enter \"Y\" if you want.")? {
            return run_edit_session(path, interaction);
        }

        interaction.say("Program closed. Please check the output file accordingly.")?;
        Ok(EditSession {
            applied: Vec::new(),
            end: SessionEnd::Declined,
        })
    }
}
