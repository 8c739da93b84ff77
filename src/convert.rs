//! External document-to-text conversion and cleanup of its artifacts.

use crate::config::ConverterSettings;
use crate::error::{Error, Result};
use crate::file::{read_file, split_lines};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

/// Path the converter writes for `input`: `<out_dir>/<stem>.txt`
pub fn converted_path(input: &Path, out_dir: &Path) -> PathBuf {
    let stem = input.file_stem().map(|s| s.to_os_string()).unwrap_or_default();
    let mut name = stem;
    name.push(".txt");
    out_dir.join(name)
}

/// Runs the configured converter program
#[derive(Debug, Clone, Default)]
pub struct Converter {
    settings: ConverterSettings,
}

impl Converter {
    pub fn new(settings: ConverterSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ConverterSettings {
        &self.settings
    }

    /// Convert `input` to plain text in `out_dir`
    ///
    /// The produced file has its blank lines removed before the path is
    /// returned.
    ///
    /// # Returns
    /// * `Err(Error::FileNotFound)` - `input` does not exist
    /// * `Err(Error::ConversionFailed)` - The program could not start or exited non-zero
    pub fn convert(&self, input: &Path, out_dir: &Path) -> Result<PathBuf> {
        if !input.is_file() {
            return Err(Error::FileNotFound(input.display().to_string()));
        }
        let input_abs = std::path::absolute(input)?;
        let output = converted_path(&input_abs, out_dir);

        let failed = |reason: String| Error::ConversionFailed {
            path: input_abs.display().to_string(),
            reason,
        };

        debug!(program = %self.settings.program, input = %input_abs.display(), "running converter");
        let status = Command::new(&self.settings.program)
            .args(&self.settings.args)
            .arg(&input_abs)
            .arg("-o")
            .arg(&output)
            .status()
            .map_err(|e| failed(format!("could not run {}: {}", self.settings.program, e)))?;

        if !status.success() {
            return Err(failed(format!("{} exited with {}", self.settings.program, status)));
        }
        if !output.is_file() {
            return Err(failed(format!("{} produced no output", self.settings.program)));
        }

        strip_blank_lines(&output)?;
        info!(input = %input_abs.display(), output = %output.display(), "converted to plain text");
        Ok(output)
    }
}

/// Rewrite `path` without its zero-length lines
///
/// The cleaned text goes to a temporary file in the same directory which is
/// then renamed over `path`.
pub fn strip_blank_lines(path: &Path) -> Result<()> {
    let content = read_file(path)?;
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    for line in split_lines(&content.content) {
        writeln!(temp, "{}", line)?;
    }
    temp.flush()?;

    remove_temporary(path);
    temp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

/// Best-effort removal of a temporary artifact
///
/// Clears the read-only attribute first. Failures are logged and otherwise
/// ignored.
#[allow(clippy::permissions_set_readonly_false)]
pub fn remove_temporary(path: &Path) {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(_) => {
            warn!(path = %path.display(), "temporary file does not exist");
            return;
        }
    };

    let mut permissions = metadata.permissions();
    if permissions.readonly() {
        permissions.set_readonly(false);
        if let Err(e) = fs::set_permissions(path, permissions) {
            warn!(path = %path.display(), error = %e, "failed to clear read-only attribute");
        }
    }

    match fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "removed temporary file"),
        Err(e) => warn!(path = %path.display(), error = %e, "failed to remove temporary file"),
    }
}
