//! Settings loaded from an optional TOML file.
//!
//! ```toml
//! [defaults]
//! left = "Original.txt"
//! right = "Modified.txt"
//! output = "Output.txt"
//!
//! [converter]
//! program = "pandoc"
//! args = ["--to=plain+smart", "--wrap=none"]
//!
//! [report]
//! line_width = 10
//! content_width = 70
//! ```

use crate::diff::TableWidths;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File looked up in the working directory when no config path is given
pub const CONFIG_FILE: &str = "line-merge.toml";

/// Widest column the differences table accepts
pub const MAX_COLUMN_WIDTH: usize = 1024;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub defaults: DefaultPaths,
    pub converter: ConverterSettings,
    pub report: ReportSettings,
}

/// Paths used when the user leaves a path prompt empty
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DefaultPaths {
    pub left: PathBuf,
    pub right: PathBuf,
    pub output: PathBuf,
}

impl Default for DefaultPaths {
    fn default() -> Self {
        Self {
            left: PathBuf::from("Original.txt"),
            right: PathBuf::from("Modified.txt"),
            output: PathBuf::from("Output.txt"),
        }
    }
}

/// External document-to-text converter
///
/// Invoked as `program args... <input> -o <output>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConverterSettings {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            program: "pandoc".to_string(),
            args: vec!["--to=plain+smart".to_string(), "--wrap=none".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub line_width: usize,
    pub content_width: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        let widths = TableWidths::default();
        Self {
            line_width: widths.line,
            content_width: widths.content,
        }
    }
}

impl ReportSettings {
    /// Reject column widths outside `1..=MAX_COLUMN_WIDTH`
    pub fn validate(&self) -> Result<()> {
        for (name, width) in [("line_width", self.line_width), ("content_width", self.content_width)] {
            if width == 0 || width > MAX_COLUMN_WIDTH {
                return Err(Error::Config(format!(
                    "report.{} must be between 1 and {}, got {}",
                    name, MAX_COLUMN_WIDTH, width
                )));
            }
        }
        Ok(())
    }

    pub fn table_widths(&self) -> TableWidths {
        TableWidths {
            line: self.line_width,
            content: self.content_width,
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.report.validate()?;
        Ok(config)
    }

    /// Load `explicit` if given, else `line-merge.toml` if present, else defaults
    ///
    /// An explicit path that cannot be read is an error; a missing
    /// `line-merge.toml` is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(CONFIG_FILE);
                if !fallback.is_file() {
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let text = fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml(&text)?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}
