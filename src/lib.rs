// Line addressing
pub mod line;

// File loading
pub mod file;

// Positional comparison
pub mod diff;

// User interaction
pub mod prompt;

// Difference resolution
pub mod merge;

// Line edits on the saved output
pub mod edit;

// Merged output persistence
pub mod store;

// Document format detection
pub mod format;

// External conversion
pub mod convert;

// Caller boundary
pub mod boundary;

// JSON output module
pub mod json;

pub mod config;
pub mod error;

// Re-exports
pub use line::{LineNumber, ParseLineNumberError, join_lines, line_at};
pub use file::{FileContent, FileError, LineFile, checksum, read_file, read_lines, split_lines};
pub use diff::{
    Comparison, Difference, FileComparison, TableWidths,
    compare_files, compare_lines, render_differences, render_table,
};
pub use prompt::{ConsoleInteraction, Interaction, ScriptedInteraction, TerminalInteraction};
pub use merge::{Selection, default_line, merge};
pub use edit::{
    EditError, EditResult, EditSession, LineEdit, SessionEnd,
    apply_line_edit, edit_line, run_edit_session,
};
pub use store::{MergedStore, write_lines};
pub use format::{DocumentFormat, detect_format, is_plain_text};
pub use convert::{Converter, converted_path, remove_temporary, strip_blank_lines};
pub use boundary::{ComparisonHandle, OutputBuffers, compare, copy_to_buffer, retrieve_content};
pub use json::{CompareResponse, generate_session_id};
pub use config::Config;
pub use error::{Error, Result};
