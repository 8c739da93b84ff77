use std::fs;
use std::path::Path;
use tracing::debug;

/// Content of a file read into memory
#[derive(Debug, Clone)]
pub struct FileContent {
    /// Path the file was read from
    pub path: String,
    /// File content as valid UTF-8 string
    pub content: String,
    /// Byte length of the content
    pub len: usize,
    /// BLAKE3 hash of the content (hex-encoded)
    pub checksum: String,
}

/// A file loaded as a sequence of non-empty lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFile {
    /// Path the file was read from
    pub path: String,
    /// Lines with terminators stripped, zero-length lines dropped
    pub lines: Vec<String>,
    /// BLAKE3 hash of the raw content (hex-encoded)
    pub checksum: String,
}

/// Error types for file operations
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("The file \"{0}\" is empty")]
    Empty(String),
    #[error("Invalid UTF-8 in file: {0}")]
    InvalidUtf8(String),
}

/// Hex-encoded BLAKE3 hash of some text
pub fn checksum(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}

/// Read a file from disk with UTF-8 validation
///
/// # Arguments
/// * `path` - Path to the file to read
///
/// # Returns
/// * `Ok(FileContent)` - File content with metadata
/// * `Err(FileError)` - File cannot be opened or holds invalid UTF-8
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<FileContent, FileError> {
    let path_ref = path.as_ref();
    let display = path_ref.display().to_string();

    // Anything that stops us opening the file counts as not found
    let bytes = fs::read(path_ref).map_err(|_| FileError::NotFound(display.clone()))?;

    let content = String::from_utf8(bytes).map_err(|_| FileError::InvalidUtf8(display.clone()))?;

    let len = content.len();
    let checksum = checksum(&content);

    Ok(FileContent {
        path: display,
        content,
        len,
        checksum,
    })
}

/// Split text into lines, dropping every zero-length line
///
/// Terminators (`\n` or `\r\n`) are stripped; nothing else is trimmed, so a
/// line holding only spaces is kept.
pub fn split_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load a file as an ordered sequence of non-empty lines
///
/// # Returns
/// * `Err(FileError::Empty)` when no line survives the blank-line filter
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<LineFile, FileError> {
    let file = read_file(path)?;
    let lines = split_lines(&file.content);

    if lines.is_empty() {
        return Err(FileError::Empty(file.path));
    }

    debug!(path = %file.path, lines = lines.len(), checksum = %file.checksum, "loaded line file");

    Ok(LineFile {
        path: file.path,
        lines,
        checksum: file.checksum,
    })
}
