//! Entry points for callers outside the crate (a CLI, a GUI, a foreign-function layer).
//!
//! Results cross the boundary as owned values. A [`ComparisonHandle`] is
//! released explicitly with [`ComparisonHandle::release`]; fixed-capacity
//! output areas are filled with [`copy_to_buffer`], which refuses rather than
//! truncates.

use crate::convert::{Converter, remove_temporary};
use crate::diff::{Comparison, Difference, compare_files, render_differences};
use crate::error::{Error, Result};
use crate::file::read_file;
use crate::format::is_plain_text;
use crate::line::join_lines;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Owned result of one comparison
#[derive(Debug)]
pub struct ComparisonHandle {
    id: Uuid,
    comparison: Comparison,
    differences_text: String,
}

/// Caller-supplied output areas for [`ComparisonHandle::write_into`]
pub struct OutputBuffers<'a> {
    pub left: &'a mut [u8],
    pub right: &'a mut [u8],
    pub differences: &'a mut [u8],
}

impl ComparisonHandle {
    fn new(comparison: Comparison) -> Self {
        let differences_text = render_differences(&comparison.differences);
        Self {
            id: Uuid::new_v4(),
            comparison,
            differences_text,
        }
    }

    /// Identifier of this comparison, used in logs and reports
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn left_text(&self) -> &str {
        &self.comparison.left_text
    }

    pub fn right_text(&self) -> &str {
        &self.comparison.right_text
    }

    /// Differences rendered one per line
    pub fn differences_text(&self) -> &str {
        &self.differences_text
    }

    pub fn differences(&self) -> &[Difference] {
        &self.comparison.differences
    }

    pub fn comparison(&self) -> &Comparison {
        &self.comparison
    }

    /// Copy the three texts into caller buffers, NUL-terminated
    ///
    /// Nothing is copied unless every text fits its buffer.
    pub fn write_into(&self, buffers: &mut OutputBuffers<'_>) -> Result<()> {
        for (text, buffer) in [
            (self.left_text(), &buffers.left),
            (self.right_text(), &buffers.right),
            (self.differences_text(), &buffers.differences),
        ] {
            check_capacity(text, buffer.len())?;
        }

        copy_to_buffer(&self.comparison.left_text, &mut *buffers.left)?;
        copy_to_buffer(&self.comparison.right_text, &mut *buffers.right)?;
        copy_to_buffer(&self.differences_text, &mut *buffers.differences)?;
        Ok(())
    }

    /// Hand the handle back, ending the caller's ownership of its data
    pub fn release(self) {
        debug!(id = %self.id, "comparison released");
    }
}

fn check_capacity(text: &str, capacity: usize) -> Result<()> {
    if text.len() >= capacity {
        return Err(Error::BufferTooSmall {
            needed: text.len() + 1,
            capacity,
        });
    }
    Ok(())
}

/// Copy `text` into `buffer` followed by a NUL byte
///
/// # Returns
/// * `Ok(len)` - Number of text bytes copied (the terminator not counted)
/// * `Err(Error::BufferTooSmall)` - `buffer` cannot hold the text and terminator
pub fn copy_to_buffer(text: &str, buffer: &mut [u8]) -> Result<usize> {
    check_capacity(text, buffer.len())?;
    let bytes = text.as_bytes();
    buffer[..bytes.len()].copy_from_slice(bytes);
    buffer[bytes.len()] = 0;
    Ok(bytes.len())
}

/// Full content of a file, every line `\n`-terminated
///
/// Unlike comparison input, blank lines are kept. A zero-byte file is
/// rejected.
pub fn retrieve_content<P: AsRef<Path>>(path: P) -> Result<String> {
    let file = read_file(path)?;
    if file.content.is_empty() {
        return Err(Error::EmptyFile(file.path));
    }
    let lines: Vec<String> = file.content.lines().map(str::to_string).collect();
    Ok(join_lines(&lines))
}

/// Compare two documents, converting any that are not plain text first
///
/// Converted copies are written to a scratch directory and removed once
/// both sides have been read.
pub fn compare<P: AsRef<Path>, Q: AsRef<Path>>(
    left: P,
    right: Q,
    converter: &Converter,
) -> Result<ComparisonHandle> {
    let scratch = tempfile::Builder::new().prefix("line-merge-").tempdir()?;
    let mut converted: Vec<PathBuf> = Vec::new();

    // One directory per side so inputs sharing a stem do not collide
    let mut prepare = |path: &Path, side: &str| -> Result<PathBuf> {
        if is_plain_text(path) {
            return Ok(path.to_path_buf());
        }
        let out_dir = scratch.path().join(side);
        fs::create_dir_all(&out_dir)?;
        let output = converter.convert(path, &out_dir)?;
        converted.push(output.clone());
        Ok(output)
    };

    let result = prepare(left.as_ref(), "left")
        .and_then(|left| Ok((left, prepare(right.as_ref(), "right")?)))
        .and_then(|(left, right)| compare_files(left, right));

    for path in &converted {
        remove_temporary(path);
    }

    let handle = ComparisonHandle::new(result?.comparison);
    debug!(
        id = %handle.id,
        differences = handle.differences().len(),
        "comparison ready"
    );
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_compare_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let left = write(dir.path(), "Original.txt", "x\ny\n");
        let right = write(dir.path(), "Modified.txt", "x\nz\n");

        let handle = compare(&left, &right, &Converter::default()).unwrap();

        assert_eq!(handle.left_text(), "x\ny\n");
        assert_eq!(handle.right_text(), "x\nz\n");
        assert_eq!(handle.differences_text(), "Line 2: File1 -> y, File2 -> z\n");
        handle.release();
    }

    #[test]
    fn test_compare_identical_has_empty_differences() {
        let dir = tempfile::tempdir().unwrap();
        let left = write(dir.path(), "a.txt", "same\nlines\n");
        let right = write(dir.path(), "b.txt", "same\n\nlines\n");

        let handle = compare(&left, &right, &Converter::default()).unwrap();

        assert_eq!(handle.differences_text(), "");
        assert_eq!(handle.left_text(), handle.right_text());
    }

    #[test]
    fn test_compare_conversion_failure() {
        let dir = tempfile::tempdir().unwrap();
        let left = write(dir.path(), "a.odt", "x\n");
        let right = write(dir.path(), "b.txt", "x\n");
        let converter = Converter::new(crate::config::ConverterSettings {
            program: "line-merge-no-such-converter".to_string(),
            args: Vec::new(),
        });

        let result = compare(&left, &right, &converter);
        assert!(matches!(result, Err(Error::ConversionFailed { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_compare_converts_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let left = write(dir.path(), "a.odt", "x\n\ny\n");
        let right = write(dir.path(), "b.txt", "x\nz\n");
        let converter = Converter::new(crate::config::ConverterSettings {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "cp \"$1\" \"$3\"".to_string(), "sh".to_string()],
        });

        let handle = compare(&left, &right, &converter).unwrap();

        assert_eq!(handle.left_text(), "x\ny\n");
        assert_eq!(handle.differences().len(), 1);
        assert!(!dir.path().join("a.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_compare_converts_inputs_sharing_a_stem() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("v2")).unwrap();
        let left = write(dir.path(), "Report.docx", "alpha\nbeta\n");
        let right = write(&dir.path().join("v2"), "Report.odt", "alpha\nGAMMA\n");
        let converter = Converter::new(crate::config::ConverterSettings {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "cp \"$1\" \"$3\"".to_string(), "sh".to_string()],
        });

        let handle = compare(&left, &right, &converter).unwrap();

        assert_eq!(handle.left_text(), "alpha\nbeta\n");
        assert_eq!(handle.right_text(), "alpha\nGAMMA\n");
        assert_eq!(handle.differences_text(), "Line 2: File1 -> beta, File2 -> GAMMA\n");
    }

    #[test]
    fn test_copy_to_buffer_fits() {
        let mut buffer = [0xAAu8; 4];
        assert_eq!(copy_to_buffer("abc", &mut buffer).unwrap(), 3);
        assert_eq!(&buffer, b"abc\0");
    }

    #[test]
    fn test_copy_to_buffer_too_small() {
        let mut buffer = [0xAAu8; 3];
        let result = copy_to_buffer("abc", &mut buffer);

        assert!(matches!(
            result,
            Err(Error::BufferTooSmall { needed: 4, capacity: 3 })
        ));
        assert_eq!(buffer, [0xAA; 3]);
    }

    #[test]
    fn test_write_into_copies_nothing_when_one_buffer_is_short() {
        let dir = tempfile::tempdir().unwrap();
        let left = write(dir.path(), "a.txt", "x\ny\n");
        let right = write(dir.path(), "b.txt", "x\nz\n");
        let handle = compare(&left, &right, &Converter::default()).unwrap();

        let mut left_buf = [0u8; 64];
        let mut right_buf = [0u8; 64];
        let mut diff_buf = [0u8; 8];
        let mut buffers = OutputBuffers {
            left: &mut left_buf,
            right: &mut right_buf,
            differences: &mut diff_buf,
        };

        assert!(matches!(
            handle.write_into(&mut buffers),
            Err(Error::BufferTooSmall { .. })
        ));
        assert_eq!(left_buf, [0u8; 64]);
    }

    #[test]
    fn test_write_into_success() {
        let dir = tempfile::tempdir().unwrap();
        let left = write(dir.path(), "a.txt", "x\n");
        let right = write(dir.path(), "b.txt", "y\n");
        let handle = compare(&left, &right, &Converter::default()).unwrap();

        let mut left_buf = [0u8; 8];
        let mut right_buf = [0u8; 8];
        let mut diff_buf = [0u8; 64];
        let mut buffers = OutputBuffers {
            left: &mut left_buf,
            right: &mut right_buf,
            differences: &mut diff_buf,
        };
        handle.write_into(&mut buffers).unwrap();

        assert_eq!(&left_buf[..3], b"x\n\0");
        assert_eq!(&right_buf[..3], b"y\n\0");
        let expected = b"Line 1: File1 -> x, File2 -> y\n\0";
        assert_eq!(&diff_buf[..expected.len()], expected);
    }

    #[test]
    fn test_retrieve_content_keeps_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "a.txt", "one\n\ntwo");
        assert_eq!(retrieve_content(&path).unwrap(), "one\n\ntwo\n");
    }

    #[test]
    fn test_retrieve_content_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "a.txt", "");
        assert!(matches!(retrieve_content(&path), Err(Error::EmptyFile(_))));
    }
}
