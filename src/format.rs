use serde::{Deserialize, Serialize};
use std::path::Path;

/// Document formats recognised from a file's extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentFormat {
    /// Plain text (.txt)
    PlainText,
    /// Word documents (.doc, .docx)
    Word,
    /// OpenDocument text (.odt)
    OpenDocument,
    /// Rich Text Format (.rtf)
    RichText,
    /// Unknown extension
    Unknown,
}

impl DocumentFormat {
    /// File extensions associated with this format (without the dot)
    pub fn extensions(&self) -> &[&str] {
        match self {
            DocumentFormat::PlainText => &["txt"],
            DocumentFormat::Word => &["doc", "docx"],
            DocumentFormat::OpenDocument => &["odt"],
            DocumentFormat::RichText => &["rtf"],
            DocumentFormat::Unknown => &[],
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DocumentFormat::PlainText => "Plain text",
            DocumentFormat::Word => "Word",
            DocumentFormat::OpenDocument => "OpenDocument",
            DocumentFormat::RichText => "Rich Text",
            DocumentFormat::Unknown => "Unknown",
        }
    }

    /// Everything except plain text goes through the external converter
    pub fn needs_conversion(&self) -> bool {
        !matches!(self, DocumentFormat::PlainText)
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect the document format from a file path
///
/// The extension is compared case-insensitively.
///
/// # Examples
/// ```
/// use line_merge::{DocumentFormat, detect_format};
/// assert_eq!(detect_format("Original.txt"), DocumentFormat::PlainText);
/// assert_eq!(detect_format("report.DOCX"), DocumentFormat::Word);
/// assert_eq!(detect_format("notes.odt"), DocumentFormat::OpenDocument);
/// assert_eq!(detect_format("README"), DocumentFormat::Unknown);
/// ```
pub fn detect_format<P: AsRef<Path>>(path: P) -> DocumentFormat {
    let extension = path
        .as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "txt" => DocumentFormat::PlainText,
        "doc" | "docx" => DocumentFormat::Word,
        "odt" => DocumentFormat::OpenDocument,
        "rtf" => DocumentFormat::RichText,
        _ => DocumentFormat::Unknown,
    }
}

/// True when `path` can be compared without conversion
pub fn is_plain_text<P: AsRef<Path>>(path: P) -> bool {
    !detect_format(path).needs_conversion()
}
