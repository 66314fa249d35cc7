//! File kind detection from filenames.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Supported document kinds, classified from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// PDF document
    Pdf,
    /// Word document (DOCX)
    Docx,
    /// Word document (legacy DOC)
    Doc,
    /// Plain text document
    Txt,
    /// HTML document
    Html,
    /// Anything else
    Unknown,
}

impl FileKind {
    /// Classify a file kind from its filename extension.
    ///
    /// # Example
    ///
    /// ```
    /// use unresume::detect::FileKind;
    ///
    /// assert_eq!(FileKind::from_filename("resume.pdf"), FileKind::Pdf);
    /// assert_eq!(FileKind::from_filename("resume.HTM"), FileKind::Html);
    /// assert_eq!(FileKind::from_filename("resume.xyz"), FileKind::Unknown);
    /// ```
    pub fn from_filename(filename: &str) -> Self {
        let extension = Path::new(filename)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "doc" => Self::Doc,
            "txt" => Self::Txt,
            "html" | "htm" => Self::Html,
            _ => Self::Unknown,
        }
    }

    /// Lowercase extension (with leading dot) for this kind.
    ///
    /// `Unknown` has no canonical extension and returns an empty string.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => ".pdf",
            Self::Docx => ".docx",
            Self::Doc => ".doc",
            Self::Txt => ".txt",
            Self::Html => ".html",
            Self::Unknown => "",
        }
    }

    /// Human-readable display string for this kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF Document",
            Self::Docx => "Word Document (DOCX)",
            Self::Doc => "Word Document (DOC)",
            Self::Txt => "Text Document",
            Self::Html => "HTML Document",
            Self::Unknown => "Unknown Document Type",
        }
    }

    /// Whether the kind is one the extraction adapter supports directly.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Whether the kind is plain text (eligible for the line-splitting
    /// fallback without secondary extraction).
    pub fn is_plain_text(&self) -> bool {
        matches!(self, Self::Txt)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Lowercase extension of a filename, including the leading dot.
pub fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}
