//! Uploaded documents and text extraction.
//!
//! A [`Document`] is the raw bytes of one upload plus the MIME type it was
//! declared with. [`extract`] dispatches on the closed set of
//! [`DocumentKind`]s and returns the document's plain text.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::Result;

pub mod docx;
pub mod pdf;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_PLAIN_TEXT: &str = "text/plain";
pub const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_MSWORD: &str = "application/msword";
pub const MIME_OCTET_STREAM: &str = "application/octet-stream";

/// Number of characters shown in the extracted-text preview.
pub const PREVIEW_CHARS: usize = 500;

/// Supported document kinds, resolved from a declared MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Pdf,
    WordProcessor,
    /// Anything else. Extraction yields an empty string rather than an error.
    Unsupported,
}

impl DocumentKind {
    pub fn from_mime(mime: &str) -> Self {
        match mime {
            MIME_PDF => DocumentKind::Pdf,
            MIME_PLAIN_TEXT => DocumentKind::PlainText,
            MIME_DOCX | MIME_MSWORD => DocumentKind::WordProcessor,
            _ => DocumentKind::Unsupported,
        }
    }
}

/// Guess a MIME type from a file extension, the way a browser labels an upload.
pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path.extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => MIME_PDF,
        "txt" => MIME_PLAIN_TEXT,
        "docx" => MIME_DOCX,
        "doc" => MIME_MSWORD,
        _ => MIME_OCTET_STREAM,
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a document from disk. `mime` overrides the extension-based guess.
    pub fn open(path: impl AsRef<Path>, mime: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let name = path.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        let mime = mime.unwrap_or_else(|| mime_for_path(path)).to_string();

        info!("Opened {} ({}, {} bytes)", name, mime, bytes.len());
        Ok(Self::new(name, mime, bytes))
    }

    pub fn kind(&self) -> DocumentKind {
        DocumentKind::from_mime(&self.mime)
    }

    pub fn details(&self) -> FileDetails {
        FileDetails {
            filename: self.name.clone(),
            filetype: self.mime.clone(),
            filesize: format!("{:.2} KB", self.bytes.len() as f64 / 1024.0),
        }
    }
}

/// Informational summary shown after an upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileDetails {
    pub filename: String,
    pub filetype: String,
    pub filesize: String,
}

/// Extract the plain text of a document.
///
/// Unsupported kinds produce `""`. Parser failures from the PDF or
/// word-processor readers, and invalid UTF-8 in plain text, are returned
/// as errors.
pub fn extract(document: &Document) -> Result<String> {
    let text = match document.kind() {
        DocumentKind::Pdf => pdf::extract_text(&document.bytes)?,
        DocumentKind::PlainText => String::from_utf8(document.bytes.clone())?,
        DocumentKind::WordProcessor => docx::extract_text(&document.bytes)?,
        DocumentKind::Unsupported => {
            warn!("Unsupported document type {}, extracting nothing", document.mime);
            String::new()
        }
    };

    debug!("Extracted {} characters from {}", text.chars().count(), document.name);
    Ok(text)
}

/// First [`PREVIEW_CHARS`] characters of `text`, with `...` appended when cut.
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_mime() {
        assert_eq!(DocumentKind::from_mime(MIME_PDF), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_mime(MIME_PLAIN_TEXT), DocumentKind::PlainText);
        assert_eq!(DocumentKind::from_mime(MIME_DOCX), DocumentKind::WordProcessor);
        assert_eq!(DocumentKind::from_mime(MIME_MSWORD), DocumentKind::WordProcessor);
        assert_eq!(DocumentKind::from_mime("image/png"), DocumentKind::Unsupported);
    }

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("report.PDF")), MIME_PDF);
        assert_eq!(mime_for_path(Path::new("notes.txt")), MIME_PLAIN_TEXT);
        assert_eq!(mime_for_path(Path::new("essay.docx")), MIME_DOCX);
        assert_eq!(mime_for_path(Path::new("old.doc")), MIME_MSWORD);
        assert_eq!(mime_for_path(Path::new("photo.jpg")), MIME_OCTET_STREAM);
        assert_eq!(mime_for_path(Path::new("README")), MIME_OCTET_STREAM);
    }

    #[test]
    fn test_plain_text_roundtrip() {
        let text = "Grüße, world!\nSecond line — with unicode ✓";
        let doc = Document::new("a.txt", MIME_PLAIN_TEXT, text.as_bytes().to_vec());
        assert_eq!(extract(&doc).unwrap(), text);
    }

    #[test]
    fn test_plain_text_invalid_utf8_is_error() {
        let doc = Document::new("a.txt", MIME_PLAIN_TEXT, vec![0xff, 0xfe, 0x00]);
        assert!(extract(&doc).is_err());
    }

    #[test]
    fn test_unsupported_type_is_empty() {
        let doc = Document::new("cat.png", "image/png", vec![0x89, b'P', b'N', b'G']);
        assert_eq!(extract(&doc).unwrap(), "");
    }

    #[test]
    fn test_details_size_in_kb() {
        let doc = Document::new("a.txt", MIME_PLAIN_TEXT, vec![b'x'; 1536]);
        let details = doc.details();
        assert_eq!(details.filename, "a.txt");
        assert_eq!(details.filetype, MIME_PLAIN_TEXT);
        assert_eq!(details.filesize, "1.50 KB");

        let empty = Document::new("e.txt", MIME_PLAIN_TEXT, Vec::new());
        assert_eq!(empty.details().filesize, "0.00 KB");
    }

    #[test]
    fn test_preview_truncates_on_chars() {
        let short = "hello";
        assert_eq!(preview(short), "hello");

        let exact = "é".repeat(PREVIEW_CHARS);
        assert_eq!(preview(&exact), exact);

        let long = "é".repeat(PREVIEW_CHARS + 1);
        let cut = preview(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), PREVIEW_CHARS + 3);
    }
}
