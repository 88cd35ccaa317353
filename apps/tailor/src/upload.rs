//! Resume file selection: MIME detection and validation.

use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::errors::AppError;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_TEXT: &str = "text/plain";
pub const MIME_UNKNOWN: &str = "application/octet-stream";

/// The only upload types the tailoring endpoint can parse.
pub const ACCEPTED_MIME_TYPES: &[&str] = &[MIME_PDF, MIME_DOCX, MIME_TEXT];

pub const INVALID_FILE_MESSAGE: &str = "Please upload a PDF, DOCX, or TXT file";

/// A file picked or dropped by the user, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// A file that passed validation and may be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    mime: String,
    bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl FileCandidate {
    /// Reads a local file, deriving its MIME type from the extension.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read resume file '{}'", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime = mime_for_path(path).to_string();
        debug!("Read {} bytes from {} ({mime})", bytes.len(), path.display());
        Ok(Self { name, mime, bytes })
    }

    /// Accepts the candidate iff its MIME type is one of the accepted types.
    pub fn validate(self) -> Result<SelectedFile, AppError> {
        if is_accepted_mime(&self.mime) {
            Ok(SelectedFile {
                name: self.name,
                mime: self.mime,
                bytes: self.bytes,
            })
        } else {
            Err(AppError::Validation(INVALID_FILE_MESSAGE.to_string()))
        }
    }
}

pub fn is_accepted_mime(mime: &str) -> bool {
    ACCEPTED_MIME_TYPES.contains(&mime)
}

/// Maps a file extension to the MIME type a browser would report for it.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("pdf") => MIME_PDF,
        Some("docx") => MIME_DOCX,
        Some("txt") => MIME_TEXT,
        _ => MIME_UNKNOWN,
    }
}
