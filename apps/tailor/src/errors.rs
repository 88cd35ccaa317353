use thiserror::Error;

use crate::api_client::ApiError;

pub const TAILOR_FALLBACK_MESSAGE: &str = "An error occurred while tailoring your resume";
pub const CLIPBOARD_FAILURE_MESSAGE: &str = "Failed to copy to clipboard";
pub const DOCX_FAILURE_MESSAGE: &str = "Failed to generate DOCX file";

/// Application-level error type.
/// Every variant is non-fatal: it ends one user action and is shown in the
/// error region via `user_message()`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Client-side validation (bad file type, missing input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The tailoring API answered with a non-2xx status or `success: false`.
    #[error("Tailoring rejected (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Tailoring {
        status: u16,
        message: Option<String>,
    },

    /// Transport failure or an undecodable response body.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// The document endpoint answered with a non-2xx status.
    #[error("DOCX generation failed (status {status})")]
    DocxGeneration { status: u16 },

    /// Transport or I/O failure while fetching or saving the document.
    #[error("DOCX download error: {0}")]
    Download(String),

    /// Saving the plain-text download failed.
    #[error("Save error: {0}")]
    Save(String),
}

impl AppError {
    /// Maps a tailoring call failure onto the error taxonomy.
    pub fn from_tailor(err: ApiError) -> Self {
        match err {
            ApiError::Rejected { status, message } => AppError::Tailoring { status, message },
            other => AppError::Network(other.to_string()),
        }
    }

    /// Maps a document download failure onto the error taxonomy.
    pub fn from_docx(err: ApiError) -> Self {
        match err {
            ApiError::Rejected { status, .. } => AppError::DocxGeneration { status },
            other => AppError::Download(other.to_string()),
        }
    }

    /// The text shown to the user in the error region.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Tailoring { message, .. } => message
                .as_deref()
                .filter(|m| !m.is_empty())
                .unwrap_or(TAILOR_FALLBACK_MESSAGE)
                .to_string(),
            AppError::Network(detail) => format!("Network error: {detail}"),
            AppError::Clipboard(_) => CLIPBOARD_FAILURE_MESSAGE.to_string(),
            AppError::DocxGeneration { .. } => DOCX_FAILURE_MESSAGE.to_string(),
            AppError::Download(detail) => format!("Error downloading DOCX: {detail}"),
            AppError::Save(detail) => format!("Failed to save file: {detail}"),
        }
    }
}
