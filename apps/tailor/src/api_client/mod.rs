//! API client — the single point of entry for all calls to the tailoring backend.
//!
//! No other module issues HTTP requests. Calls are one-shot: there is no retry
//! or backoff, every failure is returned to the caller as-is.

use bytes::Bytes;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod models;

use crate::upload::SelectedFile;
use models::{DocxRequest, TailorResponse};

const TAILOR_PATH: &str = "/api/tailor-resume";
const DOCX_PATH: &str = "/api/download-docx";
const HEALTH_PATH: &str = "/api/health";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered but refused the request: non-2xx status, or a
    /// tailoring body with `success: false`.
    #[error("API rejected request (status {status})")]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    #[error("Invalid JSON in response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// HTTP client for the tailoring backend.
#[derive(Clone)]
pub struct TailorClient {
    client: Client,
    base_url: String,
}

impl TailorClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /api/tailor-resume
    ///
    /// Sends the resume as multipart field `resume` and the job description as
    /// field `job_description`. The body is decoded before the status is
    /// checked, so a non-JSON body is a `Parse` error on any status.
    pub async fn tailor_resume(
        &self,
        file: &SelectedFile,
        job_description: &str,
    ) -> Result<String, ApiError> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.mime())?;
        let form = Form::new()
            .part("resume", part)
            .text("job_description", job_description.to_string());

        debug!(
            "Submitting {} ({} bytes) with {} chars of job description",
            file.name(),
            file.bytes().len(),
            job_description.chars().count()
        );

        let response = self
            .client
            .post(self.url(TAILOR_PATH))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let parsed: TailorResponse = serde_json::from_str(&body)?;

        if status.is_success() && parsed.success {
            let text = parsed.tailored_resume.unwrap_or_default();
            debug!("Tailoring succeeded: {} chars returned", text.chars().count());
            return Ok(text);
        }

        warn!(
            "Tailoring failed with status {}: {}",
            status,
            parsed.error.as_deref().unwrap_or("<no message>")
        );
        Err(ApiError::Rejected {
            status: status.as_u16(),
            message: parsed.error,
        })
    }

    /// POST /api/download-docx
    ///
    /// Returns the generated document bytes.
    pub async fn download_docx(&self, resume_text: &str) -> Result<Bytes, ApiError> {
        let response = self
            .client
            .post(self.url(DOCX_PATH))
            .json(&DocxRequest { resume_text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("DOCX generation returned {}: {}", status, body);
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: Some(body).filter(|b| !b.is_empty()),
            });
        }

        let bytes = response.bytes().await?;
        debug!("DOCX download succeeded: {} bytes", bytes.len());
        Ok(bytes)
    }

    /// GET /api/health
    pub async fn health(&self) -> Result<Value, ApiError> {
        let response = self.client.get(self.url(HEALTH_PATH)).send().await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Logs the backend health status. Failures are logged and swallowed.
    pub async fn log_health(&self) {
        match self.health().await {
            Ok(status) => info!("API health: {status}"),
            Err(e) => tracing::error!("API health check failed: {e}"),
        }
    }
}
