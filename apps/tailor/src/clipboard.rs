//! Clipboard — pluggable sink for the copy action.
//!
//! Default: `SystemClipboard`, which pipes text into the first available
//! platform clipboard tool. `Controller` holds an `Arc<dyn Clipboard>`.

use async_trait::async_trait;
use std::process::Stdio;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("No clipboard tool available (tried: {tried})")]
    NoBackend { tried: String },

    #[error("Clipboard tool '{program}' exited with {status}")]
    Failed { program: &'static str, status: String },

    #[error("Clipboard I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard tools in preference order, with their arguments.
#[cfg(target_os = "macos")]
const BACKENDS: &[(&str, &[&str])] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const BACKENDS: &[(&str, &[&str])] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const BACKENDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Writes to the desktop clipboard through a platform helper program.
pub struct SystemClipboard;

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        for &(program, args) in BACKENDS {
            let child = Command::new(program)
                .args(args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();

            let mut child = match child {
                Ok(c) => c,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!("Clipboard tool '{program}' not found, trying next");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(text.as_bytes()).await?;
            }

            let status = child.wait().await?;
            if !status.success() {
                return Err(ClipboardError::Failed {
                    program,
                    status: status.to_string(),
                });
            }

            debug!("Copied {} bytes via {program}", text.len());
            return Ok(());
        }

        Err(ClipboardError::NoBackend {
            tried: BACKENDS
                .iter()
                .map(|(program, _)| *program)
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}
