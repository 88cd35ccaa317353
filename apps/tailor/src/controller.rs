//! Controller — owns the session state and runs the effects transitions ask for.
//!
//! Events are processed one at a time. Effect outcomes are queued as follow-up
//! events and applied before `dispatch` returns.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::api_client::TailorClient;
use crate::clipboard::Clipboard;
use crate::downloads::Downloads;
use crate::errors::AppError;
use crate::state::{transition, AppState, Effect, Event};

pub struct Controller {
    state: AppState,
    api: TailorClient,
    /// Pluggable clipboard. Default: SystemClipboard.
    clipboard: Arc<dyn Clipboard>,
    downloads: Downloads,
    copy_reset: Duration,
    copy_reset_at: Option<Instant>,
}

impl Controller {
    pub fn new(
        api: TailorClient,
        clipboard: Arc<dyn Clipboard>,
        downloads: Downloads,
        copy_reset: Duration,
    ) -> Self {
        Self {
            state: AppState::default(),
            api,
            clipboard,
            downloads,
            copy_reset,
            copy_reset_at: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Startup diagnostic. Never fails.
    pub async fn check_health(&self) {
        self.api.log_health().await;
    }

    /// Applies `event` and every follow-up event produced by its effects.
    pub async fn dispatch(&mut self, event: Event) {
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            let (next, effects) = transition(std::mem::take(&mut self.state), event);
            self.state = next;

            for effect in effects {
                if let Some(outcome) = self.run(effect).await {
                    queue.push_back(outcome);
                }
            }
        }
    }

    /// Waits for the copy-label timer, if armed, and applies its expiry.
    pub async fn run_timers(&mut self) {
        if let Some(deadline) = self.copy_reset_at.take() {
            tokio::time::sleep_until(deadline).await;
            self.dispatch(Event::CopyLabelExpired).await;
        }
    }

    async fn run(&mut self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::SubmitTailor {
                file,
                job_description,
            } => {
                info!("Tailoring {} via {}", file.name(), self.api.base_url());
                let outcome = match self.api.tailor_resume(&file, &job_description).await {
                    Ok(text) => Event::TailorSucceeded(text),
                    Err(e) => {
                        let err = AppError::from_tailor(e);
                        warn!("{err}");
                        Event::TailorFailed(err.user_message())
                    }
                };
                Some(outcome)
            }
            Effect::WriteClipboard(text) => {
                let outcome = match self.clipboard.write_text(&text).await {
                    Ok(()) => Event::CopySucceeded,
                    Err(e) => {
                        let err = AppError::Clipboard(e.to_string());
                        warn!("{err}");
                        Event::CopyFailed(err.user_message())
                    }
                };
                Some(outcome)
            }
            Effect::ScheduleCopyLabelReset => {
                // Re-copying restarts the timer.
                self.copy_reset_at = Some(Instant::now() + self.copy_reset);
                debug!("Copy label resets in {}ms", self.copy_reset.as_millis());
                None
            }
            Effect::SaveText(text) => {
                let outcome = match self.downloads.save_text(&text) {
                    Ok(path) => Event::DownloadSaved(path),
                    Err(e) => {
                        let err = AppError::Save(e.to_string());
                        warn!("{err}");
                        Event::DownloadFailed(err.user_message())
                    }
                };
                Some(outcome)
            }
            Effect::FetchDocx(text) => Some(self.fetch_docx(&text).await),
        }
    }

    async fn fetch_docx(&self, text: &str) -> Event {
        let result = match self.api.download_docx(text).await {
            Ok(bytes) => self
                .downloads
                .save_docx(&bytes)
                .map_err(|e| AppError::Download(e.to_string())),
            Err(e) => Err(AppError::from_docx(e)),
        };

        match result {
            Ok(path) => Event::DownloadSaved(path),
            Err(err) => {
                warn!("{err}");
                Event::DownloadFailed(err.user_message())
            }
        }
    }
}
