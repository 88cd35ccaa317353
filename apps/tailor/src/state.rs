//! Application state and the pure per-event transition function.
//!
//! `transition` never performs I/O. Work that needs the outside world is
//! returned as `Effect`s; the controller runs them and feeds the outcome back
//! in as another `Event`.

use std::path::PathBuf;

use tracing::debug;

use crate::formatter::{format_resume, render_html, BlockKind, DisplayBlock};
use crate::upload::{FileCandidate, SelectedFile};

pub const COPY_LABEL_IDLE: &str = "📋 Copy";
pub const COPY_LABEL_COPIED: &str = "✅ Copied!";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CopyLabel {
    #[default]
    Idle,
    Copied,
}

impl CopyLabel {
    pub fn text(self) -> &'static str {
        match self {
            CopyLabel::Idle => COPY_LABEL_IDLE,
            CopyLabel::Copied => COPY_LABEL_COPIED,
        }
    }
}

/// Everything the session knows. Owned by the controller, replaced wholesale
/// on every transition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub selected_file: Option<SelectedFile>,
    /// Name shown next to the file picker.
    pub file_label: Option<String>,
    pub job_description: String,
    /// Raw text of the last successful tailoring response.
    pub current_text: String,
    /// Blocks shown in the result region; `None` while hidden.
    pub result: Option<Vec<DisplayBlock>>,
    /// Message shown in the error region; `None` while hidden.
    pub error: Option<String>,
    /// A tailoring request is in flight.
    pub busy: bool,
    pub drag_over: bool,
    pub copy_label: CopyLabel,
    /// Files written by download actions, oldest first.
    pub saved_files: Vec<PathBuf>,
}

/// A user action or the outcome of an effect.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// File picker changed. `None` means the picker was cancelled.
    FileChosen(Option<FileCandidate>),
    DragEntered,
    DragLeft,
    FileDropped(Option<FileCandidate>),
    JobDescriptionChanged(String),
    SubmitRequested,
    TailorSucceeded(String),
    TailorFailed(String),
    CopyRequested,
    CopySucceeded,
    CopyFailed(String),
    CopyLabelExpired,
    DownloadTextRequested,
    DownloadDocxRequested,
    DownloadSaved(PathBuf),
    DownloadFailed(String),
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SubmitTailor {
        file: SelectedFile,
        job_description: String,
    },
    WriteClipboard(String),
    ScheduleCopyLabelReset,
    SaveText(String),
    FetchDocx(String),
}

impl AppState {
    /// The tailor action is enabled only with a valid file, a non-blank job
    /// description, and no request in flight.
    pub fn submit_enabled(&self) -> bool {
        self.selected_file.is_some() && !self.job_description.trim().is_empty() && !self.busy
    }

    /// Copy and download actions live in the result region.
    pub fn result_actions_enabled(&self) -> bool {
        self.result.is_some()
    }

    pub fn result_html(&self) -> Option<String> {
        self.result.as_deref().map(render_html)
    }

    fn select_file(&mut self, candidate: Option<FileCandidate>) {
        let Some(candidate) = candidate else {
            return;
        };

        match candidate.validate() {
            Ok(file) => {
                debug!("Selected {} ({})", file.name(), file.mime());
                self.file_label = Some(file.name().to_string());
                self.selected_file = Some(file);
            }
            Err(e) => {
                self.error = Some(e.user_message());
                self.file_label = None;
                self.selected_file = None;
            }
        }
    }
}

/// Applies one event to the state, returning the next state and any effects
/// to run.
pub fn transition(mut state: AppState, event: Event) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();

    match event {
        Event::FileChosen(candidate) => state.select_file(candidate),
        Event::DragEntered => state.drag_over = true,
        Event::DragLeft => state.drag_over = false,
        Event::FileDropped(candidate) => {
            state.drag_over = false;
            state.select_file(candidate);
        }
        Event::JobDescriptionChanged(text) => state.job_description = text,
        Event::SubmitRequested => {
            if !state.submit_enabled() {
                debug!("Submit ignored: form incomplete or request in flight");
                return (state, effects);
            }
            if let Some(file) = state.selected_file.clone() {
                state.result = None;
                state.error = None;
                state.busy = true;
                effects.push(Effect::SubmitTailor {
                    file,
                    job_description: state.job_description.trim().to_string(),
                });
            }
        }
        Event::TailorSucceeded(text) => {
            let blocks = format_resume(&text);
            let sections = blocks
                .iter()
                .filter(|b| b.kind() == BlockKind::SectionHeader)
                .count();
            debug!("Formatted {} blocks, {sections} sections", blocks.len());
            state.result = Some(blocks);
            state.current_text = text;
            state.busy = false;
        }
        Event::TailorFailed(message) => {
            state.error = Some(message);
            state.busy = false;
        }
        Event::CopyRequested => {
            if state.result_actions_enabled() {
                effects.push(Effect::WriteClipboard(state.current_text.clone()));
            }
        }
        Event::CopySucceeded => {
            state.copy_label = CopyLabel::Copied;
            effects.push(Effect::ScheduleCopyLabelReset);
        }
        Event::CopyFailed(message) => state.error = Some(message),
        Event::CopyLabelExpired => state.copy_label = CopyLabel::Idle,
        Event::DownloadTextRequested => {
            if state.result_actions_enabled() {
                effects.push(Effect::SaveText(state.current_text.clone()));
            }
        }
        Event::DownloadDocxRequested => {
            if state.result_actions_enabled() {
                effects.push(Effect::FetchDocx(state.current_text.clone()));
            }
        }
        Event::DownloadSaved(path) => state.saved_files.push(path),
        Event::DownloadFailed(message) => state.error = Some(message),
    }

    (state, effects)
}
