//! Application state for the upload-and-recognize workflow.
//!
//! [`App`] owns every piece of mutable state: the selected file, its preview,
//! the recognition result, button labels and pending alerts. It never performs
//! I/O itself; [`App::update`] applies an [`Event`] and returns the
//! [`Effect`]s the host must run.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::events::{Effect, Event, PromptEdit, TimerKind};
use super::help::help_line_count;
use crate::domain::{HealthStatus, LoadedFile, PickError, PredictResponse, Preview, RecognizeError, SelectedFile};

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";
pub const RECOGNIZE_LABEL: &str = "Recognize Text";
pub const PROCESSING_LABEL: &str = "Processing...";
pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied!";
/// How long the copy button shows its confirmation.
pub const COPY_REVERT_AFTER: Duration = Duration::from_millis(2000);

/// Which overlay, if any, currently receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Main screen - drop zone, recognize and copy are available
    Normal,
    /// Path prompt is open (the file picker)
    Picking,
    /// A blocking alert is shown and must be dismissed
    Alert,
    /// Help overlay is displayed
    Help,
}

/// Workflow stage, derived from the rest of the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    FileSelected,
    Processing,
    ResultShown,
}

/// What the header shows about the recognition server.
#[derive(Debug, Clone, PartialEq)]
pub enum HealthView {
    Unknown,
    Checking,
    Ready,
    ModelMissing,
    Unreachable(String),
}

impl HealthView {
    pub fn label(&self) -> String {
        match self {
            HealthView::Unknown => "server status unknown".to_string(),
            HealthView::Checking => "checking server...".to_string(),
            HealthView::Ready => "server ok".to_string(),
            HealthView::ModelMissing => "model not loaded".to_string(),
            HealthView::Unreachable(reason) => format!("unreachable: {}", reason),
        }
    }
}

/// Controller state for the whole screen.
///
/// # Examples
///
/// ```
/// use ocrdesk::application::{App, Event, Stage};
///
/// let mut app = App::default();
/// assert_eq!(app.stage(), Stage::Idle);
/// // Nothing is selected yet, so recognizing does nothing.
/// assert!(app.update(Event::Recognize).is_empty());
/// ```
#[derive(Debug)]
pub struct App {
    /// Base URL of the recognition server
    pub server: String,
    /// Current input mode
    pub mode: AppMode,
    /// Path being typed into the picker prompt
    pub prompt: String,
    /// Cursor position within the prompt, in characters
    pub cursor_position: usize,
    /// The most recently read file
    pub selected: Option<Arc<SelectedFile>>,
    /// Preview of `selected`
    pub preview: Option<Preview>,
    /// Ticket of the read whose result will be accepted
    pub pending_read: Option<u64>,
    next_ticket: u64,
    /// A recognition request is on the wire
    pub in_flight: bool,
    pub recognize_label: &'static str,
    pub result_text: String,
    pub result_visible: bool,
    pub copy_label: &'static str,
    /// Blocking messages, oldest first
    pub alerts: VecDeque<String>,
    /// The path prompt was open when the first alert arrived
    resume_picking: bool,
    pub health: HealthView,
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER)
    }
}

impl App {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            mode: AppMode::Normal,
            prompt: String::new(),
            cursor_position: 0,
            selected: None,
            preview: None,
            pending_read: None,
            next_ticket: 0,
            in_flight: false,
            recognize_label: RECOGNIZE_LABEL,
            result_text: String::new(),
            result_visible: false,
            copy_label: COPY_LABEL,
            alerts: VecDeque::new(),
            resume_picking: false,
            health: HealthView::Unknown,
            help_scroll: 0,
            status_message: None,
        }
    }

    pub fn stage(&self) -> Stage {
        if self.in_flight {
            Stage::Processing
        } else if self.result_visible {
            Stage::ResultShown
        } else if self.selected.is_some() {
            Stage::FileSelected
        } else {
            Stage::Idle
        }
    }

    /// A read still running means the selection is about to change, so the
    /// current file must not be sent.
    pub fn recognize_enabled(&self) -> bool {
        self.selected.is_some() && !self.in_flight && self.pending_read.is_none()
    }

    pub fn preview_visible(&self) -> bool {
        self.preview.is_some()
    }

    /// The drop zone placeholder is shown until a preview replaces it.
    pub fn placeholder_visible(&self) -> bool {
        self.preview.is_none()
    }

    pub fn current_alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    /// Applies one event and returns the side effects the host must run.
    pub fn update(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::ActivateDropZone => {
                self.start_picking();
                Vec::new()
            }
            Event::Prompt(edit) => {
                self.edit_prompt(edit);
                Vec::new()
            }
            Event::SubmitPrompt => {
                let path = self.prompt.trim().to_string();
                self.close_prompt();
                if path.is_empty() {
                    Vec::new()
                } else {
                    self.choose_file(PathBuf::from(path))
                }
            }
            Event::CancelPrompt => {
                self.close_prompt();
                Vec::new()
            }
            Event::FileChosen(path) => self.choose_file(path),
            Event::FileRead { ticket, result } => {
                self.finish_read(ticket, result);
                Vec::new()
            }
            Event::Recognize => self.recognize(),
            Event::RecognitionSettled(outcome) => {
                self.settle_recognition(outcome);
                Vec::new()
            }
            Event::Copy => self.copy_result(),
            Event::TimerFired(TimerKind::CopyRevert) => {
                self.copy_label = COPY_LABEL;
                Vec::new()
            }
            Event::CheckHealth => {
                self.health = HealthView::Checking;
                vec![Effect::RequestHealth]
            }
            Event::HealthChecked(result) => {
                self.set_health_result(result);
                Vec::new()
            }
            Event::DismissAlert => {
                self.alerts.pop_front();
                if self.alerts.is_empty() && self.mode == AppMode::Alert {
                    self.mode = if self.resume_picking { AppMode::Picking } else { AppMode::Normal };
                    self.resume_picking = false;
                }
                Vec::new()
            }
            Event::ToggleHelp => {
                match self.mode {
                    AppMode::Help => self.mode = AppMode::Normal,
                    AppMode::Normal => {
                        self.mode = AppMode::Help;
                        self.help_scroll = 0;
                    }
                    _ => {}
                }
                Vec::new()
            }
            Event::ScrollHelp(delta) => {
                self.help_scroll = self
                    .help_scroll
                    .saturating_add_signed(delta)
                    .min(help_line_count().saturating_sub(1));
                Vec::new()
            }
            Event::HelpTop => {
                self.help_scroll = 0;
                Vec::new()
            }
        }
    }

    /// Opens the path prompt, prefilled with the current file's directory.
    fn start_picking(&mut self) {
        if self.mode != AppMode::Normal {
            return;
        }
        self.mode = AppMode::Picking;
        self.prompt = self
            .selected
            .as_ref()
            .and_then(|file| file.path.parent())
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| format!("{}/", dir.display()))
            .unwrap_or_default();
        self.cursor_position = self.prompt.chars().count();
        self.status_message = None;
    }

    fn close_prompt(&mut self) {
        if self.mode == AppMode::Picking {
            self.mode = AppMode::Normal;
        }
        self.prompt.clear();
        self.cursor_position = 0;
    }

    fn edit_prompt(&mut self, edit: PromptEdit) {
        if self.mode != AppMode::Picking {
            return;
        }
        let len = self.prompt.chars().count();
        match edit {
            PromptEdit::Insert(c) => {
                let at = self.byte_index(self.cursor_position);
                self.prompt.insert(at, c);
                self.cursor_position += 1;
            }
            PromptEdit::Backspace => {
                if self.cursor_position > 0 {
                    let at = self.byte_index(self.cursor_position - 1);
                    self.prompt.remove(at);
                    self.cursor_position -= 1;
                }
            }
            PromptEdit::Delete => {
                if self.cursor_position < len {
                    let at = self.byte_index(self.cursor_position);
                    self.prompt.remove(at);
                }
            }
            PromptEdit::Left => self.cursor_position = self.cursor_position.saturating_sub(1),
            PromptEdit::Right => self.cursor_position = (self.cursor_position + 1).min(len),
            PromptEdit::Home => self.cursor_position = 0,
            PromptEdit::End => self.cursor_position = len,
        }
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.prompt
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.prompt.len())
    }

    /// Starts reading `path`. Any read still running is superseded.
    fn choose_file(&mut self, path: PathBuf) -> Vec<Effect> {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending_read = Some(ticket);
        self.status_message = Some(format!("Reading {}...", path.display()));
        debug!(ticket, path = %path.display(), "reading selected file");
        vec![Effect::ReadFile { ticket, path }]
    }

    fn finish_read(&mut self, ticket: u64, result: Result<LoadedFile, PickError>) {
        if self.pending_read != Some(ticket) {
            debug!(ticket, "discarding stale file read");
            return;
        }
        self.pending_read = None;
        match result {
            Ok(LoadedFile { file, preview }) => {
                info!(file = %file.file_name, bytes = file.len(), "file selected");
                self.status_message = Some(format!(
                    "Selected {} ({})",
                    file.file_name,
                    file.display_size()
                ));
                self.selected = Some(Arc::new(file));
                self.preview = Some(preview);
            }
            Err(err) => {
                warn!(error = %err, "file read failed");
                self.status_message = None;
                self.raise_alert(err.to_string());
            }
        }
    }

    fn recognize(&mut self) -> Vec<Effect> {
        if !self.recognize_enabled() {
            return Vec::new();
        }
        let Some(file) = self.selected.clone() else {
            return Vec::new();
        };
        self.in_flight = true;
        self.recognize_label = PROCESSING_LABEL;
        self.status_message = None;
        info!(file = %file.file_name, server = %self.server, "dispatching recognition");
        vec![Effect::Dispatch(file)]
    }

    fn settle_recognition(&mut self, outcome: Result<PredictResponse, RecognizeError>) {
        match outcome.and_then(PredictResponse::into_text) {
            Ok(text) => {
                info!(chars = text.chars().count(), "recognition succeeded");
                self.status_message = Some(format!("Recognized {} characters", text.chars().count()));
                self.result_text = text;
                self.result_visible = true;
            }
            Err(err) => {
                warn!(error = %err, "recognition failed");
                self.raise_alert(err.to_string());
            }
        }
        self.in_flight = false;
        self.recognize_label = RECOGNIZE_LABEL;
    }

    fn copy_result(&mut self) -> Vec<Effect> {
        if !self.result_visible {
            return Vec::new();
        }
        self.copy_label = COPIED_LABEL;
        vec![
            Effect::WriteClipboard(self.result_text.clone()),
            Effect::Schedule {
                timer: TimerKind::CopyRevert,
                after: COPY_REVERT_AFTER,
            },
        ]
    }

    fn set_health_result(&mut self, result: Result<HealthStatus, RecognizeError>) {
        self.health = match result {
            Ok(status) if status.is_ready() => HealthView::Ready,
            Ok(status) if status.status == "ok" => HealthView::ModelMissing,
            Ok(status) => HealthView::Unreachable(format!("status {}", status.status)),
            Err(err) => HealthView::Unreachable(err.to_string()),
        };
        debug!(health = %self.health.label(), "health updated");
    }

    /// Queues a blocking message; it takes over input until dismissed. An open
    /// path prompt keeps its text and comes back once the alerts are gone.
    fn raise_alert(&mut self, message: String) {
        if self.mode == AppMode::Picking {
            self.resume_picking = true;
        }
        self.alerts.push_back(format!("Error: {}", message));
        self.mode = AppMode::Alert;
    }
}
