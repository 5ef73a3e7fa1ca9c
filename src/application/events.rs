//! Messages into and out of the controller.
//!
//! Everything that happens to the application arrives as an [`Event`]; the
//! controller answers with a list of [`Effect`]s that the host carries out.
//! Effects that complete later report back with another event.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{HealthStatus, LoadedFile, PickError, PredictResponse, RecognizeError, SelectedFile};

/// Edits applied to the path prompt while picking a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptEdit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

/// Timers the controller can ask for. Scheduling a kind again replaces the
/// pending deadline of that kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    CopyRevert,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The drop zone was activated; open the path prompt.
    ActivateDropZone,
    Prompt(PromptEdit),
    SubmitPrompt,
    CancelPrompt,
    /// A path was chosen directly, e.g. from the command line.
    FileChosen(PathBuf),
    FileRead {
        ticket: u64,
        result: Result<LoadedFile, PickError>,
    },
    Recognize,
    RecognitionSettled(Result<PredictResponse, RecognizeError>),
    Copy,
    TimerFired(TimerKind),
    CheckHealth,
    HealthChecked(Result<HealthStatus, RecognizeError>),
    DismissAlert,
    ToggleHelp,
    ScrollHelp(isize),
    HelpTop,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Read and decode the file at `path`, answering with [`Event::FileRead`].
    ReadFile { ticket: u64, path: PathBuf },
    /// POST the file to the recognition endpoint, answering with
    /// [`Event::RecognitionSettled`].
    Dispatch(Arc<SelectedFile>),
    WriteClipboard(String),
    Schedule { timer: TimerKind, after: Duration },
    /// Query the server's health endpoint, answering with [`Event::HealthChecked`].
    RequestHealth,
}
