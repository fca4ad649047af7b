use crate::{BackendHealth, Mode, SelectedFile, SubmissionId};

/// How a dispatched submission ended, already reduced to what the form shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The backend answered with a JSON body.
    Replied {
        /// Whether the HTTP status was 2xx.
        success: bool,
        /// Pretty-printed response body.
        body: String,
    },
    /// Transport failure or unreadable response.
    Failed { description: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Platform finished start-up.
    AppStarted,
    /// User edited the message text.
    MessageChanged(String),
    /// User edited the manual numbers list.
    NumbersChanged(String),
    /// User edited the file path field (not yet a selection).
    FilePathChanged(String),
    /// User picked a file, or cleared the selection.
    FileSelected(Option<SelectedFile>),
    /// User switched between manual entry and file upload.
    ModeSelected(Mode),
    /// User triggered the submit control for the active mode.
    SubmitClicked,
    /// Dispatcher finished a submission.
    SubmissionFinished {
        submission: SubmissionId,
        mode: Mode,
        outcome: SubmissionOutcome,
    },
    /// User asked for a fresh health probe.
    HealthRefreshRequested,
    /// Health probe result.
    HealthChecked(BackendHealth),
    /// UI/render tick to coalesce rendering.
    Tick,
}
