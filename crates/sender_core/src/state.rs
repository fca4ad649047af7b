use std::path::PathBuf;

use crate::validate::{Field, ValidationErrors};

pub type SubmissionId = u64;

pub const READY_STATUS: &str = "Ready to send messages";
pub const SENDING_NUMBERS_STATUS: &str = "Sending messages...";
pub const SENDING_FILE_STATUS: &str = "Sending messages from file...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Numbers,
    File,
}

/// A file chosen for upload. Contents are read when the request is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
}

impl SelectedFile {
    /// Builds a selection from a path, using its final component as the name.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BackendHealth {
    #[default]
    Unknown,
    Online,
    Offline(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    message: String,
    numbers_text: String,
    file_input: String,
    file: Option<SelectedFile>,
    mode: Mode,
    status: String,
    is_loading: bool,
    errors: ValidationErrors,
    backend: BackendHealth,
    next_submission: SubmissionId,
    dirty: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            message: String::new(),
            numbers_text: String::new(),
            file_input: String::new(),
            file: None,
            mode: Mode::default(),
            status: READY_STATUS.to_string(),
            is_loading: false,
            errors: ValidationErrors::default(),
            backend: BackendHealth::default(),
            next_submission: 1,
            dirty: false,
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn numbers_text(&self) -> &str {
        &self.numbers_text
    }

    pub fn file_input(&self) -> &str {
        &self.file_input
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn backend(&self) -> &BackendHealth {
        &self.backend
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_message(&mut self, message: String) {
        if !message.trim().is_empty() {
            self.errors.clear(Field::Message);
        }
        self.message = message;
        self.mark_dirty();
    }

    pub(crate) fn set_numbers_text(&mut self, numbers_text: String) {
        if !numbers_text.trim().is_empty() {
            self.errors.clear(Field::Numbers);
        }
        self.numbers_text = numbers_text;
        self.mark_dirty();
    }

    pub(crate) fn set_file_input(&mut self, file_input: String) {
        self.file_input = file_input;
        self.mark_dirty();
    }

    pub(crate) fn select_file(&mut self, file: Option<SelectedFile>) {
        if file.is_some() {
            self.errors.clear(Field::File);
        }
        self.file = file;
        self.mark_dirty();
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            self.mark_dirty();
        }
    }

    pub(crate) fn replace_errors(&mut self, errors: ValidationErrors) {
        self.errors = errors;
        self.mark_dirty();
    }

    /// Enters the sending state and hands out the id for this submission.
    pub(crate) fn begin_submission(&mut self, status: &str) -> SubmissionId {
        let id = self.next_submission;
        self.next_submission += 1;
        self.is_loading = true;
        self.status = status.to_string();
        self.mark_dirty();
        id
    }

    pub(crate) fn finish_submission(&mut self, status: String) {
        self.is_loading = false;
        self.status = status;
        self.mark_dirty();
    }

    /// Clears the inputs a successful submission in `mode` consumed.
    pub(crate) fn reset_after_success(&mut self, mode: Mode) {
        self.message.clear();
        match mode {
            Mode::Numbers => self.numbers_text.clear(),
            Mode::File => {
                self.file = None;
                self.file_input.clear();
            }
        }
        self.errors = ValidationErrors::default();
        self.mark_dirty();
    }

    pub(crate) fn set_backend(&mut self, backend: BackendHealth) {
        if self.backend != backend {
            self.backend = backend;
            self.mark_dirty();
        }
    }
}
