use crate::{BackendHealth, Field, FormState, Mode};

pub const FILE_PLACEHOLDER: &str = "Choose file or drag & drop";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldTone {
    #[default]
    Neutral,
    Success,
    Error,
}

/// Display-only classification of the status text. Never drives state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusTone {
    #[default]
    Neutral,
    Success,
    Error,
}

impl StatusTone {
    pub fn classify(status: &str) -> Self {
        if status.contains("Error") {
            StatusTone::Error
        } else if status.contains("successfully") {
            StatusTone::Success
        } else {
            StatusTone::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormViewModel {
    pub mode: Mode,
    pub message: String,
    pub message_error: Option<String>,
    pub message_tone: FieldTone,
    pub numbers_text: String,
    pub numbers_error: Option<String>,
    pub numbers_tone: FieldTone,
    pub file_input: String,
    pub file_label: String,
    pub has_file: bool,
    pub file_error: Option<String>,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
    pub status: String,
    pub status_tone: StatusTone,
    pub backend: BackendHealth,
    pub dirty: bool,
}

impl FormState {
    pub fn view(&self) -> FormViewModel {
        let errors = self.errors();
        let error_of = |field| errors.get(field).map(ToOwned::to_owned);

        let file_label = match self.file() {
            Some(file) => format!("Selected: {}", file.name),
            None => FILE_PLACEHOLDER.to_string(),
        };
        let submit_label = match (self.is_loading(), self.mode()) {
            (true, _) => "Sending...",
            (false, Mode::Numbers) => "Send Messages",
            (false, Mode::File) => "Send from File",
        };

        FormViewModel {
            mode: self.mode(),
            message: self.message().to_string(),
            message_error: error_of(Field::Message),
            message_tone: tone(errors.get(Field::Message).is_some(), self.message()),
            numbers_text: self.numbers_text().to_string(),
            numbers_error: error_of(Field::Numbers),
            numbers_tone: tone(errors.get(Field::Numbers).is_some(), self.numbers_text()),
            file_input: self.file_input().to_string(),
            file_label,
            has_file: self.file().is_some(),
            file_error: error_of(Field::File),
            submit_label,
            submit_enabled: !self.is_loading(),
            status: self.status().to_string(),
            status_tone: StatusTone::classify(self.status()),
            backend: self.backend().clone(),
            dirty: self.is_dirty(),
        }
    }
}

fn tone(has_error: bool, value: &str) -> FieldTone {
    if has_error {
        FieldTone::Error
    } else if !value.trim().is_empty() {
        FieldTone::Success
    } else {
        FieldTone::Neutral
    }
}
