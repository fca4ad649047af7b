use std::collections::BTreeMap;

use crate::{Mode, SelectedFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Message,
    Numbers,
    File,
}

/// Per-field validation messages. Empty means the form is valid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    entries: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.entries
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    pub(crate) fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.entries.insert(field, message.into());
    }

    pub(crate) fn clear(&mut self, field: Field) {
        self.entries.remove(&field);
    }
}

/// Checks the inputs the active mode needs. Never fails; an empty result is valid.
pub fn validate(
    message: &str,
    mode: Mode,
    numbers_text: &str,
    file: Option<&SelectedFile>,
) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if message.trim().is_empty() {
        errors.insert(Field::Message, "Message is required");
    }

    match mode {
        Mode::Numbers if numbers_text.trim().is_empty() => {
            errors.insert(Field::Numbers, "At least one phone number is required");
        }
        Mode::File if file.is_none() => {
            errors.insert(Field::File, "Please select a file");
        }
        Mode::Numbers | Mode::File => {}
    }

    errors
}
