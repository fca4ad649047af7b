use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

pub type SubmissionId = u64;

/// JSON body for `POST /send-text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSubmission {
    pub text: String,
    pub numbers: Vec<String>,
}

/// Fields for the multipart `POST /send-text-file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSubmission {
    pub text: String,
    pub path: PathBuf,
    pub file_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Text,
    File,
}

/// A backend answer whose body parsed as JSON, whatever the status code.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendReply {
    pub status: u16,
    pub body: serde_json::Value,
}

impl BackendReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body rendered with two-space indentation, keys in response order.
    pub fn pretty_body(&self) -> String {
        serde_json::to_string_pretty(&self.body).unwrap_or_else(|_| self.body.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    SubmissionCompleted {
        submission: SubmissionId,
        kind: SubmissionKind,
        result: Result<BackendReply, DispatchError>,
    },
    HealthChecked {
        result: Result<(), DispatchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct DispatchError {
    pub kind: FailureKind,
    pub message: String,
}

impl DispatchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    FileRead,
    InvalidResponse,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::FileRead => write!(f, "file read error"),
            FailureKind::InvalidResponse => write!(f, "invalid response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
