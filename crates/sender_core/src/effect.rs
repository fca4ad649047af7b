use crate::{SelectedFile, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendTextRequest {
    pub text: String,
    pub numbers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendFileRequest {
    pub text: String,
    pub file: SelectedFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the message and manual number list as JSON.
    SendText {
        submission: SubmissionId,
        request: SendTextRequest,
    },
    /// POST the message and selected file as multipart form data.
    SendTextFile {
        submission: SubmissionId,
        request: SendFileRequest,
    },
    /// Probe the backend health endpoint.
    CheckHealth,
}
