//! Sender core: pure form state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::{Effect, SendFileRequest, SendTextRequest};
pub use msg::{Msg, SubmissionOutcome};
pub use state::{
    BackendHealth, FormState, Mode, SelectedFile, SubmissionId, READY_STATUS, SENDING_FILE_STATUS,
    SENDING_NUMBERS_STATUS,
};
pub use update::{parse_numbers, update};
pub use validate::{validate, Field, ValidationErrors};
pub use view_model::{FieldTone, FormViewModel, StatusTone, FILE_PLACEHOLDER};
