//! Sender engine: backend requests and effect execution.
mod dispatch;
mod engine;
mod types;

pub use dispatch::{DispatchSettings, Dispatcher, ReqwestDispatcher};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use types::{
    BackendReply, DispatchError, EngineEvent, FailureKind, FileSubmission, SubmissionId,
    SubmissionKind, TextSubmission,
};
