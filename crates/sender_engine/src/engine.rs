use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use sender_logging::{sender_info, sender_warn};

use crate::dispatch::Dispatcher;
use crate::{EngineEvent, FileSubmission, SubmissionId, SubmissionKind, TextSubmission};

/// Receives engine events on whichever runtime worker finished the work.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    SendText {
        submission: SubmissionId,
        payload: TextSubmission,
    },
    SendTextFile {
        submission: SubmissionId,
        payload: FileSubmission,
    },
    CheckHealth,
}

/// Handle to the background thread that owns the async runtime.
///
/// Every command runs as its own task, so overlapping submissions are not serialized.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn spawn(dispatcher: Arc<dyn Dispatcher>, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("sender-engine")
            .build()?;

        thread::Builder::new()
            .name("sender-engine-commands".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let dispatcher = dispatcher.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(dispatcher.as_ref(), command, sink.as_ref()).await;
                    });
                }
                sender_info!("Engine command channel closed; shutting down runtime");
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn send_text(&self, submission: SubmissionId, payload: TextSubmission) {
        self.send(EngineCommand::SendText {
            submission,
            payload,
        });
    }

    pub fn send_text_file(&self, submission: SubmissionId, payload: FileSubmission) {
        self.send(EngineCommand::SendTextFile {
            submission,
            payload,
        });
    }

    pub fn check_health(&self) {
        self.send(EngineCommand::CheckHealth);
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            sender_warn!("Engine thread is gone; command dropped");
        }
    }
}

async fn handle_command(dispatcher: &dyn Dispatcher, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::SendText {
            submission,
            payload,
        } => {
            let result = dispatcher.send_text(&payload).await;
            sink.emit(EngineEvent::SubmissionCompleted {
                submission,
                kind: SubmissionKind::Text,
                result,
            });
        }
        EngineCommand::SendTextFile {
            submission,
            payload,
        } => {
            let result = dispatcher.send_text_file(&payload).await;
            sink.emit(EngineEvent::SubmissionCompleted {
                submission,
                kind: SubmissionKind::File,
                result,
            });
        }
        EngineCommand::CheckHealth => {
            let result = dispatcher.check_health().await;
            sink.emit(EngineEvent::HealthChecked { result });
        }
    }
}
