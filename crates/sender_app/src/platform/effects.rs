use std::sync::{mpsc, Arc};

use anyhow::Context;
use chrono::Utc;
use sender_core::{BackendHealth, Effect, Mode, Msg, SubmissionOutcome};
use sender_engine::{
    DispatchSettings, EngineEvent, EngineHandle, EventSink, FileSubmission, ReqwestDispatcher,
    SubmissionKind, TextSubmission,
};
use sender_logging::{sender_info, sender_warn};

/// Executes core effects on the engine and feeds results back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: DispatchSettings, msg_tx: mpsc::Sender<Msg>) -> anyhow::Result<Self> {
        let dispatcher = ReqwestDispatcher::new(settings).context("invalid backend settings")?;
        sender_info!("Backend base url {}", dispatcher.base_url());

        let engine = EngineHandle::spawn(Arc::new(dispatcher), Arc::new(MsgSink { msg_tx }))
            .context("failed to start engine runtime")?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SendText {
                    submission,
                    request,
                } => {
                    sender_info!(
                        "SendText submission={} numbers={} text_len={}",
                        submission,
                        request.numbers.len(),
                        request.text.len()
                    );
                    self.engine.send_text(
                        submission,
                        TextSubmission {
                            text: request.text,
                            numbers: request.numbers,
                        },
                    );
                }
                Effect::SendTextFile {
                    submission,
                    request,
                } => {
                    sender_info!(
                        "SendTextFile submission={} file={:?}",
                        submission,
                        request.file.path
                    );
                    self.engine.send_text_file(
                        submission,
                        FileSubmission {
                            text: request.text,
                            path: request.file.path,
                            file_name: request.file.name,
                        },
                    );
                }
                Effect::CheckHealth => self.engine.check_health(),
            }
        }
    }
}

struct MsgSink {
    msg_tx: mpsc::Sender<Msg>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.msg_tx.send(event_to_msg(event));
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SubmissionCompleted {
            submission,
            kind,
            result,
        } => {
            let outcome = match result {
                Ok(reply) => {
                    sender_info!(
                        "Submission {} completed at {} with status {}",
                        submission,
                        Utc::now().to_rfc3339(),
                        reply.status
                    );
                    SubmissionOutcome::Replied {
                        success: reply.is_success(),
                        body: reply.pretty_body(),
                    }
                }
                Err(err) => {
                    sender_warn!("Submission {} failed: {}", submission, err);
                    SubmissionOutcome::Failed {
                        description: err.to_string(),
                    }
                }
            };
            Msg::SubmissionFinished {
                submission,
                mode: map_kind(kind),
                outcome,
            }
        }
        EngineEvent::HealthChecked { result } => Msg::HealthChecked(match result {
            Ok(()) => BackendHealth::Online,
            Err(err) => {
                sender_warn!("Backend health check failed: {}", err);
                BackendHealth::Offline(err.to_string())
            }
        }),
    }
}

fn map_kind(kind: SubmissionKind) -> Mode {
    match kind {
        SubmissionKind::Text => Mode::Numbers,
        SubmissionKind::File => Mode::File,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sender_engine::{BackendReply, DispatchError, FailureKind};

    fn reply(status: u16, body: &str) -> BackendReply {
        BackendReply {
            status,
            body: serde_json::from_str(body).unwrap(),
        }
    }

    #[test]
    fn reply_maps_to_pretty_outcome() {
        let msg = event_to_msg(EngineEvent::SubmissionCompleted {
            submission: 4,
            kind: SubmissionKind::File,
            result: Ok(reply(200, r#"{"status":"started","count":3}"#)),
        });

        assert_eq!(
            msg,
            Msg::SubmissionFinished {
                submission: 4,
                mode: Mode::File,
                outcome: SubmissionOutcome::Replied {
                    success: true,
                    body: "{\n  \"status\": \"started\",\n  \"count\": 3\n}".to_string(),
                },
            }
        );
    }

    #[test]
    fn non_success_reply_is_not_success() {
        let msg = event_to_msg(EngineEvent::SubmissionCompleted {
            submission: 1,
            kind: SubmissionKind::Text,
            result: Ok(reply(500, r#"{"detail":"boom"}"#)),
        });

        match msg {
            Msg::SubmissionFinished { mode, outcome, .. } => {
                assert_eq!(mode, Mode::Numbers);
                assert!(matches!(
                    outcome,
                    SubmissionOutcome::Replied { success: false, .. }
                ));
            }
            other => panic!("unexpected msg {other:?}"),
        }
    }

    #[test]
    fn dispatch_error_maps_to_failed_outcome() {
        let err = DispatchError {
            kind: FailureKind::Network,
            message: "connection refused".to_string(),
        };
        let msg = event_to_msg(EngineEvent::SubmissionCompleted {
            submission: 2,
            kind: SubmissionKind::Text,
            result: Err(err),
        });

        assert_eq!(
            msg,
            Msg::SubmissionFinished {
                submission: 2,
                mode: Mode::Numbers,
                outcome: SubmissionOutcome::Failed {
                    description: "network error: connection refused".to_string(),
                },
            }
        );
    }

    #[test]
    fn health_results_map_to_backend_health() {
        assert_eq!(
            event_to_msg(EngineEvent::HealthChecked { result: Ok(()) }),
            Msg::HealthChecked(BackendHealth::Online)
        );
        let offline = event_to_msg(EngineEvent::HealthChecked {
            result: Err(DispatchError {
                kind: FailureKind::HttpStatus(503),
                message: "503 Service Unavailable".to_string(),
            }),
        });
        assert_eq!(
            offline,
            Msg::HealthChecked(BackendHealth::Offline(
                "http status 503: 503 Service Unavailable".to_string()
            ))
        );
    }
}
