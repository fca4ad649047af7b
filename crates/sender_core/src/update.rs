use crate::{
    validate, BackendHealth, Effect, FormState, Mode, Msg, SendFileRequest, SendTextRequest,
    SubmissionOutcome, SENDING_FILE_STATUS, SENDING_NUMBERS_STATUS,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: FormState, msg: Msg) -> (FormState, Vec<Effect>) {
    let effects = match msg {
        Msg::AppStarted | Msg::HealthRefreshRequested => {
            state.set_backend(BackendHealth::Unknown);
            vec![Effect::CheckHealth]
        }
        Msg::MessageChanged(text) => {
            state.set_message(text);
            Vec::new()
        }
        Msg::NumbersChanged(text) => {
            state.set_numbers_text(text);
            Vec::new()
        }
        Msg::FilePathChanged(text) => {
            state.set_file_input(text);
            Vec::new()
        }
        Msg::FileSelected(file) => {
            state.select_file(file);
            Vec::new()
        }
        Msg::ModeSelected(mode) => {
            state.set_mode(mode);
            Vec::new()
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::SubmissionFinished {
            submission: _,
            mode,
            outcome,
        } => {
            // Responses are applied in arrival order; there is no fencing of stale replies.
            match outcome {
                SubmissionOutcome::Replied { success, body } => {
                    state.finish_submission(body);
                    if success {
                        state.reset_after_success(mode);
                    }
                }
                SubmissionOutcome::Failed { description } => {
                    state.finish_submission(format!("Error: {description}"));
                }
            }
            Vec::new()
        }
        Msg::HealthChecked(health) => {
            state.set_backend(health);
            Vec::new()
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut FormState) -> Vec<Effect> {
    let errors = validate(
        state.message(),
        state.mode(),
        state.numbers_text(),
        state.file(),
    );
    let valid = errors.is_empty();
    state.replace_errors(errors);
    if !valid {
        return Vec::new();
    }

    let text = state.message().to_string();
    match (state.mode(), state.file().cloned()) {
        (Mode::Numbers, _) => {
            let numbers = parse_numbers(state.numbers_text());
            let submission = state.begin_submission(SENDING_NUMBERS_STATUS);
            vec![Effect::SendText {
                submission,
                request: SendTextRequest { text, numbers },
            }]
        }
        (Mode::File, Some(file)) => {
            let submission = state.begin_submission(SENDING_FILE_STATUS);
            vec![Effect::SendTextFile {
                submission,
                request: SendFileRequest { text, file },
            }]
        }
        // Validation already rejected file mode without a selection.
        (Mode::File, None) => Vec::new(),
    }
}

/// Splits the manual entry into numbers, dropping blank lines and keeping order.
pub fn parse_numbers(raw: &str) -> Vec<String> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
