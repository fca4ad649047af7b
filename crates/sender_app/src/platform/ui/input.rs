use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use sender_core::{FormViewModel, Mode, Msg};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Message,
    Numbers,
    FilePath,
    Submit,
}

impl Focus {
    fn order(mode: Mode) -> [Focus; 3] {
        match mode {
            Mode::Numbers => [Focus::Message, Focus::Numbers, Focus::Submit],
            Mode::File => [Focus::Message, Focus::FilePath, Focus::Submit],
        }
    }

    pub fn next(self, mode: Mode) -> Focus {
        self.step(mode, 1)
    }

    pub fn prev(self, mode: Mode) -> Focus {
        self.step(mode, 2)
    }

    fn step(self, mode: Mode, by: usize) -> Focus {
        let order = Self::order(mode);
        let idx = order.iter().position(|focus| *focus == self).unwrap_or(0);
        order[(idx + by) % order.len()]
    }

    fn is_multiline(self) -> bool {
        matches!(self, Focus::Message | Focus::Numbers)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Dispatch(Msg),
    Submit,
    FocusNext,
    FocusPrev,
    SelectMode(Mode),
    PickFile,
    Quit,
    Ignore,
}

pub fn map_key(key: KeyEvent, focus: Focus, view: &FormViewModel) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if ctrl => KeyAction::Quit,
        KeyCode::Char('s') if ctrl => KeyAction::Submit,
        KeyCode::Char('n') if ctrl => KeyAction::SelectMode(Mode::Numbers),
        KeyCode::Char('f') if ctrl => KeyAction::SelectMode(Mode::File),
        KeyCode::F(5) => KeyAction::Dispatch(Msg::HealthRefreshRequested),
        KeyCode::Tab => KeyAction::FocusNext,
        KeyCode::BackTab => KeyAction::FocusPrev,
        KeyCode::Enter if focus == Focus::Submit => KeyAction::Submit,
        KeyCode::Enter if focus == Focus::FilePath => KeyAction::PickFile,
        _ => match field_text(focus, view) {
            Some(current) => apply_edit(current, key, focus.is_multiline())
                .map(|next| KeyAction::Dispatch(field_msg(focus, next)))
                .unwrap_or(KeyAction::Ignore),
            None => KeyAction::Ignore,
        },
    }
}

/// Appends pasted text to the focused field. Single-line fields drop line breaks.
pub fn paste_into(focus: Focus, view: &FormViewModel, pasted: &str) -> Option<Msg> {
    let current = field_text(focus, view)?;
    let normalized = pasted.replace("\r\n", "\n").replace('\r', "\n");
    let addition = if focus.is_multiline() {
        normalized
    } else {
        normalized.replace('\n', "")
    };
    Some(field_msg(focus, format!("{current}{addition}")))
}

fn apply_edit(current: &str, key: KeyEvent, multiline: bool) -> Option<String> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let mut next = current.to_string();
    match key.code {
        KeyCode::Char('u') if ctrl => next.clear(),
        KeyCode::Char(_) if ctrl || alt => return None,
        KeyCode::Char(ch) => next.push(ch),
        KeyCode::Enter if multiline => next.push('\n'),
        KeyCode::Backspace => {
            next.pop()?;
        }
        _ => return None,
    }
    Some(next)
}

fn field_text(focus: Focus, view: &FormViewModel) -> Option<&str> {
    match focus {
        Focus::Message => Some(&view.message),
        Focus::Numbers => Some(&view.numbers_text),
        Focus::FilePath => Some(&view.file_input),
        Focus::Submit => None,
    }
}

fn field_msg(focus: Focus, text: String) -> Msg {
    match focus {
        Focus::Numbers => Msg::NumbersChanged(text),
        Focus::FilePath => Msg::FilePathChanged(text),
        Focus::Message | Focus::Submit => Msg::MessageChanged(text),
    }
}
