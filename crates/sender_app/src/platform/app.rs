use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use sender_core::{update, FormState, FormViewModel, Msg, SelectedFile};
use sender_logging::{sender_debug, sender_info, sender_warn};

use super::config::{ConfigSource, SenderConfig, DEFAULT_CONFIG_FILE};
use super::effects::EffectRunner;
use super::logging;
use super::terminal::TerminalGuard;
use super::ui;
use super::ui::input::{Focus, KeyAction};

pub fn run_app() -> Result<()> {
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let (config, source) = SenderConfig::load(&config_path)
        .with_context(|| format!("failed to load config {}", config_path.display()))?;
    logging::initialize(config.log_destination, config.level()?);
    match source {
        ConfigSource::File => sender_info!("Loaded config from {:?}", config_path),
        ConfigSource::Defaults => {
            sender_info!("No config at {:?}; using defaults", config_path)
        }
    }
    sender_info!("Starting bulk sender with config {:?}", config);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(config.dispatch_settings(), msg_tx.clone())?;
    let mut app = App::new(runner, msg_rx, msg_tx);

    let mut terminal = TerminalGuard::new()?;
    app.run(&mut terminal, config.tick_rate())
}

struct App {
    state: FormState,
    view: FormViewModel,
    focus: Focus,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    msg_tx: mpsc::Sender<Msg>,
    needs_render: bool,
    should_quit: bool,
}

impl App {
    fn new(runner: EffectRunner, msg_rx: mpsc::Receiver<Msg>, msg_tx: mpsc::Sender<Msg>) -> Self {
        let state = FormState::new();
        let view = state.view();
        Self {
            state,
            view,
            focus: Focus::default(),
            runner,
            msg_rx,
            msg_tx,
            needs_render: true,
            should_quit: false,
        }
    }

    fn run(&mut self, terminal: &mut TerminalGuard, tick_rate: Duration) -> Result<()> {
        let _ = self.msg_tx.send(Msg::AppStarted);

        while !self.should_quit {
            self.process_pending_messages();
            if self.needs_render {
                terminal.draw(|frame| ui::render::render(frame, &self.view, self.focus))?;
                self.needs_render = false;
            }

            if !event::poll(tick_rate)? {
                self.dispatch_msg(Msg::Tick);
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                Event::Paste(text) => {
                    if let Some(msg) = ui::input::paste_into(self.focus, &self.view, &text) {
                        self.dispatch_msg(msg);
                    }
                }
                Event::Resize(..) => self.needs_render = true,
                _ => {}
            }
        }

        sender_info!("Quit requested");
        Ok(())
    }

    fn process_pending_messages(&mut self) {
        let inbox: Vec<Msg> = self.msg_rx.try_iter().collect();
        for msg in inbox {
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let view = state.view();
        if state.consume_dirty() {
            self.view = view;
            self.needs_render = true;
        }
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match ui::input::map_key(key, self.focus, &self.view) {
            KeyAction::Dispatch(msg) => self.dispatch_msg(msg),
            KeyAction::Submit => {
                // The control is disabled while a request is in flight.
                if self.view.submit_enabled {
                    self.dispatch_msg(Msg::SubmitClicked);
                } else {
                    sender_debug!("Submit ignored while sending");
                }
            }
            KeyAction::FocusNext => self.set_focus(self.focus.next(self.view.mode)),
            KeyAction::FocusPrev => self.set_focus(self.focus.prev(self.view.mode)),
            KeyAction::SelectMode(mode) => {
                self.dispatch_msg(Msg::ModeSelected(mode));
                self.set_focus(Focus::Message);
            }
            KeyAction::PickFile => {
                let selection = resolve_file_selection(&self.view.file_input);
                self.dispatch_msg(Msg::FileSelected(selection));
            }
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Ignore => {}
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        if self.focus != focus {
            self.focus = focus;
            self.needs_render = true;
        }
    }
}

/// Turns the typed path into a selection; anything that is not a regular file clears it.
fn resolve_file_selection(input: &str) -> Option<SelectedFile> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let path = Path::new(trimmed);
    if path.is_file() {
        sender_info!("Selected file {:?}", path);
        Some(SelectedFile::from_path(path))
    } else {
        sender_warn!("Not a readable file: {:?}", path);
        None
    }
}
