//! Input handling for the journal TUI.
//!
//! Terminal events are read on a blocking thread and drained once per frame.
//! Keys become [`Action`] presses on the [`KeyboardPoll`](crate::keys::KeyboardPoll)
//! the editor polls, or go straight to the text field, photo chooser or list,
//! depending on the input mode the editor last asked for.

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};
use tokio::sync::mpsc;

use journal_engine::{Action, EditorState, HostInputMode};

use crate::EditorStatus;
use crate::host::Host;

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 1024; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

/// Hold bindings keep their action down this much longer than the threshold they target.
const HOLD_MARGIN: Duration = Duration::from_millis(120);

/// What the frame loop should do after a batch of events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    Continue,
    Quit,
}

enum InputMsg {
    Event(Event),
    Error(String),
}

pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(stop2, tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        // Close first so a reader blocked on a full channel wakes up.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: Arc<AtomicBool>, tx: mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drain up to one frame's worth of terminal events into `host`.
pub fn handle_events(
    host: &mut Host,
    status: &EditorStatus,
    input: &mut InputPump,
    now: Instant,
) -> Result<HostCommand> {
    for _ in 0..MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };

        if apply_event(host, status, ev, now) == HostCommand::Quit {
            return Ok(HostCommand::Quit);
        }
    }
    Ok(HostCommand::Continue)
}

/// Route one terminal event according to the current input mode.
pub fn apply_event(
    host: &mut Host,
    status: &EditorStatus,
    event: Event,
    now: Instant,
) -> HostCommand {
    match event {
        Event::Key(key) => {
            if key.kind != KeyEventKind::Release
                && key.modifiers.contains(KeyModifiers::CONTROL)
                && key.code == KeyCode::Char('c')
            {
                return if host.request_force_quit() {
                    HostCommand::Quit
                } else {
                    HostCommand::Continue
                };
            }

            if key.kind != KeyEventKind::Release {
                host.clear_notice();
            }

            match host.control.mode() {
                HostInputMode::Inactive => HostCommand::Continue,
                HostInputMode::Browsing => handle_browsing(host, status, key, now),
                HostInputMode::TextCapture => {
                    handle_text_capture(host, key, now);
                    HostCommand::Continue
                }
                HostInputMode::Suspended => {
                    handle_chooser(host, key);
                    HostCommand::Continue
                }
            }
        }
        Event::Paste(text) => {
            if host.control.mode() == HostInputMode::TextCapture {
                host.text.paste(&text);
            }
            HostCommand::Continue
        }
        _ => HostCommand::Continue,
    }
}

/// Keys that map one-to-one onto an action while browsing.
fn direct_action(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('n') => Some(Action::Create),
        KeyCode::Char('e') => Some(Action::Edit),
        KeyCode::Char('m') => Some(Action::ToggleMore),
        KeyCode::Char('p') => Some(Action::Photo),
        KeyCode::Char('d') => Some(Action::Delete),
        KeyCode::Char('h' | '?') => Some(Action::TogglePrompts),
        KeyCode::Enter => Some(Action::Confirm),
        _ => None,
    }
}

fn handle_browsing(
    host: &mut Host,
    status: &EditorStatus,
    key: KeyEvent,
    now: Instant,
) -> HostCommand {
    let options = status.options;

    if key.kind == KeyEventKind::Release {
        if let Some(action) = direct_action(key.code) {
            host.keys.release(action);
        }
        return HostCommand::Continue;
    }

    if status.state == EditorState::Deleting {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => host.keys.pulse(Action::Cancel, now),
            KeyCode::Char('d' | 'D') => {
                host.keys
                    .press_and_hold(Action::Delete, now, options.delete_hold + HOLD_MARGIN);
            }
            KeyCode::Enter => {
                host.keys
                    .press_and_hold(Action::Confirm, now, options.delete_hold + HOLD_MARGIN);
            }
            _ => {}
        }
        return HostCommand::Continue;
    }

    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc if status.allow_cancel => return HostCommand::Quit,
        KeyCode::Up | KeyCode::Char('k') => {
            if shift {
                host.keys.pulse(Action::Move, now);
            }
            host.list.navigate(-1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if shift {
                host.keys.pulse(Action::Move, now);
            }
            host.list.navigate(1);
        }
        KeyCode::Char('K') => {
            host.keys.pulse(Action::Move, now);
            host.list.navigate(-1);
        }
        KeyCode::Char('J') => {
            host.keys.pulse(Action::Move, now);
            host.list.navigate(1);
        }
        KeyCode::Char('r' | 'E') => {
            host.keys
                .press_and_hold(Action::Edit, now, options.rename_hold + HOLD_MARGIN);
        }
        KeyCode::Char('P') => {
            host.keys
                .press_and_hold(Action::Photo, now, options.remove_photo_hold + HOLD_MARGIN);
        }
        KeyCode::Char('D') => {
            host.keys
                .press_and_hold(Action::Delete, now, options.delete_hold + HOLD_MARGIN);
        }
        code => {
            if let Some(action) = direct_action(code) {
                if key.kind == KeyEventKind::Repeat {
                    host.keys.repeat(action, now);
                } else {
                    host.keys.press(action, now);
                }
            }
        }
    }
    HostCommand::Continue
}

fn handle_text_capture(host: &mut Host, key: KeyEvent, now: Instant) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let single_line = host
        .text
        .target()
        .is_some_and(|target| !target.is_multiline());

    match key.code {
        KeyCode::Esc => host.keys.pulse(Action::Cancel, now),
        KeyCode::Char('s') if ctrl => host.keys.pulse(Action::Confirm, now),
        KeyCode::Enter if single_line || ctrl || alt => host.keys.pulse(Action::Confirm, now),
        _ => {
            host.text.apply_key(key);
        }
    }
}

fn handle_chooser(host: &mut Host, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            if let Some(chooser) = host.album.chooser_mut() {
                chooser.move_selection(-1);
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if let Some(chooser) = host.album.chooser_mut() {
                chooser.move_selection(1);
            }
        }
        KeyCode::Enter => host.album.choose_selected(),
        KeyCode::Esc | KeyCode::Char('q') => host.album.dismiss(),
        _ => {}
    }
}
