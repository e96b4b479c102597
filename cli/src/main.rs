//! Journal CLI - Binary entry point and terminal session management.
//!
//! # Architecture
//!
//! The CLI bridges [`journal_engine`] (the editor state machine) and
//! [`journal_tui`] (the terminal host), providing RAII-based terminal
//! management with guaranteed cleanup.
//!
//! ```text
//! main() -> EntryStore::load -> TerminalSession::new() -> run_journal() -> editor.exit()
//! ```
//!
//! # Event Loop
//!
//! A fixed 8ms (~120 FPS) cadence:
//!
//! 1. Wait for frame tick
//! 2. Start a new key frame (expire synthetic releases)
//! 3. Drain input queue (non-blocking via [`journal_tui::InputPump`])
//! 4. Advance the editor (`editor.update()`)
//! 5. Render frame
//!
//! Leaving the loop closes the journal, which flushes any pending save once
//! the terminal has been restored.

use anyhow::Result;
use crossterm::{
    event::{
        DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use ratatui::prelude::*;
use std::{
    fs::{self, File, OpenOptions},
    io::{Stdout, Write, stdout},
    path::PathBuf,
    sync::Mutex,
    time::{Duration, Instant},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use journal_config::JournalConfig;
use journal_engine::{DurableStore, EditorOptions, EntryStore, FsStore, JournalEditor, Mode};
use journal_tui::{EditorStatus, Host, HostCommand, InputPump, UiOptions, draw, handle_events};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_journal_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: stay silent rather than write over the TUI.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_journal_log_file() -> (Option<(PathBuf, File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in journal_log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn journal_log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.journal/logs/journal.log
    if let Some(config_path) = JournalConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("journal.log"));
    }

    // Fallback: ./.journal/logs/journal.log
    candidates.push(PathBuf::from(".journal").join("logs").join("journal.log"));

    candidates
}

fn load_config() -> JournalConfig {
    match JournalConfig::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Using default configuration: {e}");
            JournalConfig::default()
        }
    }
}

fn editor_options(config: &JournalConfig) -> EditorOptions {
    let input = config.input();
    EditorOptions {
        rename_hold: input.rename_hold(),
        delete_hold: input.delete_hold(),
        remove_photo_hold: input.remove_photo_hold(),
    }
}

/// RAII wrapper for terminal state with guaranteed cleanup on drop.
///
/// Manages raw mode, bracketed paste, the alternate screen and, where the
/// terminal supports it, key release reporting. Everything is restored on
/// drop, including after panics or early returns.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    keyboard_enhanced: bool,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnableBracketedPaste, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            let _ = execute!(out, LeaveAlternateScreen, DisableBracketedPaste);
            return Err(err.into());
        }

        let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false)
            && execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .is_ok();
        tracing::debug!(keyboard_enhanced, "Terminal session started");

        let terminal = match Terminal::new(CrosstermBackend::new(out)) {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let mut out = stdout();
                if keyboard_enhanced {
                    let _ = execute!(out, PopKeyboardEnhancementFlags);
                }
                let _ = execute!(out, LeaveAlternateScreen, DisableBracketedPaste);
                return Err(err.into());
            }
        };

        Ok(Self {
            terminal,
            keyboard_enhanced,
        })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        if self.keyboard_enhanced {
            let _ = execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        );
        let _ = Write::flush(self.terminal.backend_mut());
        let _ = self.terminal.show_cursor();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = load_config();
    let data_dir = config.data_dir();
    tracing::info!(path = %data_dir.path.display(), source = ?data_dir.source, "Data directory");

    let store = EntryStore::load(FsStore::new(data_dir.saves_dir()), config.profile_id());
    let mut editor = JournalEditor::new(store, editor_options(&config));
    let ui = UiOptions {
        ascii_only: config.ascii_only(),
        high_contrast: config.high_contrast(),
    };

    let mut session = TerminalSession::new()?;
    let mut host = Host::new(
        config.photos_dir(&data_dir),
        session.keyboard_enhanced,
        config.input().release_timeout(),
    );

    let run_result = run_journal(&mut session.terminal, &mut editor, &mut host, ui).await;
    drop(session);

    if let Err(err) = run_result {
        eprintln!("Error: {err:?}");
    }

    if let Err(e) = editor.exit(&mut host.context()) {
        tracing::error!("{e}");
        eprintln!("Failed to save journal: {e}");
    }

    Ok(())
}

const FRAME_DURATION: Duration = Duration::from_millis(8);

async fn run_journal<B, D>(
    terminal: &mut Terminal<B>,
    editor: &mut JournalEditor<D>,
    host: &mut Host,
    ui: UiOptions,
) -> Result<()>
where
    B: Backend + Write,
    B::Error: Send + Sync + 'static,
    D: DurableStore,
{
    editor.initialize(&mut host.context());
    editor.enter(&mut host.context());

    let mut input = InputPump::new();
    let mut frames = tokio::time::interval(FRAME_DURATION);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result: Result<()> = loop {
        frames.tick().await;
        let now = Instant::now();
        host.keys.begin_frame(now);

        // Non-blocking input (drain queue only)
        let status = EditorStatus::of(editor);
        match handle_events(host, &status, &mut input, now) {
            Ok(HostCommand::Continue) => {}
            Ok(HostCommand::Quit) => break Ok(()),
            Err(e) => break Err(e),
        }

        editor.update(&mut host.context(), now);
        host.album.drop_abandoned();

        if host.list.take_redraw()
            && let Err(e) = terminal.clear()
        {
            break Err(e.into());
        }

        let status = EditorStatus::of(editor);
        if let Err(e) = terminal.draw(|frame| draw(frame, &status, host, ui)) {
            break Err(e.into());
        }
    };

    input.shutdown().await;
    result
}
