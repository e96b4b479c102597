//! Keyboard-backed [`InputPoll`].
//!
//! Terminals that speak the kitty keyboard protocol report key releases; most
//! others only report presses and auto-repeats. In that legacy mode a press is
//! released again on the following frame (a tap), and holds are produced
//! either by dedicated hold bindings or by auto-repeat keeping a key down
//! until no repeat arrives for `release_timeout`.

use std::time::{Duration, Instant};

use journal_engine::{Action, InputPoll};

#[derive(Debug, Clone, Copy, Default)]
struct KeyState {
    down: bool,
    newly_pressed: bool,
    newly_released: bool,
    /// Synthetic release deadline; `None` waits for a real release event.
    release_at: Option<Instant>,
}

#[derive(Debug)]
pub struct KeyboardPoll {
    keys: [KeyState; Action::COUNT],
    reports_releases: bool,
    release_timeout: Duration,
}

impl KeyboardPoll {
    #[must_use]
    pub fn new(reports_releases: bool, release_timeout: Duration) -> Self {
        Self {
            keys: [KeyState::default(); Action::COUNT],
            reports_releases,
            release_timeout,
        }
    }

    #[must_use]
    pub fn reports_releases(&self) -> bool {
        self.reports_releases
    }

    /// Start a new frame: clear last frame's edges and expire synthetic holds.
    pub fn begin_frame(&mut self, now: Instant) {
        for key in &mut self.keys {
            key.newly_pressed = false;
            key.newly_released = false;
            if key.down && key.release_at.is_some_and(|at| at <= now) {
                key.down = false;
                key.newly_released = true;
                key.release_at = None;
            }
        }
    }

    pub fn press(&mut self, action: Action, now: Instant) {
        let release_at = if self.reports_releases { None } else { Some(now) };
        self.start(action, release_at);
    }

    /// Press and keep the action down for `hold`, whether or not the terminal reports releases.
    pub fn press_and_hold(&mut self, action: Action, now: Instant, hold: Duration) {
        self.start(action, Some(now + hold));
    }

    /// Down for the current frame only, in every terminal mode.
    pub fn pulse(&mut self, action: Action, now: Instant) {
        self.start(action, Some(now));
    }

    pub fn repeat(&mut self, action: Action, now: Instant) {
        let key = &mut self.keys[action.index()];
        if !key.down {
            let release_at = if self.reports_releases {
                None
            } else {
                Some(now + self.release_timeout)
            };
            self.start(action, release_at);
            return;
        }
        if let Some(at) = key.release_at {
            key.release_at = Some(at.max(now + self.release_timeout));
        }
    }

    /// Real key release. Keys held by a hold binding keep their deadline.
    pub fn release(&mut self, action: Action) {
        let key = &mut self.keys[action.index()];
        if key.down && key.release_at.is_none() {
            key.down = false;
            key.newly_released = true;
            key.release_at = None;
        }
    }

    /// Drop every key without reporting releases.
    pub fn clear(&mut self) {
        self.keys = [KeyState::default(); Action::COUNT];
    }

    fn start(&mut self, action: Action, release_at: Option<Instant>) {
        let key = &mut self.keys[action.index()];
        if key.down {
            return;
        }
        key.down = true;
        key.newly_pressed = true;
        key.release_at = release_at;
    }
}

impl InputPoll for KeyboardPoll {
    fn is_pressed(&self, action: Action) -> bool {
        self.keys[action.index()].down
    }

    fn is_newly_pressed(&self, action: Action) -> bool {
        self.keys[action.index()].newly_pressed
    }

    fn is_newly_released(&self, action: Action) -> bool {
        self.keys[action.index()].newly_released
    }
}
