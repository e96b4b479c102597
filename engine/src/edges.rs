//! Tap/hold disambiguation over an [`InputPoll`].
//!
//! One physical key can drive two commands: a short tap and a long hold. The
//! detector is fed once per tick and answers per action:
//!
//! - `held_for` fires once per press, on the first tick the press has lasted
//!   at least the threshold,
//! - `tapped` is true on the tick the key comes up, if the press was shorter
//!   than the threshold and its hold never fired.
//!
//! Only presses that started while the detector was watching are tracked, so a
//! key already down when the journal opens never counts.

use std::time::{Duration, Instant};

use crate::host::{Action, InputPoll};

#[derive(Debug, Clone, Copy)]
struct Release {
    held: Duration,
    hold_fired: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct Track {
    pressed_at: Option<Instant>,
    hold_fired: bool,
    newly_pressed: bool,
    released: Option<Release>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ActionEdges {
    now: Option<Instant>,
    tracks: [Track; Action::COUNT],
}

impl ActionEdges {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, input: &dyn InputPoll, now: Instant) {
        self.now = Some(now);
        for action in Action::ALL {
            let track = &mut self.tracks[action.index()];
            track.released = None;
            track.newly_pressed = input.is_newly_pressed(action);

            if track.newly_pressed {
                track.pressed_at = Some(now);
                track.hold_fired = false;
            }

            if input.is_newly_released(action) {
                if let Some(at) = track.pressed_at.take() {
                    track.released = Some(Release {
                        held: now.saturating_duration_since(at),
                        hold_fired: track.hold_fired,
                    });
                }
                track.hold_fired = false;
            } else if !input.is_pressed(action) && !track.newly_pressed {
                // Release was never reported; forget the press without a tap.
                track.pressed_at = None;
                track.hold_fired = false;
            }
        }
    }

    /// Forget every tracked press.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn newly_pressed(&self, action: Action) -> bool {
        self.tracks[action.index()].newly_pressed
    }

    #[cfg(test)]
    #[must_use]
    pub fn is_held(&self, action: Action) -> bool {
        self.tracks[action.index()].pressed_at.is_some()
    }

    pub fn held_for(&mut self, action: Action, threshold: Duration) -> bool {
        let Some(now) = self.now else {
            return false;
        };
        let track = &mut self.tracks[action.index()];
        match track.pressed_at {
            Some(at) if !track.hold_fired && now.saturating_duration_since(at) >= threshold => {
                track.hold_fired = true;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn tapped(&self, action: Action, threshold: Duration) -> bool {
        matches!(
            self.tracks[action.index()].released,
            Some(release) if !release.hold_fired && release.held < threshold
        )
    }
}
