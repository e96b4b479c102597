//! Terminal host: owns every collaborator the editor talks to.

use std::path::PathBuf;
use std::time::Duration;

use journal_engine::{HostContext, HostControl, HostInputMode, WidgetHandle};

use crate::album::DirectoryAlbum;
use crate::keys::KeyboardPoll;
use crate::list::TerminalList;
use crate::text_input::TerminalTextInput;

const TEXT_WIDGET: WidgetHandle = WidgetHandle(1);

/// Input mode and pause lock as last requested by the editor.
#[derive(Debug, Default)]
pub struct TerminalHost {
    mode: HostInputMode,
    pause_locked: bool,
}

impl TerminalHost {
    #[must_use]
    pub fn mode(&self) -> HostInputMode {
        self.mode
    }

    #[must_use]
    pub fn pause_locked(&self) -> bool {
        self.pause_locked
    }
}

impl HostControl for TerminalHost {
    fn set_input_mode(&mut self, mode: HostInputMode) {
        if self.mode != mode {
            tracing::debug!(from = ?self.mode, to = ?mode, "Input mode changed");
        }
        self.mode = mode;
    }

    fn set_pause_locked(&mut self, locked: bool) {
        self.pause_locked = locked;
    }
}

#[derive(Debug)]
pub struct Host {
    pub list: TerminalList,
    pub text: TerminalTextInput,
    pub keys: KeyboardPoll,
    pub album: DirectoryAlbum,
    pub control: TerminalHost,
    notice: Option<String>,
    quit_armed: bool,
}

impl Host {
    pub fn new(
        photos_dir: impl Into<PathBuf>,
        reports_releases: bool,
        release_timeout: Duration,
    ) -> Self {
        Self {
            list: TerminalList::new(),
            text: TerminalTextInput::new(TEXT_WIDGET),
            keys: KeyboardPoll::new(reports_releases, release_timeout),
            album: DirectoryAlbum::new(photos_dir),
            control: TerminalHost::default(),
            notice: None,
            quit_armed: false,
        }
    }

    /// Borrow every collaborator for one editor call.
    pub fn context(&mut self) -> HostContext<'_> {
        HostContext {
            list: &mut self.list,
            text: &mut self.text,
            input: &self.keys,
            photos: &mut self.album,
            host: &mut self.control,
        }
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
        self.quit_armed = false;
    }

    /// First call while the pause lock is held only arms the quit.
    pub(crate) fn request_force_quit(&mut self) -> bool {
        if !self.control.pause_locked() || self.quit_armed {
            return true;
        }
        self.quit_armed = true;
        self.set_notice("Edit in progress: press Ctrl+C again to discard it and quit");
        false
    }
}
