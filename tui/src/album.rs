//! Photo resolver over a directory of image files.
//!
//! A photo reference is a file name inside the album directory. The chooser is
//! a modal list of those files; its answer travels back through the
//! [`PhotoReply`] the editor handed over.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use journal_engine::{PhotoImage, PhotoReply, PhotoResolver};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Open chooser modal.
#[derive(Debug)]
pub struct PhotoChooser {
    items: Vec<String>,
    selected: usize,
    reply: PhotoReply,
}

impl PhotoChooser {
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.items.is_empty() {
            return;
        }
        let last = self.items.len() as isize - 1;
        self.selected = (self.selected as isize + delta).clamp(0, last) as usize;
    }
}

#[derive(Debug)]
pub struct DirectoryAlbum {
    dir: PathBuf,
    chooser: Option<PhotoChooser>,
}

impl DirectoryAlbum {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            chooser: None,
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn chooser(&self) -> Option<&PhotoChooser> {
        self.chooser.as_ref()
    }

    pub fn chooser_mut(&mut self) -> Option<&mut PhotoChooser> {
        self.chooser.as_mut()
    }

    /// Image file names in the album, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(dir = %self.dir.display(), "Failed to list photos: {e}");
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| is_image(name))
            .collect();
        names.sort();
        names
    }

    /// Answer the open chooser with the highlighted photo.
    pub fn choose_selected(&mut self) {
        if let Some(chooser) = self.chooser.take() {
            let choice = chooser.items.get(chooser.selected).cloned();
            chooser.reply.send(choice);
        }
    }

    /// Close the open chooser without choosing.
    pub fn dismiss(&mut self) {
        if let Some(chooser) = self.chooser.take() {
            chooser.reply.send(None);
        }
    }

    /// Drop a chooser whose request was abandoned by the editor.
    pub fn drop_abandoned(&mut self) {
        if self
            .chooser
            .as_ref()
            .is_some_and(|chooser| chooser.reply.is_abandoned())
        {
            tracing::debug!("Closing photo chooser for an abandoned request");
            self.chooser = None;
        }
    }
}

fn is_image(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// References are bare file names; anything with a path component is rejected.
fn is_plain_file_name(reference: &str) -> bool {
    !reference.is_empty()
        && reference != "."
        && reference != ".."
        && !reference.contains(['/', '\\'])
}

impl PhotoResolver for DirectoryAlbum {
    fn open_chooser(&mut self, current: Option<&str>, reply: PhotoReply) {
        if let Some(previous) = self.chooser.take() {
            previous.reply.send(None);
        }
        let items = self.list();
        let selected = current
            .and_then(|current| items.iter().position(|item| item == current))
            .unwrap_or(0);
        self.chooser = Some(PhotoChooser {
            items,
            selected,
            reply,
        });
    }

    fn resolve(&self, reference: &str) -> Option<PhotoImage> {
        if !is_plain_file_name(reference) {
            return None;
        }
        let path = self.dir.join(reference);
        let metadata = fs::metadata(&path).ok().filter(fs::Metadata::is_file)?;
        Some(PhotoImage {
            reference: reference.to_string(),
            path,
            size_bytes: metadata.len(),
        })
    }
}
