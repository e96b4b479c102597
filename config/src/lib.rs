//! Configuration loading for the journal.
//!
//! Reads `~/.journal/config.toml`. Every section and field is optional; the
//! accessors on each section resolve missing values to their defaults so the
//! rest of the workspace never sees an `Option`.
//!
//! ```toml
//! [app]
//! profile = "Hearthian"
//! data_dir = "${HOME}/games/journal"
//! ascii_only = false
//! high_contrast = false
//!
//! [input]
//! rename_hold_ms = 300
//! delete_hold_ms = 500
//! remove_photo_hold_ms = 500
//! release_timeout_ms = 550
//!
//! [photos]
//! dir = "${HOME}/Pictures/snapshots"
//! ```

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Profile id used when no profile is configured.
pub const FALLBACK_PROFILE_ID: &str = "XboxGamepassDefaultProfile";

const CONFIG_DIR_NAME: &str = ".journal";
const DEFAULT_RENAME_HOLD_MS: u64 = 300;
const DEFAULT_DELETE_HOLD_MS: u64 = 500;
const DEFAULT_REMOVE_PHOTO_HOLD_MS: u64 = 500;
const DEFAULT_RELEASE_TIMEOUT_MS: u64 = 550;

#[derive(Debug, Default, Deserialize)]
pub struct JournalConfig {
    pub app: Option<AppConfig>,
    pub input: Option<InputConfig>,
    pub photos: Option<PhotosConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to parse config at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Profile whose journal is opened. Falls back to `$JOURNAL_PROFILE`.
    pub profile: Option<String>,
    /// Root for saves, photos and logs. Supports `${VAR}` expansion.
    pub data_dir: Option<String>,
    /// Use ASCII-only glyphs for markers and placeholders.
    #[serde(default)]
    pub ascii_only: bool,
    #[serde(default)]
    pub high_contrast: bool,
}

/// Hold thresholds for the press-and-hold commands.
#[derive(Debug, Default, Deserialize)]
pub struct InputConfig {
    pub rename_hold_ms: Option<u64>,
    pub delete_hold_ms: Option<u64>,
    pub remove_photo_hold_ms: Option<u64>,
    /// Terminals without key-release reporting get a synthetic release after
    /// this long without a repeat event.
    pub release_timeout_ms: Option<u64>,
}

impl InputConfig {
    #[must_use]
    pub fn rename_hold(&self) -> Duration {
        Duration::from_millis(self.rename_hold_ms.unwrap_or(DEFAULT_RENAME_HOLD_MS))
    }

    #[must_use]
    pub fn delete_hold(&self) -> Duration {
        Duration::from_millis(self.delete_hold_ms.unwrap_or(DEFAULT_DELETE_HOLD_MS))
    }

    #[must_use]
    pub fn remove_photo_hold(&self) -> Duration {
        Duration::from_millis(
            self.remove_photo_hold_ms
                .unwrap_or(DEFAULT_REMOVE_PHOTO_HOLD_MS),
        )
    }

    #[must_use]
    pub fn release_timeout(&self) -> Duration {
        Duration::from_millis(self.release_timeout_ms.unwrap_or(DEFAULT_RELEASE_TIMEOUT_MS))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PhotosConfig {
    /// Directory the photo chooser lists. Supports `${VAR}` expansion.
    pub dir: Option<String>,
}

/// Where the data directory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataDirSource {
    /// `[app] data_dir` or `$JOURNAL_DATA_DIR`.
    Custom,
    /// `~/.journal`.
    System,
    /// `./.journal`, used when no home directory is available.
    Fallback,
}

#[derive(Debug, Clone)]
pub struct DataDir {
    pub path: PathBuf,
    pub source: DataDirSource,
}

impl DataDir {
    #[must_use]
    pub fn join(&self, child: &str) -> PathBuf {
        self.path.join(child)
    }

    #[must_use]
    pub fn saves_dir(&self) -> PathBuf {
        self.join("saves")
    }

    #[must_use]
    pub fn logs_dir(&self) -> PathBuf {
        self.join("logs")
    }
}

/// Expand `${VAR}` references using `lookup`. Unknown variables become empty.
pub fn expand_vars_with(value: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let var = &after[..end];
        if !var.is_empty() {
            out.push_str(&lookup(var).unwrap_or_default());
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

fn expand_env_vars(value: &str) -> String {
    expand_vars_with(value, |name| env::var(name).ok())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl JournalConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        Self::load_from(path)
    }

    pub fn load_from(path: PathBuf) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read { path, source: err });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse { path, source: err })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn input(&self) -> &InputConfig {
        static DEFAULT: InputConfig = InputConfig {
            rename_hold_ms: None,
            delete_hold_ms: None,
            remove_photo_hold_ms: None,
            release_timeout_ms: None,
        };
        self.input.as_ref().unwrap_or(&DEFAULT)
    }

    #[must_use]
    pub fn ascii_only(&self) -> bool {
        self.app.as_ref().is_some_and(|app| app.ascii_only)
    }

    #[must_use]
    pub fn high_contrast(&self) -> bool {
        self.app.as_ref().is_some_and(|app| app.high_contrast)
    }

    /// Profile id: `[app] profile`, then `$JOURNAL_PROFILE`, then the fallback id.
    #[must_use]
    pub fn profile_id(&self) -> String {
        let env_profile = env::var("JOURNAL_PROFILE").ok();
        self.profile_id_with(env_profile.as_deref())
    }

    fn profile_id_with(&self, env_profile: Option<&str>) -> String {
        let configured = self.app.as_ref().and_then(|app| app.profile.as_deref());
        non_blank(configured)
            .or_else(|| non_blank(env_profile))
            .unwrap_or(FALLBACK_PROFILE_ID)
            .to_string()
    }

    /// Data directory: `[app] data_dir`, then `$JOURNAL_DATA_DIR`, then `~/.journal`.
    #[must_use]
    pub fn data_dir(&self) -> DataDir {
        let env_dir = env::var("JOURNAL_DATA_DIR").ok();
        self.data_dir_with(env_dir.as_deref(), dirs::home_dir())
    }

    fn data_dir_with(&self, env_dir: Option<&str>, home: Option<PathBuf>) -> DataDir {
        let configured = self.app.as_ref().and_then(|app| app.data_dir.as_deref());
        if let Some(custom) = non_blank(configured).or_else(|| non_blank(env_dir)) {
            return DataDir {
                path: PathBuf::from(expand_env_vars(custom)),
                source: DataDirSource::Custom,
            };
        }
        match home {
            Some(home) => DataDir {
                path: home.join(CONFIG_DIR_NAME),
                source: DataDirSource::System,
            },
            None => DataDir {
                path: PathBuf::from(CONFIG_DIR_NAME),
                source: DataDirSource::Fallback,
            },
        }
    }

    /// Photo directory: `[photos] dir`, else `<data_dir>/photos`.
    #[must_use]
    pub fn photos_dir(&self, data_dir: &DataDir) -> PathBuf {
        let configured = self.photos.as_ref().and_then(|photos| photos.dir.as_deref());
        match non_blank(configured) {
            Some(dir) => PathBuf::from(expand_env_vars(dir)),
            None => data_dir.join("photos"),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join("config.toml"))
}
