// SPDX-License-Identifier: MPL-2.0
//! Application state persistence using CBOR format.
//!
//! Holds what the app remembers between runs without the user ever editing
//! it, kept apart from the TOML preferences. Today that is only the directory
//! the file picker last opened in.
//!
//! # Path Resolution
//!
//! 1. Use `load_from()`/`save_to()` with explicit path override
//! 2. `--data-dir` or `MINERAMA_DATA_DIR`
//! 3. Falls back to platform-specific data directory

use super::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// State file name within the app data directory.
const STATE_FILE: &str = "state.cbor";

/// Application state that persists across sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppState {
    /// Directory the "browse" picker starts in.
    #[serde(default)]
    pub last_open_directory: Option<PathBuf>,
}

impl AppState {
    /// Loads application state from the default location.
    ///
    /// Returns (state, optional i18n warning key). Failures fall back to the
    /// default state.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(None)
    }

    /// Loads application state from a custom directory.
    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return (Self::default(), None);
        };

        if !path.exists() {
            return (Self::default(), None);
        }

        match fs::File::open(&path) {
            Ok(file) => match ciborium::from_reader(BufReader::new(file)) {
                Ok(state) => (state, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "unreadable state file");
                    (
                        Self::default(),
                        Some("notification-state-parse-error".to_string()),
                    )
                }
            },
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "cannot open state file");
                (
                    Self::default(),
                    Some("notification-state-read-error".to_string()),
                )
            }
        }
    }

    /// Saves application state to the default location.
    ///
    /// Returns an i18n warning key if the save failed.
    pub fn save(&self) -> Option<String> {
        self.save_to(None)
    }

    /// Saves application state to a custom directory.
    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Option<String> {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return Some("notification-state-path-error".to_string());
        };

        if let Some(parent) = path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return Some("notification-state-dir-error".to_string());
            }
        }

        match fs::File::create(&path) {
            Ok(file) => {
                if ciborium::into_writer(self, BufWriter::new(file)).is_err() {
                    return Some("notification-state-write-error".to_string());
                }
                None
            }
            Err(_) => Some("notification-state-create-error".to_string()),
        }
    }

    fn state_file_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
        paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
            path.push(STATE_FILE);
            path
        })
    }

    /// Remembers the parent directory of a picked file.
    ///
    /// Paths without a parent (e.g. `/`) leave the state untouched.
    pub fn set_last_open_directory_from_file(&mut self, file_path: &Path) {
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                self.last_open_directory = Some(parent.to_path_buf());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_state_has_no_last_directory() {
        assert!(AppState::default().last_open_directory.is_none());
    }

    #[test]
    fn set_last_open_directory_extracts_parent() {
        let mut state = AppState::default();
        state.set_last_open_directory_from_file(Path::new("/home/user/clips/intro.mp4"));
        assert_eq!(
            state.last_open_directory,
            Some(PathBuf::from("/home/user/clips"))
        );
    }

    #[test]
    fn set_last_open_directory_ignores_root_and_bare_names() {
        let mut state = AppState::default();
        state.set_last_open_directory_from_file(Path::new("/"));
        state.set_last_open_directory_from_file(Path::new("clip.mp4"));
        assert!(state.last_open_directory.is_none());
    }

    #[test]
    fn save_to_and_load_from_round_trip() {
        let temp_dir = tempdir().expect("create temp dir");
        let state = AppState {
            last_open_directory: Some(PathBuf::from("/home/user/clips")),
        };

        assert!(state.save_to(Some(temp_dir.path().to_path_buf())).is_none());
        let (loaded, warning) = AppState::load_from(Some(temp_dir.path().to_path_buf()));

        assert!(warning.is_none());
        assert_eq!(loaded, state);
    }

    #[test]
    fn load_from_missing_file_returns_default_silently() {
        let temp_dir = tempdir().expect("create temp dir");
        let (state, warning) = AppState::load_from(Some(temp_dir.path().join("absent")));
        assert_eq!(state, AppState::default());
        assert!(warning.is_none());
    }

    #[test]
    fn load_from_garbage_reports_parse_warning() {
        let temp_dir = tempdir().expect("create temp dir");
        fs::write(temp_dir.path().join(STATE_FILE), b"\xff\xff not cbor").expect("write");

        let (state, warning) = AppState::load_from(Some(temp_dir.path().to_path_buf()));
        assert_eq!(state, AppState::default());
        assert_eq!(warning.as_deref(), Some("notification-state-parse-error"));
    }
}
