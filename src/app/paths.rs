// SPDX-License-Identifier: MPL-2.0
//! Where Minerama keeps its files.
//!
//! Three directories are resolved here: the config directory (`settings.toml`),
//! the data directory (`state.cbor`) and the episode media directory.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** passed to a `_with_override()` function (tests)
//! 2. **CLI arguments** (`--config-dir`, `--data-dir`, `--media-dir`), see [`init_cli_overrides`]
//! 3. **Environment variables** (`MINERAMA_CONFIG_DIR`, `MINERAMA_DATA_DIR`)
//! 4. **Platform default** via `dirs`
//!
//! The media directory additionally honours `[catalog] media_dir` from the
//! config file between steps 2 and 4, and defaults to `<data dir>/sample-videos`.

use crate::config::DEFAULT_MEDIA_DIR_NAME;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "Minerama";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "MINERAMA_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "MINERAMA_CONFIG_DIR";

/// Directory overrides given on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub data_dir: Option<PathBuf>,
    pub config_dir: Option<PathBuf>,
    pub media_dir: Option<PathBuf>,
}

static CLI_OVERRIDES: OnceLock<CliOverrides> = OnceLock::new();

/// Records the CLI directory overrides.
///
/// Only the first call has an effect; later calls are logged and ignored.
pub fn init_cli_overrides(overrides: CliOverrides) {
    if CLI_OVERRIDES.set(overrides).is_err() {
        tracing::warn!("CLI directory overrides were already initialized");
    }
}

fn cli_overrides() -> Option<&'static CliOverrides> {
    CLI_OVERRIDES.get()
}

fn env_dir(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn resolve(
    override_path: Option<PathBuf>,
    cli: Option<PathBuf>,
    env_name: &str,
    platform: Option<PathBuf>,
) -> Option<PathBuf> {
    override_path
        .or(cli)
        .or_else(|| env_dir(env_name))
        .or_else(|| {
            platform.map(|mut path| {
                path.push(APP_NAME);
                path
            })
        })
}

/// Returns the application data directory (holds `state.cbor`).
///
/// - Linux: `~/.local/share/Minerama/`
/// - macOS: `~/Library/Application Support/Minerama/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\Minerama\`
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

/// Returns the application data directory, preferring `override_path`.
pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(
        override_path,
        cli_overrides().and_then(|cli| cli.data_dir.clone()),
        ENV_DATA_DIR,
        dirs::data_dir(),
    )
}

/// Returns the application config directory (holds `settings.toml`).
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the application config directory, preferring `override_path`.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(
        override_path,
        cli_overrides().and_then(|cli| cli.config_dir.clone()),
        ENV_CONFIG_DIR,
        dirs::config_dir(),
    )
}

/// Returns the directory holding the episode media files.
///
/// `configured` is the `[catalog] media_dir` value from `settings.toml`.
pub fn get_media_dir(configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_overrides().and_then(|cli| cli.media_dir.clone()) {
        return Some(path);
    }
    if let Some(path) = configured {
        return Some(path.to_path_buf());
    }
    get_app_data_dir().map(|mut path| {
        path.push(DEFAULT_MEDIA_DIR_NAME);
        path
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Serializes tests that touch process-wide env vars
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn app_data_dir_contains_app_name() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::remove_var(ENV_DATA_DIR);

        if let Some(path) = get_app_data_dir() {
            assert!(path.to_string_lossy().contains(APP_NAME));
        }
    }

    #[test]
    fn app_config_dir_contains_app_name() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::remove_var(ENV_CONFIG_DIR);

        if let Some(path) = get_app_config_dir() {
            assert!(path.to_string_lossy().contains(APP_NAME));
        }
    }

    #[test]
    fn override_path_takes_precedence_over_env_var() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_DATA_DIR, "/env/path");

        let override_path = PathBuf::from("/override/path");
        let result = get_app_data_dir_with_override(Some(override_path.clone()));
        assert_eq!(result, Some(override_path));

        std::env::remove_var(ENV_DATA_DIR);
    }

    #[test]
    fn env_var_overrides_default_config_dir() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_CONFIG_DIR, "/test/config/dir");

        assert_eq!(
            get_app_config_dir(),
            Some(PathBuf::from("/test/config/dir"))
        );

        std::env::remove_var(ENV_CONFIG_DIR);
    }

    #[test]
    fn empty_env_var_uses_platform_default() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_DATA_DIR, "");

        if let Some(path) = get_app_data_dir() {
            assert!(path.to_string_lossy().contains(APP_NAME));
        }

        std::env::remove_var(ENV_DATA_DIR);
    }

    #[test]
    fn configured_media_dir_is_used() {
        let configured = PathBuf::from("/srv/episodes");
        assert_eq!(get_media_dir(Some(&configured)), Some(configured));
    }

    #[test]
    fn media_dir_defaults_below_data_dir() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_DATA_DIR, "/data/minerama");

        assert_eq!(
            get_media_dir(None),
            Some(PathBuf::from("/data/minerama").join(DEFAULT_MEDIA_DIR_NAME))
        );

        std::env::remove_var(ENV_DATA_DIR);
    }
}
