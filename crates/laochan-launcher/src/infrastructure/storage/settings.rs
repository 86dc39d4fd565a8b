//! TOML-based settings for the launcher itself.
//!
//! Reads `LauncherSettings` from the platform-appropriate settings file:
//! - Windows:  `%APPDATA%\Laochan\launcher.toml`
//! - Linux:    `~/.config/laochan/launcher.toml`
//! - macOS:    `~/Library/Application Support/Laochan/launcher.toml`
//!
//! Example:
//!
//! ```toml
//! log_level = "debug"
//! data_dir = "D:\\Games\\Laochan"
//!
//! [game]
//! executable = "D:\\Games\\Laochan\\game.exe"
//! args = ["-windowed"]
//! ```
//!
//! Every key is optional.  `data_dir` is where the host bridge keeps
//! `laochan-config.json`; it defaults to the settings directory itself.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the settings file inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "launcher.toml";

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The settings could not be serialized to TOML.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Settings schema types ─────────────────────────────────────────────────────

/// Top-level launcher settings stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LauncherSettings {
    /// `tracing` log level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Override for the host bridge data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// How to start the game.
    #[serde(default)]
    pub game: GameSettings,
}

/// Game executable and its command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GameSettings {
    /// Path to the game executable.  Required for `launch`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<PathBuf>,
    /// Extra arguments passed to the game.
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            data_dir: None,
            game: GameSettings::default(),
        }
    }
}

impl LauncherSettings {
    /// Directory the host bridge should use, given the directory the settings
    /// were loaded from.
    pub fn resolve_data_dir(&self, config_dir: &Path) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| config_dir.to_path_buf())
    }
}

// ── Settings repository ───────────────────────────────────────────────────────

/// Determines the platform-appropriate config directory.
///
/// # Errors
///
/// Returns [`SettingsError::NoPlatformConfigDir`] when the platform config
/// base directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, SettingsError> {
    platform_config_dir().ok_or(SettingsError::NoPlatformConfigDir)
}

/// Loads `launcher.toml` from `dir`, returning defaults if it does not exist.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] for file-system errors other than "not
/// found", and [`SettingsError::Parse`] if the TOML is malformed.
pub fn load_settings(dir: &Path) -> Result<LauncherSettings, SettingsError> {
    let path = dir.join(SETTINGS_FILE_NAME);

    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(LauncherSettings::default()),
        Err(e) => Err(SettingsError::Io { path, source: e }),
    }
}

/// Persists `settings` as `launcher.toml` in `dir`, creating `dir` if needed.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] for file-system failures or
/// [`SettingsError::Serialize`] if serialization fails.
pub fn save_settings(dir: &Path, settings: &LauncherSettings) -> Result<(), SettingsError> {
    std::fs::create_dir_all(dir).map_err(|source| SettingsError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(SETTINGS_FILE_NAME);
    let content = toml::to_string_pretty(settings)?;
    std::fs::write(&path, content).map_err(|source| SettingsError::Io { path, source })?;
    Ok(())
}

/// Writes a default `launcher.toml` to `dir` unless one already exists.
///
/// With `force` an existing file is replaced.  Returns `true` if a file was
/// written.
///
/// # Errors
///
/// Same as [`save_settings`].
pub fn init_settings(dir: &Path, force: bool) -> Result<bool, SettingsError> {
    if !force && dir.join(SETTINGS_FILE_NAME).exists() {
        return Ok(false);
    }
    save_settings(dir, &LauncherSettings::default())?;
    Ok(true)
}

/// Resolves the platform config base directory including the `Laochan` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("Laochan"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("laochan"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("Laochan")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
