//! ConfigManager: loads, edits, persists and applies the launcher config.
//!
//! The manager owns the single in-memory [`LauncherConfig`] and a dirty flag.
//! It performs no I/O itself; every file access, token generation and
//! parameter injection goes through a [`HostBridge`] injected at
//! construction time.  The native bridge lives in
//! `infrastructure::host_bridge`; tests supply recording doubles.
//!
//! Front-ends observe the config through [`ConfigManager::subscribe`], a
//! `tokio::sync::watch` channel that receives every change.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use laochan_core::{
    launch_params, render_bat, LauncherConfig, StoredConfig, CONFIG_FILE_NAME,
    DEFAULT_ENABLE_CONSOLE, DEFAULT_ENABLE_STEAM_OVERLAY, DEFAULT_SERVER_URL,
};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Error type for host bridge operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file name would escape the bridge's data directory.
    #[error("invalid file name {0:?}")]
    InvalidName(String),

    /// The host refused the call.
    #[error("host bridge rejected the call: {0}")]
    Rejected(String),
}

/// Error type for config manager operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The operation needs a config, but `load_config` has not run yet.
    #[error("launcher config has not been loaded")]
    NotLoaded,

    /// The persisted file is not a valid config object.
    #[error("failed to parse laochan-config.json: {0}")]
    Parse(#[source] serde_json::Error),

    /// The config could not be serialized.
    #[error("failed to serialize launcher config: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A host bridge call failed.
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

/// The host runtime surface the launcher depends on.
///
/// Implementations decide where files live, how tokens are generated and
/// how parameters reach the game process.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostBridge: Send + Sync {
    /// Generates a fresh unique identifier.
    async fn uuid(&self) -> Result<String, BridgeError>;

    /// Reads a text file, returning `None` if it does not exist.
    async fn read_file(&self, name: &str) -> Result<Option<String>, BridgeError>;

    /// Writes a text file, replacing any previous content.
    async fn write_file(&self, name: &str, content: &str) -> Result<(), BridgeError>;

    /// Sets a parameter on the game process environment.
    async fn set_param(&self, name: &str, value: &str) -> Result<(), BridgeError>;
}

/// The config management use case.
pub struct ConfigManager {
    bridge: Arc<dyn HostBridge>,
    config: Option<LauncherConfig>,
    dirty: bool,
    changes: watch::Sender<Option<LauncherConfig>>,
}

impl ConfigManager {
    /// Creates a manager with no config loaded.
    pub fn new(bridge: Arc<dyn HostBridge>) -> Self {
        let (changes, _) = watch::channel(None);
        Self {
            bridge,
            config: None,
            dirty: false,
            changes,
        }
    }

    /// The current config, or `None` before the first load.
    pub fn config(&self) -> Option<&LauncherConfig> {
        self.config.as_ref()
    }

    /// `true` when the in-memory config differs from the last write.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Subscribes to config changes.
    ///
    /// The receiver starts with the current value and is notified after every
    /// load, reset and edit.
    pub fn subscribe(&self) -> watch::Receiver<Option<LauncherConfig>> {
        self.changes.subscribe()
    }

    // ── Resets ────────────────────────────────────────────────────────────────

    /// Replaces the token with a fresh UUID from the host bridge.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotLoaded`] before the first load, or
    /// [`ConfigError::Bridge`] if UUID generation fails.
    pub async fn reset_token(&mut self) -> Result<(), ConfigError> {
        self.loaded()?;
        let token = self.bridge.uuid().await?;
        self.loaded_mut()?.token = token;
        self.mark_dirty();
        Ok(())
    }

    /// Restores the default server URL.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotLoaded`] before the first load.
    pub fn reset_server_url(&mut self) -> Result<(), ConfigError> {
        self.set_server_url(DEFAULT_SERVER_URL)
    }

    /// Disables the in-game console.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotLoaded`] before the first load.
    pub fn reset_enable_console(&mut self) -> Result<(), ConfigError> {
        self.set_enable_console(DEFAULT_ENABLE_CONSOLE)
    }

    /// Re-enables the Steam overlay.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotLoaded`] before the first load.
    pub fn reset_enable_steam_overlay(&mut self) -> Result<(), ConfigError> {
        self.set_enable_steam_overlay(DEFAULT_ENABLE_STEAM_OVERLAY)
    }

    // ── Edits ─────────────────────────────────────────────────────────────────

    /// Sets the server URL.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotLoaded`] before the first load.
    pub fn set_server_url(&mut self, url: impl Into<String>) -> Result<(), ConfigError> {
        self.loaded_mut()?.server_url = url.into();
        self.mark_dirty();
        Ok(())
    }

    /// Enables or disables the in-game console.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotLoaded`] before the first load.
    pub fn set_enable_console(&mut self, enabled: bool) -> Result<(), ConfigError> {
        self.loaded_mut()?.enable_console = enabled;
        self.mark_dirty();
        Ok(())
    }

    /// Enables or disables the Steam overlay.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotLoaded`] before the first load.
    pub fn set_enable_steam_overlay(&mut self, enabled: bool) -> Result<(), ConfigError> {
        self.loaded_mut()?.enable_steam_overlay = enabled;
        self.mark_dirty();
        Ok(())
    }

    // ── Persistence ───────────────────────────────────────────────────────────

    /// Writes the whole config to `laochan-config.json` and clears the dirty flag.
    ///
    /// The flag stays set if the write fails.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotLoaded`], [`ConfigError::Serialize`], or the bridge's
    /// write error unchanged inside [`ConfigError::Bridge`].
    pub async fn save_config(&mut self) -> Result<(), ConfigError> {
        let json = self.loaded()?.to_json().map_err(ConfigError::Serialize)?;
        self.bridge.write_file(CONFIG_FILE_NAME, &json).await?;
        self.dirty = false;
        info!("saved {CONFIG_FILE_NAME}");
        Ok(())
    }

    /// Reads `laochan-config.json`, fills in missing values and saves if any
    /// value had to be generated.
    ///
    /// An absent or empty file starts from an empty record.  A missing or
    /// empty token is regenerated and a missing or empty server URL is reset,
    /// both marking the config dirty.  Missing booleans take their defaults
    /// in memory but do not mark the config dirty, so they alone never cause
    /// a save.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed content; bridge failures from the
    /// read, the token generation or the follow-up save.  A failed read or
    /// token generation leaves the previous config in place.
    pub async fn load_config(&mut self) -> Result<(), ConfigError> {
        let content = self.bridge.read_file(CONFIG_FILE_NAME).await?;
        let stored = match content.as_deref() {
            Some(text) if !text.is_empty() => StoredConfig::parse(text).map_err(ConfigError::Parse)?,
            _ => {
                debug!("{CONFIG_FILE_NAME} absent, starting from an empty record");
                StoredConfig::default()
            }
        };

        let lacks_token = stored.lacks_token();
        let lacks_server_url = stored.lacks_server_url();
        let mut loaded = LauncherConfig::from_stored(stored);

        if lacks_token {
            warn!("no player token configured, generating a new one");
            loaded.token = self.bridge.uuid().await?;
        }
        if lacks_server_url {
            warn!("no server URL configured, using {DEFAULT_SERVER_URL}");
            loaded.server_url = DEFAULT_SERVER_URL.to_string();
        }

        self.config = Some(loaded);
        if lacks_token || lacks_server_url {
            self.dirty = true;
        }
        self.publish();

        if self.dirty {
            self.save_config().await?;
        }
        info!("loaded launcher config");
        Ok(())
    }

    // ── Derived outputs ───────────────────────────────────────────────────────

    /// Pushes the four launch parameters to the host bridge, one at a time.
    ///
    /// Does nothing before the first load.  The first failing call aborts the
    /// remaining ones.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Bridge`] if a `set_param` call fails.
    pub async fn apply_config(&self) -> Result<(), ConfigError> {
        let Some(config) = self.config.as_ref() else {
            debug!("apply_config called before load, nothing to apply");
            return Ok(());
        };

        for (name, value) in launch_params(config) {
            self.bridge.set_param(name.as_str(), &value).await?;
        }
        info!("applied launch parameters");
        Ok(())
    }

    /// Renders the config as a batch script, or `None` before the first load.
    pub fn export_bat_params(&self) -> Option<String> {
        self.config.as_ref().map(render_bat)
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn loaded(&self) -> Result<&LauncherConfig, ConfigError> {
        self.config.as_ref().ok_or(ConfigError::NotLoaded)
    }

    fn loaded_mut(&mut self) -> Result<&mut LauncherConfig, ConfigError> {
        self.config.as_mut().ok_or(ConfigError::NotLoaded)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
        self.publish();
    }

    fn publish(&self) {
        self.changes.send_replace(self.config.clone());
    }
}
