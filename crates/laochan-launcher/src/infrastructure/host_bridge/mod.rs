//! Host bridge implementations.
//!
//! [`FsHostBridge`] is the native bridge used by the launcher binary:
//!
//! - files are plain UTF-8 files inside a single data directory,
//! - tokens are random v4 UUIDs,
//! - parameters are collected in a table that is handed to the game process
//!   as environment variables when it is spawned (see
//!   [`game_process`](crate::infrastructure::game_process)).
//!
//! The [`mock`] sub-module provides an in-memory bridge for tests.

pub mod mock;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::application::manage_config::{BridgeError, HostBridge};

/// Host bridge backed by the local file system.
pub struct FsHostBridge {
    data_dir: PathBuf,
    /// Parameters in the order they were first set.
    params: Mutex<Vec<(String, String)>>,
}

impl FsHostBridge {
    /// Creates a bridge that keeps its files in `data_dir`.
    ///
    /// The directory is created on the first write, not here.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            params: Mutex::new(Vec::new()),
        }
    }

    /// The directory files are read from and written to.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Snapshot of every parameter set so far.
    pub fn params(&self) -> Vec<(String, String)> {
        self.params
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Maps a bare file name to a path inside the data directory.
    fn resolve(&self, name: &str) -> Result<PathBuf, BridgeError> {
        let escapes = name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\'])
            || name.contains('\0');
        if escapes {
            return Err(BridgeError::InvalidName(name.to_string()));
        }
        Ok(self.data_dir.join(name))
    }
}

#[async_trait]
impl HostBridge for FsHostBridge {
    async fn uuid(&self) -> Result<String, BridgeError> {
        Ok(Uuid::new_v4().to_string())
    }

    async fn read_file(&self, name: &str) -> Result<Option<String>, BridgeError> {
        let path = self.resolve(name)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                debug!("read {} bytes from {}", content.len(), path.display());
                Ok(Some(content))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(BridgeError::Io { path, source }),
        }
    }

    async fn write_file(&self, name: &str, content: &str) -> Result<(), BridgeError> {
        let path = self.resolve(name)?;

        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|source| BridgeError::Io {
                path: self.data_dir.clone(),
                source,
            })?;

        tokio::fs::write(&path, content)
            .await
            .map_err(|source| BridgeError::Io {
                path: path.clone(),
                source,
            })?;
        debug!("wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }

    async fn set_param(&self, name: &str, value: &str) -> Result<(), BridgeError> {
        // Environment variable names may not be empty or contain '=' or NUL;
        // values may not contain NUL.
        if name.is_empty() || name.contains(['=', '\0']) || value.contains('\0') {
            return Err(BridgeError::Rejected(format!(
                "invalid environment parameter {name:?}"
            )));
        }

        let mut params = self.params.lock().unwrap_or_else(PoisonError::into_inner);
        match params.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => params.push((name.to_string(), value.to_string())),
        }
        debug!("set parameter {name}");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
