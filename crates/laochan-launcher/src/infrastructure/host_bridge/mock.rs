//! In-memory host bridge for tests.
//!
//! `RecordingHostBridge` keeps files in a `HashMap`, hands out scripted
//! UUIDs, and records every call in order so tests can assert exactly what
//! the config manager asked the host to do.
//!
//! # Usage in tests
//!
//! ```ignore
//! let bridge = Arc::new(RecordingHostBridge::new().with_uuids(["tok-1"]));
//! let mut manager = ConfigManager::new(bridge.clone());
//!
//! manager.load_config().await.unwrap();
//!
//! assert_eq!(bridge.writes().len(), 1);
//! ```
//!
//! # `should_fail` flag
//!
//! Set `should_fail = true` to make every call return
//! [`BridgeError::Rejected`] without being recorded.  `fail_writes` does the
//! same for `write_file` only, so loads succeed and saves fail.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::manage_config::{BridgeError, HostBridge};

/// One call made against the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeCall {
    Uuid,
    ReadFile(String),
    WriteFile { name: String, content: String },
    SetParam { name: String, value: String },
}

/// A host bridge that records all calls without touching the OS.
#[derive(Default)]
pub struct RecordingHostBridge {
    /// Current file contents by name.
    pub files: Mutex<HashMap<String, String>>,
    /// Every successful call, in order.
    pub calls: Mutex<Vec<BridgeCall>>,
    /// UUIDs returned by `uuid`, front first.  Once empty, `uuid-<n>` is
    /// generated from the call count.
    pub uuids: Mutex<VecDeque<String>>,
    /// When `true`, every method immediately returns an error.
    pub should_fail: bool,
    /// When `true`, `write_file` returns an error and stores nothing.
    pub fail_writes: bool,
}

impl RecordingHostBridge {
    /// Creates a bridge with no files, no scripted UUIDs and `should_fail = false`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a file.
    pub fn with_file(self, name: &str, content: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(name.to_string(), content.to_string());
        self
    }

    /// Scripts the values returned by successive `uuid` calls.
    pub fn with_uuids<I, S>(self, uuids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.uuids
            .lock()
            .unwrap()
            .extend(uuids.into_iter().map(Into::into));
        self
    }

    /// Snapshot of all recorded calls.
    pub fn calls(&self) -> Vec<BridgeCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The `(name, content)` of every write, in order.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BridgeCall::WriteFile { name, content } => Some((name, content)),
                _ => None,
            })
            .collect()
    }

    /// The `(name, value)` of every `set_param`, in order.
    pub fn params(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BridgeCall::SetParam { name, value } => Some((name, value)),
                _ => None,
            })
            .collect()
    }

    /// Current content of a file.
    pub fn file(&self, name: &str) -> Option<String> {
        self.files.lock().unwrap().get(name).cloned()
    }

    fn check(&self) -> Result<(), BridgeError> {
        if self.should_fail {
            return Err(BridgeError::Rejected("mock failure".into()));
        }
        Ok(())
    }

    fn record(&self, call: BridgeCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl HostBridge for RecordingHostBridge {
    async fn uuid(&self) -> Result<String, BridgeError> {
        self.check()?;
        let generated = self.calls().iter().filter(|c| **c == BridgeCall::Uuid).count();
        let id = self
            .uuids
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| format!("uuid-{generated}"));
        self.record(BridgeCall::Uuid);
        Ok(id)
    }

    async fn read_file(&self, name: &str) -> Result<Option<String>, BridgeError> {
        self.check()?;
        self.record(BridgeCall::ReadFile(name.to_string()));
        Ok(self.file(name))
    }

    async fn write_file(&self, name: &str, content: &str) -> Result<(), BridgeError> {
        self.check()?;
        if self.fail_writes {
            return Err(BridgeError::Rejected("mock write failure".into()));
        }
        self.files
            .lock()
            .unwrap()
            .insert(name.to_string(), content.to_string());
        self.record(BridgeCall::WriteFile {
            name: name.to_string(),
            content: content.to_string(),
        });
        Ok(())
    }

    async fn set_param(&self, name: &str, value: &str) -> Result<(), BridgeError> {
        self.check()?;
        self.record(BridgeCall::SetParam {
            name: name.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }
}
