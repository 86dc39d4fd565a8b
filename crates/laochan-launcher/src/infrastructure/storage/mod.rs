//! Storage infrastructure: the launcher's own settings file.
//!
//! The `settings` sub-module reads `launcher.toml` from the platform config
//! directory and resolves where the host bridge keeps its data files.  The
//! player-facing `laochan-config.json` is not handled here; it goes through
//! the host bridge.

pub mod settings;
