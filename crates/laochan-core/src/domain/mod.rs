//! Domain types for the launcher configuration.
//!
//! - **`config`** – [`LauncherConfig`](config::LauncherConfig), the fully
//!   populated record the launcher works with, and
//!   [`StoredConfig`](config::StoredConfig), the same record as found on disk
//!   where any field may be missing.
//!
//! - **`version`** – [`VersionState`](version::VersionState), the outcome of
//!   comparing installed launcher/game versions against the server.

pub mod config;
pub mod version;
