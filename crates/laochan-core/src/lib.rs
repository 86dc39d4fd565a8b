//! # laochan-core
//!
//! Shared model for the Laochan launcher: the persisted [`LauncherConfig`],
//! its tolerant on-disk form [`StoredConfig`], and the launch parameters
//! derived from it.
//!
//! This crate performs no I/O and has no async code.  Reading and writing the
//! config file, generating tokens and injecting parameters into the game
//! process all happen in `laochan-launcher` through its host bridge.
//!
//! # Modules
//!
//! - **`domain`** – The configuration record, its defaults, and the
//!   launcher/game [`VersionState`].
//!
//! - **`params`** – Turns a loaded config into the four `LAOCHAN_*`
//!   environment parameters and into the equivalent batch script.

pub mod domain;
pub mod params;

pub use domain::config::{
    LauncherConfig, StoredConfig, CONFIG_FILE_NAME, DEFAULT_ENABLE_CONSOLE,
    DEFAULT_ENABLE_STEAM_OVERLAY, DEFAULT_SERVER_URL,
};
pub use domain::version::VersionState;
pub use params::{launch_params, render_bat, ParamName};
