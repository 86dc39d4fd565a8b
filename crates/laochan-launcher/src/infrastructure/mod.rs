//! Infrastructure layer for the launcher.
//!
//! Contains OS-facing adapters: the file-system host bridge, the launcher's
//! own settings file, and spawning the game process.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `laochan_core`, but MUST NOT be imported by the `application` layer.

pub mod game_process;
pub mod host_bridge;
pub mod storage;
