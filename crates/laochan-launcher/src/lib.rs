//! laochan-launcher library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! The launcher keeps a small JSON config (player token, server URL, console
//! and Steam overlay switches), hands it to the game as `LAOCHAN_*`
//! environment parameters, and can export the same values as a batch script
//! for setups that start the game from a `.bat` file.

/// Application layer: config management use case and the host bridge trait.
pub mod application;

/// Infrastructure layer: native host bridge, settings storage, game process.
pub mod infrastructure;
