//! Application layer use cases for the launcher.
//!
//! Use cases here depend on the [`HostBridge`](manage_config::HostBridge)
//! abstraction rather than on the file system or the game process, so they
//! can be exercised entirely with in-memory doubles.
//!
//! # Sub-modules
//!
//! - **`manage_config`** – Loads, edits, persists and applies the launcher
//!   config, and derives the batch script from it.

pub mod manage_config;
