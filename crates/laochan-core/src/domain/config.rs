//! The launcher configuration record and its on-disk form.
//!
//! The launcher persists four values in `laochan-config.json`:
//!
//! ```json
//! {"token":"3f0c…","serverUrl":"http://laochan.ugreen.sbs/","enableConsole":false,"enableSteamOverlay":true}
//! ```
//!
//! Two types model this file:
//!
//! - [`StoredConfig`] mirrors whatever was actually found on disk.  Every
//!   field is optional because the file may have been written by an older
//!   launcher, edited by hand, or not exist at all.
//! - [`LauncherConfig`] is the record the rest of the launcher works with.
//!   All four fields are always populated.
//!
//! Filling the gaps between the two is the job of the config manager in
//! `laochan-launcher`, because generating a token needs the host bridge.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the persisted config file, relative to the host bridge's data directory.
pub const CONFIG_FILE_NAME: &str = "laochan-config.json";

/// Server URL used when none is configured.
pub const DEFAULT_SERVER_URL: &str = "http://laochan.ugreen.sbs/";

/// Whether the in-game console is enabled by default.
pub const DEFAULT_ENABLE_CONSOLE: bool = false;

/// Whether the Steam overlay is enabled by default.
pub const DEFAULT_ENABLE_STEAM_OVERLAY: bool = true;

// ── LauncherConfig ────────────────────────────────────────────────────────────

/// Fully populated launcher configuration.
///
/// Serializes to the exact JSON shape of `laochan-config.json`: camelCase
/// keys in the order `token`, `serverUrl`, `enableConsole`,
/// `enableSteamOverlay`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LauncherConfig {
    /// Opaque player token, a UUID string generated on first run.
    pub token: String,
    /// Base URL of the game server.
    pub server_url: String,
    /// Whether the game starts with its developer console enabled.
    pub enable_console: bool,
    /// Whether the Steam overlay is injected into the game.
    pub enable_steam_overlay: bool,
}

impl LauncherConfig {
    /// Builds a config from a stored record.
    ///
    /// Missing strings become empty and missing booleans take their defaults.
    /// Callers are expected to replace empty strings afterwards; see
    /// [`StoredConfig::lacks_token`] and [`StoredConfig::lacks_server_url`].
    pub fn from_stored(stored: StoredConfig) -> Self {
        Self {
            token: stored.token.unwrap_or_default(),
            server_url: stored.server_url.unwrap_or_default(),
            enable_console: stored.enable_console.unwrap_or(DEFAULT_ENABLE_CONSOLE),
            enable_steam_overlay: stored
                .enable_steam_overlay
                .unwrap_or(DEFAULT_ENABLE_STEAM_OVERLAY),
        }
    }

    /// Serializes the config as compact JSON, the format written to disk.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error.  With only strings and
    /// booleans involved this does not happen in practice.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ── StoredConfig ──────────────────────────────────────────────────────────────

/// The config record as read from disk, with every field optional.
///
/// Field types are not enforced: booleans follow JavaScript truthiness
/// (`1` is `true`, `0` and `""` are `false`) and numbers or `true` in a
/// string field are kept as their text.  Falsy scalars and JSON `null` count
/// as missing.  Unknown keys are ignored and therefore lost on the next save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredConfig {
    // `default` is required alongside `deserialize_with` for absent keys.
    #[serde(default, deserialize_with = "loose_string")]
    pub token: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub server_url: Option<String>,
    #[serde(default, deserialize_with = "loose_bool")]
    pub enable_console: Option<bool>,
    #[serde(default, deserialize_with = "loose_bool")]
    pub enable_steam_overlay: Option<bool>,
}

impl StoredConfig {
    /// Parses the contents of `laochan-config.json`.
    ///
    /// The top-level value must be a JSON object; `null`, arrays and scalars
    /// are rejected.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed or non-object input, or
    /// for an array or object where a string is expected.
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// `true` when the token is missing or empty and must be regenerated.
    pub fn lacks_token(&self) -> bool {
        self.token.as_deref().map_or(true, str::is_empty)
    }

    /// `true` when the server URL is missing or empty and must be reset.
    pub fn lacks_server_url(&self) -> bool {
        self.server_url.as_deref().map_or(true, str::is_empty)
    }
}

/// Truthiness of a JSON value, `None` for `null`.
fn loose_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Bool(b) => Some(b),
        Value::Number(n) => Some(n.as_f64().map_or(false, |f| f != 0.0 && !f.is_nan())),
        Value::String(s) => Some(!s.is_empty()),
        Value::Array(_) | Value::Object(_) => Some(true),
    })
}

/// Text of a scalar JSON value, `None` for `null` and falsy scalars.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Bool(true) => Ok(Some("true".to_string())),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(None),
        Value::Number(n) => Ok(Some(n.to_string())),
        other @ (Value::Array(_) | Value::Object(_)) => Err(de::Error::invalid_type(
            de::Unexpected::Other(if other.is_array() { "array" } else { "object" }),
            &"a string",
        )),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
