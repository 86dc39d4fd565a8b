//! Launch parameters derived from a [`LauncherConfig`].
//!
//! The game reads its settings from four environment variables.  The
//! launcher can deliver them in two ways:
//!
//! - **Live injection** – [`launch_params`] yields the name/value pairs that
//!   the host bridge sets on the game process, one after another.
//! - **Batch script** – [`render_bat`] produces a `SET`-statement script for
//!   setups that start the game from a `.bat` file instead.
//!
//! Booleans are rendered as `0`/`1` in both forms.  Strings are passed
//! through verbatim; the batch form wraps them in double quotes without any
//! escaping.

use std::fmt;

use crate::domain::config::LauncherConfig;

/// The environment variables understood by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamName {
    Token,
    ServerUrl,
    EnableConsole,
    EnableSteamOverlay,
}

impl ParamName {
    /// All parameters in the order they are applied.
    pub const ALL: [ParamName; 4] = [
        ParamName::Token,
        ParamName::ServerUrl,
        ParamName::EnableConsole,
        ParamName::EnableSteamOverlay,
    ];

    /// The environment variable name.
    pub const fn as_str(self) -> &'static str {
        match self {
            ParamName::Token => "LAOCHAN_TOKEN",
            ParamName::ServerUrl => "LAOCHAN_SERVER_URL",
            ParamName::EnableConsole => "LAOCHAN_ENABLE_CONSOLE",
            ParamName::EnableSteamOverlay => "LAOCHAN_ENABLE_STEAM_OVERLAY",
        }
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders a boolean the way the game expects it.
fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// Returns the four launch parameters for `config`, in application order.
pub fn launch_params(config: &LauncherConfig) -> [(ParamName, String); 4] {
    [
        (ParamName::Token, config.token.clone()),
        (ParamName::ServerUrl, config.server_url.clone()),
        (ParamName::EnableConsole, flag(config.enable_console).to_string()),
        (
            ParamName::EnableSteamOverlay,
            flag(config.enable_steam_overlay).to_string(),
        ),
    ]
}

/// Renders `config` as a Windows batch snippet.
///
/// The result has no trailing newline:
///
/// ```text
/// REM Laochan Launcher Params
/// SET LAOCHAN_TOKEN="<token>"
/// SET LAOCHAN_SERVER_URL="<server url>"
/// SET LAOCHAN_ENABLE_CONSOLE=0
/// SET LAOCHAN_ENABLE_STEAM_OVERLAY=1
/// ```
pub fn render_bat(config: &LauncherConfig) -> String {
    [
        "REM Laochan Launcher Params".to_string(),
        format!("SET {}=\"{}\"", ParamName::Token, config.token),
        format!("SET {}=\"{}\"", ParamName::ServerUrl, config.server_url),
        format!(
            "SET {}={}",
            ParamName::EnableConsole,
            flag(config.enable_console)
        ),
        format!(
            "SET {}={}",
            ParamName::EnableSteamOverlay,
            flag(config.enable_steam_overlay)
        ),
    ]
    .join("\n")
}
