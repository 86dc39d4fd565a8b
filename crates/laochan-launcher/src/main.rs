//! Laochan launcher entry point.
//!
//! Loads `launcher.toml`, builds the file-system host bridge and the
//! [`ConfigManager`], then runs one command against the player config.
//!
//! # Usage
//!
//! ```text
//! laochan-launcher [--config-dir <DIR>] <COMMAND>
//!
//! Commands:
//!   init                 Write a default launcher.toml and laochan-config.json
//!   show                 Print the current config as JSON
//!   reset-token          Generate a new player token
//!   reset-server-url     Restore the default server URL
//!   reset-console        Disable the in-game console
//!   reset-steam-overlay  Re-enable the Steam overlay
//!   set                  Change individual values
//!   export-bat           Print or write the batch script
//!   launch               Start the game with the launch parameters
//! ```
//!
//! | Variable             | Description                               |
//! |----------------------|-------------------------------------------|
//! | `LAOCHAN_CONFIG_DIR` | Overrides the platform config directory   |
//! | `RUST_LOG`           | Overrides `log_level` from launcher.toml  |

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use laochan_launcher::application::manage_config::ConfigManager;
use laochan_launcher::infrastructure::game_process::launch_game;
use laochan_launcher::infrastructure::host_bridge::FsHostBridge;
use laochan_launcher::infrastructure::storage::settings::{
    config_dir, init_settings, load_settings, SETTINGS_FILE_NAME,
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Laochan game launcher.
#[derive(Debug, Parser)]
#[command(
    name = "laochan-launcher",
    about = "Manage the Laochan launcher config and start the game",
    version
)]
struct Cli {
    /// Directory holding launcher.toml (and laochan-config.json unless
    /// launcher.toml sets data_dir).
    #[arg(long, env = "LAOCHAN_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Write a default launcher.toml unless one exists.
    Init {
        /// Replace an existing launcher.toml.
        #[arg(long)]
        force: bool,
    },
    /// Print the current config as JSON.
    Show,
    /// Generate a new player token.
    ResetToken,
    /// Restore the default server URL.
    ResetServerUrl,
    /// Disable the in-game console.
    ResetConsole,
    /// Re-enable the Steam overlay.
    ResetSteamOverlay,
    /// Change individual values.
    Set {
        #[arg(long)]
        server_url: Option<String>,
        #[arg(long)]
        console: Option<bool>,
        #[arg(long)]
        steam_overlay: Option<bool>,
    },
    /// Print the batch script, or write it to a file.
    ExportBat {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Apply the launch parameters and start the game.
    Launch,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg_dir = match cli.config_dir {
        Some(dir) => dir,
        None => config_dir().context("resolving launcher config directory")?,
    };
    let settings = load_settings(&cfg_dir)
        .with_context(|| format!("loading launcher settings from {}", cfg_dir.display()))?;

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let bridge = Arc::new(FsHostBridge::new(settings.resolve_data_dir(&cfg_dir)));
    info!("using data directory {}", bridge.data_dir().display());

    let mut manager = ConfigManager::new(bridge.clone());
    manager.load_config().await.context("loading launcher config")?;

    let show = matches!(cli.command, Cmd::Show);
    let mutated = match cli.command {
        Cmd::Init { force } => {
            let path = cfg_dir.join(SETTINGS_FILE_NAME);
            if init_settings(&cfg_dir, force)
                .with_context(|| format!("writing {}", path.display()))?
            {
                info!("wrote {}", path.display());
            } else {
                info!("{} already exists, use --force to replace it", path.display());
            }
            false
        }
        Cmd::Show => false,
        Cmd::ResetToken => {
            manager.reset_token().await?;
            true
        }
        Cmd::ResetServerUrl => {
            manager.reset_server_url()?;
            true
        }
        Cmd::ResetConsole => {
            manager.reset_enable_console()?;
            true
        }
        Cmd::ResetSteamOverlay => {
            manager.reset_enable_steam_overlay()?;
            true
        }
        Cmd::Set {
            server_url,
            console,
            steam_overlay,
        } => {
            if let Some(url) = server_url {
                manager.set_server_url(url)?;
            }
            if let Some(enabled) = console {
                manager.set_enable_console(enabled)?;
            }
            if let Some(enabled) = steam_overlay {
                manager.set_enable_steam_overlay(enabled)?;
            }
            manager.is_dirty()
        }
        Cmd::ExportBat { output } => {
            let bat = manager
                .export_bat_params()
                .context("launcher config is not loaded")?;
            match output {
                Some(path) => {
                    // cmd.exe expects CRLF line endings.
                    tokio::fs::write(&path, bat.replace('\n', "\r\n"))
                        .await
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!("wrote {}", path.display());
                }
                None => println!("{bat}"),
            }
            false
        }
        Cmd::Launch => {
            manager.apply_config().await.context("applying launch parameters")?;
            let mut child = launch_game(
                settings.game.executable.as_deref(),
                &settings.game.args,
                &bridge.params(),
            )?;
            let status = child.wait().await.context("waiting for the game")?;
            info!("game exited with {status}");
            false
        }
    };

    if mutated {
        manager.save_config().await.context("saving launcher config")?;
    }

    if show || mutated {
        if let Some(config) = manager.config() {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
    }

    Ok(())
}
