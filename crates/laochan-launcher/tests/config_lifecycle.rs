//! Integration tests for the config manager lifecycle.
//!
//! These drive `ConfigManager` through its public API the way the launcher
//! binary does, against both the in-memory `RecordingHostBridge` and the
//! real `FsHostBridge` on a temporary directory.  They cover:
//!
//! - first run: no file, every default filled in, exactly one save,
//! - a failed first-run save keeping the config dirty,
//! - steady state: a complete file loads unchanged with no save,
//! - token regeneration surviving a save/load cycle,
//! - parameter injection and batch export from the loaded values.

use std::sync::Arc;

use laochan_launcher::application::manage_config::{ConfigError, ConfigManager};
use laochan_launcher::infrastructure::host_bridge::mock::{BridgeCall, RecordingHostBridge};
use laochan_launcher::infrastructure::host_bridge::FsHostBridge;
use uuid::Uuid;

const CONFIG_FILE: &str = "laochan-config.json";

// ── First run ─────────────────────────────────────────────────────────────────

/// With no persisted file, loading produces the documented defaults and
/// writes them exactly once, with exactly that JSON.
#[tokio::test]
async fn test_first_run_writes_defaults_once() {
    // Arrange
    let bridge = Arc::new(
        RecordingHostBridge::new().with_uuids(["9a1f6c1e-0000-4000-8000-000000000001"]),
    );
    let mut manager = ConfigManager::new(bridge.clone());

    // Act
    manager.load_config().await.expect("load");

    // Assert
    let expected = r#"{"token":"9a1f6c1e-0000-4000-8000-000000000001","serverUrl":"http://laochan.ugreen.sbs/","enableConsole":false,"enableSteamOverlay":true}"#;
    assert_eq!(
        bridge.writes(),
        vec![(CONFIG_FILE.to_string(), expected.to_string())]
    );
    assert_eq!(
        bridge.calls(),
        vec![
            BridgeCall::ReadFile(CONFIG_FILE.to_string()),
            BridgeCall::Uuid,
            BridgeCall::WriteFile {
                name: CONFIG_FILE.to_string(),
                content: expected.to_string()
            },
        ]
    );
    assert!(!manager.is_dirty());
}

/// An empty file is treated like a missing one.
#[tokio::test]
async fn test_empty_file_is_treated_as_first_run() {
    let bridge = Arc::new(RecordingHostBridge::new().with_file(CONFIG_FILE, ""));
    let mut manager = ConfigManager::new(bridge.clone());

    manager.load_config().await.expect("load");

    assert_eq!(manager.config().unwrap().token, "uuid-0");
    assert_eq!(bridge.writes().len(), 1);
}

/// The first-run save fails: the error surfaces, the generated values stay
/// in memory and remain dirty so a later save can retry.
#[tokio::test]
async fn test_first_run_save_failure_keeps_config_dirty() {
    // Arrange
    let bridge = Arc::new(RecordingHostBridge {
        fail_writes: true,
        ..RecordingHostBridge::new().with_uuids(["tok-unsaved"])
    });
    let mut manager = ConfigManager::new(bridge.clone());

    // Act
    let result = manager.load_config().await;

    // Assert
    assert!(matches!(result, Err(ConfigError::Bridge(_))));
    assert!(manager.is_dirty());
    let cfg = manager.config().expect("populated despite the failed save");
    assert_eq!(cfg.token, "tok-unsaved");
    assert_eq!(cfg.server_url, "http://laochan.ugreen.sbs/");
    assert!(bridge.file(CONFIG_FILE).is_none());
}

// ── Steady state ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_complete_file_loads_unchanged_without_save() {
    // Arrange
    let json = r#"{"token":"t-42","serverUrl":"http://mirror.example/","enableConsole":true,"enableSteamOverlay":false}"#;
    let bridge = Arc::new(RecordingHostBridge::new().with_file(CONFIG_FILE, json));
    let mut manager = ConfigManager::new(bridge.clone());

    // Act
    manager.load_config().await.expect("load");

    // Assert
    let cfg = manager.config().unwrap();
    assert_eq!(cfg.token, "t-42");
    assert_eq!(cfg.server_url, "http://mirror.example/");
    assert!(cfg.enable_console);
    assert!(!cfg.enable_steam_overlay);
    assert!(bridge.writes().is_empty());
    assert_eq!(bridge.file(CONFIG_FILE).as_deref(), Some(json));
}

/// Only the server URL is missing: it is reset and saved, the token is kept.
#[tokio::test]
async fn test_missing_server_url_is_reset_and_saved() {
    let bridge = Arc::new(
        RecordingHostBridge::new().with_file(CONFIG_FILE, r#"{"token":"keep-me"}"#),
    );
    let mut manager = ConfigManager::new(bridge.clone());

    manager.load_config().await.expect("load");

    assert!(!bridge.calls().contains(&BridgeCall::Uuid));
    let saved = bridge.file(CONFIG_FILE).unwrap();
    assert_eq!(
        saved,
        r#"{"token":"keep-me","serverUrl":"http://laochan.ugreen.sbs/","enableConsole":false,"enableSteamOverlay":true}"#
    );
}

#[tokio::test]
async fn test_malformed_file_is_reported_and_left_alone() {
    let bridge = Arc::new(RecordingHostBridge::new().with_file(CONFIG_FILE, "[1, 2"));
    let mut manager = ConfigManager::new(bridge.clone());

    let result = manager.load_config().await;

    assert!(matches!(result, Err(ConfigError::Parse(_))));
    assert!(manager.config().is_none());
    assert_eq!(bridge.file(CONFIG_FILE).as_deref(), Some("[1, 2"));
}

/// Flags stored as `0`/`1` by other tools load by truthiness.
#[tokio::test]
async fn test_numeric_flags_load_by_truthiness() {
    let json = r#"{"token":"t","serverUrl":"u","enableConsole":1,"enableSteamOverlay":0}"#;
    let bridge = Arc::new(RecordingHostBridge::new().with_file(CONFIG_FILE, json));
    let mut manager = ConfigManager::new(bridge.clone());

    manager.load_config().await.expect("load");

    let cfg = manager.config().unwrap();
    assert!(cfg.enable_console);
    assert!(!cfg.enable_steam_overlay);
    assert!(bridge.writes().is_empty());
}

// ── Token round-trip ──────────────────────────────────────────────────────────

/// `reset_token` → `save_config` → `load_config` preserves the new token.
#[tokio::test]
async fn test_reset_token_round_trips_through_save_and_load() {
    // Arrange
    let bridge = Arc::new(RecordingHostBridge::new().with_uuids(["first", "second"]));
    let mut manager = ConfigManager::new(bridge.clone());
    manager.load_config().await.unwrap();

    // Act
    manager.reset_token().await.unwrap();
    assert!(manager.is_dirty());
    manager.save_config().await.unwrap();

    let mut reloaded = ConfigManager::new(bridge.clone());
    reloaded.load_config().await.unwrap();

    // Assert
    assert_eq!(reloaded.config().unwrap().token, "second");
    assert_eq!(reloaded.config(), manager.config());
    // first-run save + explicit save; the reload wrote nothing
    assert_eq!(bridge.writes().len(), 2);
}

/// Same round-trip against the real file system bridge.
#[tokio::test]
async fn test_fs_bridge_round_trip() {
    // Arrange
    let dir = std::env::temp_dir().join(format!("laochan_it_{}", Uuid::new_v4()));
    let bridge = Arc::new(FsHostBridge::new(&dir));
    let mut manager = ConfigManager::new(bridge.clone());

    // Act: first run creates the file
    manager.load_config().await.expect("first load");
    let first_token = manager.config().unwrap().token.clone();
    manager.reset_token().await.unwrap();
    manager.set_enable_console(true).unwrap();
    manager.save_config().await.unwrap();

    let mut reloaded = ConfigManager::new(Arc::new(FsHostBridge::new(&dir)));
    reloaded.load_config().await.expect("second load");

    // Assert
    let cfg = reloaded.config().unwrap();
    assert_ne!(cfg.token, first_token);
    assert_eq!(Some(cfg), manager.config());
    assert!(cfg.enable_console);
    assert!(dir.join(CONFIG_FILE).is_file());

    // Cleanup
    std::fs::remove_dir_all(&dir).ok();
}

// ── Derived outputs ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_apply_before_load_touches_nothing() {
    let bridge = Arc::new(RecordingHostBridge::new());
    let manager = ConfigManager::new(bridge.clone());

    manager.apply_config().await.expect("no-op");

    assert!(bridge.calls().is_empty());
    assert!(manager.export_bat_params().is_none());
}

#[tokio::test]
async fn test_apply_and_export_reflect_current_values() {
    // Arrange
    let bridge = Arc::new(RecordingHostBridge::new().with_uuids(["tok"]));
    let mut manager = ConfigManager::new(bridge.clone());
    manager.load_config().await.unwrap();
    manager.set_enable_console(true).unwrap();
    manager.set_enable_steam_overlay(false).unwrap();

    // Act
    manager.apply_config().await.expect("apply");
    let bat = manager.export_bat_params().expect("loaded");

    // Assert
    assert_eq!(
        bridge.params(),
        vec![
            ("LAOCHAN_TOKEN".to_string(), "tok".to_string()),
            (
                "LAOCHAN_SERVER_URL".to_string(),
                "http://laochan.ugreen.sbs/".to_string()
            ),
            ("LAOCHAN_ENABLE_CONSOLE".to_string(), "1".to_string()),
            ("LAOCHAN_ENABLE_STEAM_OVERLAY".to_string(), "0".to_string()),
        ]
    );
    assert_eq!(
        bat,
        "REM Laochan Launcher Params\n\
         SET LAOCHAN_TOKEN=\"tok\"\n\
         SET LAOCHAN_SERVER_URL=\"http://laochan.ugreen.sbs/\"\n\
         SET LAOCHAN_ENABLE_CONSOLE=1\n\
         SET LAOCHAN_ENABLE_STEAM_OVERLAY=0"
    );
}

#[tokio::test]
async fn test_failing_bridge_surfaces_on_load() {
    let bridge = Arc::new(RecordingHostBridge {
        should_fail: true,
        ..RecordingHostBridge::default()
    });
    let mut manager = ConfigManager::new(bridge);

    let result = manager.load_config().await;

    assert!(matches!(result, Err(ConfigError::Bridge(_))));
}
