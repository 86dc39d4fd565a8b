//! Spawns the game with the launch parameters in its environment.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::process::{Child, Command};
use tracing::info;

/// Error type for starting the game.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// `launcher.toml` does not name a game executable.
    #[error("no game executable configured; set [game].executable in launcher.toml")]
    NoExecutable,

    /// The OS refused to start the process.
    #[error("failed to start {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Starts `executable` with `args`, adding `params` to its environment.
///
/// The child inherits the launcher's own environment; `params` take
/// precedence over inherited variables of the same name.
///
/// # Errors
///
/// [`LaunchError::NoExecutable`] when `executable` is `None`, or
/// [`LaunchError::Spawn`] if the process cannot be created.
pub fn launch_game(
    executable: Option<&Path>,
    args: &[String],
    params: &[(String, String)],
) -> Result<Child, LaunchError> {
    let executable = executable.ok_or(LaunchError::NoExecutable)?;

    let mut command = Command::new(executable);
    command.args(args);
    command.envs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    if let Some(dir) = executable.parent().filter(|d| !d.as_os_str().is_empty()) {
        command.current_dir(dir);
    }

    let child = command.spawn().map_err(|source| LaunchError::Spawn {
        path: executable.to_path_buf(),
        source,
    })?;
    info!(
        "started {} (pid {:?}) with {} launch parameters",
        executable.display(),
        child.id(),
        params.len()
    );
    Ok(child)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_executable_is_reported() {
        let result = launch_game(None, &[], &[]);
        assert!(matches!(result, Err(LaunchError::NoExecutable)));
    }

    #[tokio::test]
    async fn test_nonexistent_executable_is_a_spawn_error() {
        let path = PathBuf::from("/nonexistent/laochan/game-binary");
        let result = launch_game(Some(path.as_path()), &[], &[]);
        assert!(matches!(result, Err(LaunchError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_child_sees_launch_parameters() {
        // Arrange: a shell that exits 0 only if the variable has the expected value
        let sh = PathBuf::from("/bin/sh");
        let args = vec![
            "-c".to_string(),
            "test \"$LAOCHAN_ENABLE_CONSOLE\" = 1".to_string(),
        ];
        let params = vec![("LAOCHAN_ENABLE_CONSOLE".to_string(), "1".to_string())];

        // Act
        let mut child = launch_game(Some(sh.as_path()), &args, &params).expect("spawn sh");
        let status = child.wait().await.expect("wait");

        // Assert
        assert!(status.success());
    }
}
