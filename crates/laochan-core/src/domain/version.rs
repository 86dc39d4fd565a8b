//! Launcher/game version check outcome.

use serde::{Deserialize, Serialize};

/// Result of comparing the installed launcher and game against the server.
///
/// Serialized as its integer code so it matches what the update server and
/// the front-end exchange.  Codes outside the known range decode as
/// [`VersionState::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum VersionState {
    #[default]
    Unknown,
    Normal,
    Need2UpdateLauncher,
    Need2UpdateGame,
}

impl VersionState {
    /// Wire code of this state.
    pub const fn code(self) -> i32 {
        match self {
            VersionState::Unknown => -1,
            VersionState::Normal => 0,
            VersionState::Need2UpdateLauncher => 1,
            VersionState::Need2UpdateGame => 2,
        }
    }

    /// `true` when either the launcher or the game must be updated before launch.
    pub const fn needs_update(self) -> bool {
        matches!(
            self,
            VersionState::Need2UpdateLauncher | VersionState::Need2UpdateGame
        )
    }
}

impl From<i32> for VersionState {
    fn from(code: i32) -> Self {
        match code {
            0 => VersionState::Normal,
            1 => VersionState::Need2UpdateLauncher,
            2 => VersionState::Need2UpdateGame,
            _ => VersionState::Unknown,
        }
    }
}

impl From<VersionState> for i32 {
    fn from(state: VersionState) -> Self {
        state.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_wire_values() {
        assert_eq!(VersionState::Unknown.code(), -1);
        assert_eq!(VersionState::Normal.code(), 0);
        assert_eq!(VersionState::Need2UpdateLauncher.code(), 1);
        assert_eq!(VersionState::Need2UpdateGame.code(), 2);
    }

    #[test]
    fn test_unrecognised_code_decodes_as_unknown() {
        assert_eq!(VersionState::from(7), VersionState::Unknown);
        assert_eq!(VersionState::from(-40), VersionState::Unknown);
    }

    #[test]
    fn test_serializes_as_integer() {
        let json = serde_json::to_string(&VersionState::Need2UpdateGame).unwrap();
        assert_eq!(json, "2");
        let back: VersionState = serde_json::from_str("1").unwrap();
        assert_eq!(back, VersionState::Need2UpdateLauncher);
    }

    #[test]
    fn test_only_update_states_need_update() {
        assert!(!VersionState::Unknown.needs_update());
        assert!(!VersionState::Normal.needs_update());
        assert!(VersionState::Need2UpdateLauncher.needs_update());
        assert!(VersionState::Need2UpdateGame.needs_update());
    }
}
