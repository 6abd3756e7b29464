//! Game setup, loadable from TOML.
//!
//! ```toml
//! board_size = 9
//! handicap = 2
//! komi = 0.5
//! black = "human"
//! white = "computer"
//! follow_policy = "auto_follow"
//! ```
//!
//! Every key is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{BoardError, BoardSize};
use crate::board_position::FollowPolicy;
use crate::constants::{DEFAULT_HANDICAP_KOMI, DEFAULT_KOMI};
use crate::handicap::max_handicap;
use crate::player::PlayerKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Board(#[from] BoardError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: BoardSize,
    pub handicap: usize,
    /// `None` picks the usual komi for the handicap.
    pub komi: Option<f32>,
    pub black: PlayerKind,
    pub white: PlayerKind,
    pub follow_policy: FollowPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BoardSize::default(),
            handicap: 0,
            komi: None,
            black: PlayerKind::Human,
            white: PlayerKind::Human,
            follow_policy: FollowPolicy::AutoFollow,
        }
    }
}

impl GameConfig {
    pub fn new(board_size: BoardSize) -> Self {
        Self {
            board_size,
            ..Self::default()
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loading game config");
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let max = max_handicap(self.board_size);
        if self.handicap == 1 || self.handicap > max {
            return Err(BoardError::InvalidHandicap {
                handicap: self.handicap,
                max,
            }
            .into());
        }
        Ok(())
    }

    pub fn effective_komi(&self) -> f32 {
        self.komi.unwrap_or(if self.handicap == 0 {
            DEFAULT_KOMI
        } else {
            DEFAULT_HANDICAP_KOMI
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::from_toml_str("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.board_size.dimension(), 19);
        assert_eq!(config.effective_komi(), DEFAULT_KOMI);
    }

    #[test]
    fn test_parse_full() {
        let config = GameConfig::from_toml_str(
            r#"
            board_size = 9
            handicap = 3
            black = "computer"
            follow_policy = "pinned"
            "#,
        )
        .unwrap();
        assert_eq!(config.board_size, BoardSize::Nine);
        assert_eq!(config.handicap, 3);
        assert_eq!(config.black, PlayerKind::Computer);
        assert_eq!(config.white, PlayerKind::Human);
        assert_eq!(config.follow_policy, FollowPolicy::Pinned);
        assert_eq!(config.effective_komi(), DEFAULT_HANDICAP_KOMI);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.toml");
        std::fs::write(&path, "board_size = 13\nwhite = \"computer\"\nkomi = 7.5\n").unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.board_size, BoardSize::Thirteen);
        assert_eq!(config.white, PlayerKind::Computer);
        assert_eq!(config.effective_komi(), 7.5);

        assert!(matches!(
            GameConfig::load(dir.path().join("missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            GameConfig::from_toml_str("board_size = 8"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GameConfig::from_toml_str("board_size = 7\nhandicap = 5"),
            Err(ConfigError::Board(BoardError::InvalidHandicap { handicap: 5, max: 4 }))
        ));
    }
}
