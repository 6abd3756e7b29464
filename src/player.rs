//! The two players of a game.

use serde::{Deserialize, Serialize};

use crate::board::Color;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    #[default]
    Human,
    /// Moves are generated by an engine, not entered by a person.
    Computer,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub color: Color,
    pub kind: PlayerKind,
}

impl Player {
    pub fn new(color: Color, kind: PlayerKind) -> Self {
        Self { color, kind }
    }

    pub fn is_human(&self) -> bool {
        self.kind == PlayerKind::Human
    }

    pub fn is_computer(&self) -> bool {
        self.kind == PlayerKind::Computer
    }
}
