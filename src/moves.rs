//! Moves and the append-only move history of a game.

use serde::{Deserialize, Serialize};

use crate::board::Color;
use crate::constants::PASSES_TO_END_GAME;
use crate::vertex::Vertex;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    Play(Vertex),
    Pass,
}

/// A move as recorded in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// 1-based move number. Move `n` leads to board position `n`.
    pub number: usize,
    pub player: Color,
    pub kind: MoveKind,
    /// Stones removed by this move, computed when it was first played.
    pub captured: Vec<Vertex>,
}

impl Move {
    pub fn is_pass(&self) -> bool {
        self.kind == MoveKind::Pass
    }

    pub fn vertex(&self) -> Option<&Vertex> {
        match &self.kind {
            MoveKind::Play(v) => Some(v),
            MoveKind::Pass => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    moves: Vec<Move>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// The move that leads to board position `position`. `None` for position 0
    /// and for positions past the end.
    pub fn move_at_position(&self, position: usize) -> Option<&Move> {
        position.checked_sub(1).and_then(|i| self.moves.get(i))
    }

    pub fn last(&self) -> Option<&Move> {
        self.moves.last()
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    pub(crate) fn push(&mut self, mv: Move) {
        debug_assert_eq!(mv.number, self.moves.len() + 1);
        self.moves.push(mv);
    }

    /// Drop every move after board position `position`. Returns how many were dropped.
    pub(crate) fn truncate(&mut self, position: usize) -> usize {
        let dropped = self.moves.len().saturating_sub(position);
        self.moves.truncate(position);
        dropped
    }

    /// Whether the last moves are enough passes in a row to end the game.
    pub fn ends_with_consecutive_passes(&self) -> bool {
        self.moves.len() >= PASSES_TO_END_GAME
            && self.moves[self.moves.len() - PASSES_TO_END_GAME..]
                .iter()
                .all(Move::is_pass)
    }
}

impl<'a> IntoIterator for &'a MoveHistory {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}
