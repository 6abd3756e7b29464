//! The board position cursor.
//!
//! A game is viewed as an ordered sequence of board positions:
//! - Position 0 is the start of the game, before any move. Handicap stones,
//!   if any, are already on the board.
//! - Position `n` is the board after move `n` has been played. A pass creates
//!   a new position even though no stone changes.
//!
//! [`BoardPosition`] stores which of these positions the board currently
//! shows. The index and the stones on the board are always in sync: moving
//! the cursor replays or unwinds the moves in between, and appending a move
//! to the game moves the cursor along (see [`FollowPolicy`]).
//!
//! Consumers read the cursor through [`BoardPositionView`], which combines it
//! with the game's move history and players.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, Color};
use crate::game::Game;
use crate::moves::{Move, MoveHistory};
use crate::player::Player;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// The requested position is outside `0..number_of_board_positions`.
    #[error("board position {requested} is out of range, game has {number_of_board_positions} positions")]
    Range {
        requested: i64,
        number_of_board_positions: usize,
    },
    /// The move history and the board disagree. This is a bug, not a user error.
    #[error("board position invariant violated: {0}")]
    InvariantViolation(String),
}

/// What the cursor does when a move is appended to the game.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowPolicy {
    /// Jump to the new last position.
    #[default]
    AutoFollow,
    /// Stay on the position currently shown.
    Pinned,
}

/// Cursor state: the current index and the mirrored number of positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardPosition {
    current: usize,
    count: usize,
}

impl BoardPosition {
    /// Open on the last position of `history`.
    pub(crate) fn new(history: &MoveHistory) -> Self {
        Self {
            current: history.len(),
            count: history.len() + 1,
        }
    }

    pub fn current_board_position(&self) -> usize {
        self.current
    }

    pub fn number_of_board_positions(&self) -> usize {
        self.count
    }

    pub fn is_first_position(&self) -> bool {
        self.current == 0
    }

    pub fn is_last_position(&self) -> bool {
        self.current + 1 == self.count
    }

    pub fn last_position(&self) -> usize {
        self.count - 1
    }

    /// Check `requested` against the current number of positions.
    pub(crate) fn validate(&self, requested: i64) -> Result<usize, PositionError> {
        usize::try_from(requested)
            .ok()
            .filter(|&p| p < self.count)
            .ok_or(PositionError::Range {
                requested,
                number_of_board_positions: self.count,
            })
    }

    /// Refresh the mirrored count. Returns true if it changed.
    pub(crate) fn sync_count(&mut self, history: &MoveHistory) -> bool {
        let count = history.len() + 1;
        let changed = count != self.count;
        self.count = count;
        if self.current >= count {
            self.current = count - 1;
        }
        changed
    }

    /// Replay `board` to `target` and store the new index.
    pub(crate) fn move_to(
        &mut self,
        board: &mut Board,
        history: &MoveHistory,
        target: usize,
    ) -> Result<(), PositionError> {
        replay(board, history, self.current, target)?;
        self.current = target;
        Ok(())
    }
}

/// Bring `board` from position `from` to position `to`.
///
/// Moves are applied one by one going forward and reverted one by one going
/// back, so the cost is bounded by the distance between the two positions.
pub(crate) fn replay(
    board: &mut Board,
    history: &MoveHistory,
    from: usize,
    to: usize,
) -> Result<(), PositionError> {
    if from.max(to) > history.len() {
        let message = format!(
            "position {} requested but history holds only {} moves",
            from.max(to),
            history.len()
        );
        tracing::error!("{message}");
        return Err(PositionError::InvariantViolation(message));
    }

    let mismatch = |mv: &Move, e: crate::board::BoardError| {
        let message = format!("move {}: {e}", mv.number);
        tracing::error!("{message}");
        PositionError::InvariantViolation(message)
    };

    if to > from {
        for position in from + 1..=to {
            let Some(mv) = history.move_at_position(position) else {
                unreachable!("history length checked above");
            };
            tracing::trace!(move_number = mv.number, "apply");
            board.apply(mv).map_err(|e| mismatch(mv, e))?;
        }
    } else {
        for position in (to + 1..=from).rev() {
            let Some(mv) = history.move_at_position(position) else {
                unreachable!("history length checked above");
            };
            tracing::trace!(move_number = mv.number, "revert");
            board.revert(mv).map_err(|e| mismatch(mv, e))?;
        }
    }
    Ok(())
}

/// Read-only view of a game's board position.
///
/// This is what consumers and observers use to query the current position.
#[derive(Clone, Copy)]
pub struct BoardPositionView<'a> {
    game: &'a Game,
}

impl<'a> BoardPositionView<'a> {
    pub(crate) fn new(game: &'a Game) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &'a Game {
        self.game
    }

    fn position(&self) -> &'a BoardPosition {
        self.game.cursor()
    }

    pub fn current_board_position(&self) -> usize {
        self.position().current_board_position()
    }

    pub fn number_of_board_positions(&self) -> usize {
        self.position().number_of_board_positions()
    }

    pub fn is_first_position(&self) -> bool {
        self.position().is_first_position()
    }

    pub fn is_last_position(&self) -> bool {
        self.position().is_last_position()
    }

    /// The move that led to the current position, `None` at position 0.
    pub fn current_move(&self) -> Option<&'a Move> {
        self.game
            .history()
            .move_at_position(self.current_board_position())
    }

    /// The player whose move would be recorded next at the current position.
    pub fn current_player(&self) -> &'a Player {
        let color = self
            .current_move()
            .map_or(self.game.first_color(), |mv| mv.player.opposite());
        self.game.player(color)
    }

    pub fn current_color(&self) -> Color {
        self.current_player().color
    }

    pub fn is_computer_players_turn(&self) -> bool {
        self.current_player().is_computer()
    }

    /// The board as it looks at the current position.
    pub fn board(&self) -> &'a Board {
        self.game.board()
    }
}

impl std::fmt::Debug for BoardPositionView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardPositionView")
            .field("current_board_position", &self.current_board_position())
            .field("number_of_board_positions", &self.number_of_board_positions())
            .finish()
    }
}
