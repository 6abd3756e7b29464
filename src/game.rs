//! A game of Go: players, move history, the board and its position cursor.
//!
//! The game owns everything the board position cursor synchronises:
//! - [`MoveHistory`], the append-only list of moves,
//! - [`Board`], which always shows the position the cursor points at,
//! - the observers that are told when the cursor or the number of positions
//!   changes.
//!
//! New moves are always appended to the end of the history, even while an
//! earlier position is shown. To branch off from an earlier position, call
//! [`Game::discard_future_moves`] first.

use thiserror::Error;

use crate::board::{Board, BoardError, Color};
use crate::board_position::{
    BoardPosition, BoardPositionView, FollowPolicy, PositionError, replay,
};
use crate::config::GameConfig;
use crate::handicap::handicap_vertices;
use crate::moves::{Move, MoveHistory, MoveKind};
use crate::observer::{BoardPositionEvent, BoardPositionObserver, ObserverRegistry, SubscriptionId};
use crate::player::Player;
use crate::vertex::Vertex;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GameError {
    #[error("the game has ended")]
    GameHasEnded,
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Position(#[from] PositionError),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameEndReason {
    TwoPasses,
    /// The player of this color resigned.
    Resigned(Color),
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GameState {
    #[default]
    InProgress,
    Ended(GameEndReason),
}

#[derive(Debug)]
pub struct Game {
    board: Board,
    history: MoveHistory,
    cursor: BoardPosition,
    black: Player,
    white: Player,
    handicap: Vec<Vertex>,
    komi: f32,
    state: GameState,
    follow_policy: FollowPolicy,
    observers: ObserverRegistry,
}

impl Game {
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        let handicap = handicap_vertices(config.board_size, config.handicap)?;
        let mut board = Board::new(config.board_size);
        board.setup_handicap(&handicap)?;
        let history = MoveHistory::new();
        let cursor = BoardPosition::new(&history);

        tracing::debug!(
            size = %config.board_size,
            handicap = handicap.len(),
            "new game"
        );

        Ok(Self {
            board,
            history,
            cursor,
            black: Player::new(Color::Black, config.black),
            white: Player::new(Color::White, config.white),
            handicap,
            komi: config.effective_komi(),
            state: GameState::InProgress,
            follow_policy: config.follow_policy,
            observers: ObserverRegistry::default(),
        })
    }

    /// The board as it looks at the current board position.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn cursor(&self) -> &BoardPosition {
        &self.cursor
    }

    /// Query the current board position.
    pub fn board_position(&self) -> BoardPositionView<'_> {
        BoardPositionView::new(self)
    }

    pub fn player(&self, color: Color) -> &Player {
        match color {
            Color::Black => &self.black,
            Color::White => &self.white,
        }
    }

    pub fn handicap(&self) -> &[Vertex] {
        &self.handicap
    }

    pub fn komi(&self) -> f32 {
        self.komi
    }

    pub fn set_komi(&mut self, komi: f32) {
        self.komi = komi;
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.state, GameState::Ended(_))
    }

    /// The color that plays first: White in a handicap game, Black otherwise.
    pub fn first_color(&self) -> Color {
        if self.handicap.is_empty() {
            Color::Black
        } else {
            Color::White
        }
    }

    /// The color that plays the next move appended to the history.
    pub fn next_color(&self) -> Color {
        self.history
            .last()
            .map_or(self.first_color(), |mv| mv.player.opposite())
    }

    pub fn follow_policy(&self) -> FollowPolicy {
        self.follow_policy
    }

    pub fn set_follow_policy(&mut self, policy: FollowPolicy) {
        self.follow_policy = policy;
    }

    pub fn subscribe<O>(&mut self, observer: O) -> SubscriptionId
    where
        O: BoardPositionObserver + 'static,
    {
        self.observers.subscribe(Box::new(observer))
    }

    /// Subscribe a closure.
    pub fn on_board_position_change<F>(&mut self, f: F) -> SubscriptionId
    where
        F: FnMut(BoardPositionEvent, &BoardPositionView<'_>) + 'static,
    {
        self.observers.subscribe(Box::new(f))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn notify(&mut self, event: BoardPositionEvent) {
        if self.observers.is_empty() {
            return;
        }
        let mut observers = std::mem::take(&mut self.observers);
        observers.notify(event, &BoardPositionView::new(self));
        self.observers = observers;
    }

    /// Show board position `position`.
    ///
    /// Fails with [`PositionError::Range`] if `position` is negative or not
    /// below the number of board positions; nothing changes in that case.
    /// Setting the position that is already shown does nothing and sends no
    /// notification.
    pub fn set_current_board_position(&mut self, position: i64) -> Result<(), PositionError> {
        let target = self.cursor.validate(position)?;
        let current = self.cursor.current_board_position();
        if target == current {
            return Ok(());
        }
        tracing::debug!(from = current, to = target, "changing board position");
        self.cursor.move_to(&mut self.board, &self.history, target)?;
        self.notify(BoardPositionEvent::CurrentBoardPositionChanged);
        Ok(())
    }

    pub fn go_to_first_position(&mut self) -> Result<(), PositionError> {
        self.set_current_board_position(0)
    }

    pub fn go_to_last_position(&mut self) -> Result<(), PositionError> {
        self.set_current_board_position(self.cursor.last_position() as i64)
    }

    pub fn go_to_previous_position(&mut self) -> Result<(), PositionError> {
        self.set_current_board_position(self.cursor.current_board_position() as i64 - 1)
    }

    pub fn go_to_next_position(&mut self) -> Result<(), PositionError> {
        self.set_current_board_position(self.cursor.current_board_position() as i64 + 1)
    }

    /// Play a stone for [`Game::next_color`] at `vertex`.
    pub fn play(&mut self, vertex: &Vertex) -> Result<&Move, GameError> {
        self.append_move(MoveKind::Play(vertex.clone()))
    }

    pub fn pass(&mut self) -> Result<&Move, GameError> {
        self.append_move(MoveKind::Pass)
    }

    /// The player to move at the end of the game resigns. No move is recorded.
    pub fn resign(&mut self) -> Result<(), GameError> {
        if self.is_ended() {
            return Err(GameError::GameHasEnded);
        }
        let color = self.next_color();
        self.state = GameState::Ended(GameEndReason::Resigned(color));
        tracing::info!(%color, "player resigned");
        Ok(())
    }

    /// Drop every move after the current board position.
    ///
    /// Sends a count notification if anything was dropped; the current
    /// position does not change. A game that had ended is in progress again.
    /// Returns the number of moves dropped.
    pub fn discard_future_moves(&mut self) -> usize {
        let dropped = self.history.truncate(self.cursor.current_board_position());
        if dropped == 0 {
            return 0;
        }
        tracing::debug!(dropped, "discarded future moves");
        self.state = GameState::InProgress;
        self.cursor.sync_count(&self.history);
        self.notify(BoardPositionEvent::NumberOfBoardPositionsChanged);
        dropped
    }

    fn append_move(&mut self, kind: MoveKind) -> Result<&Move, GameError> {
        if self.is_ended() {
            return Err(GameError::GameHasEnded);
        }

        // The move is played against the last position, whatever is shown.
        let shown = self.cursor.current_board_position();
        let end = self.history.len();
        replay(&mut self.board, &self.history, shown, end)?;

        let color = self.next_color();
        let captured = match &kind {
            MoveKind::Play(vertex) => {
                let ko = self
                    .history
                    .last()
                    .and_then(|mv| self.board.ko_point_after(mv));
                match self.board.play(vertex, color, ko.as_ref()) {
                    Ok(captured) => captured,
                    Err(e) => {
                        tracing::warn!(%color, %vertex, "rejected move: {e}");
                        replay(&mut self.board, &self.history, end, shown)?;
                        return Err(e.into());
                    }
                }
            }
            MoveKind::Pass => Vec::new(),
        };

        let number = end + 1;
        self.history.push(Move {
            number,
            player: color,
            kind,
            captured,
        });
        tracing::debug!(number, %color, "move appended");

        if self.history.ends_with_consecutive_passes() {
            self.state = GameState::Ended(GameEndReason::TwoPasses);
            tracing::info!("game ended by two passes");
        }

        // Back to the shown position so that the count notification sees a
        // board that matches the cursor.
        replay(&mut self.board, &self.history, number, shown)?;
        self.cursor.sync_count(&self.history);
        self.notify(BoardPositionEvent::NumberOfBoardPositionsChanged);

        if self.follow_policy == FollowPolicy::AutoFollow {
            self.cursor.move_to(&mut self.board, &self.history, number)?;
            self.notify(BoardPositionEvent::CurrentBoardPositionChanged);
        }

        Ok(&self.history.as_slice()[number - 1])
    }
}
