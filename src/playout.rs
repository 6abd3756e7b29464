//! Random games.
//!
//! Plays uniformly random legal moves. Used by the `demo` command and by
//! tests that need long, capture-rich move histories.

use crate::config::GameConfig;
use crate::game::{Game, GameError};
use crate::moves::Move;
use crate::vertex::Vertex;

/// Play one random legal stone for the player to move, or pass if there is none.
///
/// Every intersection is tried in random order. The game checks legality
/// against the last position, so this works whichever position is shown.
pub fn play_random_move(game: &mut Game, rng: &mut fastrand::Rng) -> Result<Move, GameError> {
    let mut candidates: Vec<Vertex> = game.board().vertices().collect();
    rng.shuffle(&mut candidates);

    for vertex in &candidates {
        match game.play(vertex) {
            Ok(mv) => return Ok(mv.clone()),
            Err(GameError::Board(_)) => continue,
            Err(e) => return Err(e),
        }
    }
    game.pass().cloned()
}

/// Create a game from `config` and play up to `moves` random moves.
///
/// Stops early if the game ends.
pub fn random_game(
    config: &GameConfig,
    moves: usize,
    rng: &mut fastrand::Rng,
) -> Result<Game, GameError> {
    let mut game = Game::new(config)?;
    for _ in 0..moves {
        if game.is_ended() {
            break;
        }
        play_random_move(&mut game, rng)?;
    }
    tracing::debug!(moves = game.history().len(), "random game finished");
    Ok(game)
}
