//! Constants for vertex axes, board sizes and game setup.
//!
//! Unlike a fixed-size engine board, the board size here is chosen at
//! runtime from the sizes listed in [`BOARD_DIMENSIONS`]. The vertex codec
//! always accepts the full 19x19 range; a [`crate::board::Board`] then checks
//! that a vertex lies within its own dimension.

// =============================================================================
// Vertex Axes
// =============================================================================

/// Smallest value on either vertex axis ("A" / "1").
pub const AXIS_MIN: u8 = 1;

/// Largest value on either vertex axis ("T" / "19").
pub const AXIS_MAX: u8 = 19;

/// Letters used on the letter axis, in order. "I" is not used.
pub const AXIS_LETTERS: &[u8; 19] = b"ABCDEFGHJKLMNOPQRST";

/// The letter that never appears on the letter axis.
pub const SKIPPED_LETTER: u8 = b'I';

// =============================================================================
// Board Geometry
// =============================================================================

/// Supported board dimensions. Only odd sizes have a centre point.
pub const BOARD_DIMENSIONS: [usize; 7] = [7, 9, 11, 13, 15, 17, 19];

/// Boards smaller than this place corner star points on line 3, larger on line 4.
pub const LARGE_BOARD_THRESHOLD: usize = 13;

/// Boards at least this large have star points on the sides.
pub const SIDE_STAR_POINT_THRESHOLD: usize = 13;

// =============================================================================
// Game Setup
// =============================================================================

/// Largest fixed handicap on boards of 9x9 and up.
pub const MAX_HANDICAP: usize = 9;

/// Largest fixed handicap on a 7x7 board.
pub const MAX_HANDICAP_SMALL_BOARD: usize = 4;

/// Default komi for an even game.
pub const DEFAULT_KOMI: f32 = 6.5;

/// Default komi for a handicap game.
pub const DEFAULT_HANDICAP_KOMI: f32 = 0.5;

/// Consecutive passes that end the game.
pub const PASSES_TO_END_GAME: usize = 2;
