//! goban-nav: board positions and vertex coordinates for a game of Go.
//!
//! A game is viewed as an ordered sequence of board positions, one per move
//! plus the initial position. This crate keeps a "current board position"
//! cursor in lockstep with the stones on the board and with the move history,
//! and converts between human-readable vertices ("C13") and numeric ones.
//!
//! ## Modules
//!
//! - [`constants`] - Axis bounds, board sizes and game setup defaults
//! - [`vertex`] - Vertex codec (letter+number <-> numeric pair)
//! - [`board`] - Stones, captures, regions and incremental apply/revert
//! - [`handicap`] - Fixed handicap placement
//! - [`moves`] - Moves and the move history
//! - [`player`] - Human and computer players
//! - [`board_position`] - The board position cursor and its read-only view
//! - [`observer`] - Change notifications for the cursor
//! - [`game`] - A game tying all of the above together
//! - [`config`] - Game setup loaded from TOML
//! - [`playout`] - Random games
//! - [`gtp`] - GTP-style text interface
//!
//! ## Example
//!
//! ```
//! use goban_nav::board::BoardSize;
//! use goban_nav::config::GameConfig;
//! use goban_nav::game::Game;
//! use goban_nav::vertex::Vertex;
//!
//! let mut game = Game::new(&GameConfig::new(BoardSize::Nine)).unwrap();
//! game.play(&Vertex::from_string("E5").unwrap()).unwrap();
//! game.pass().unwrap();
//!
//! // Look back at the start of the game.
//! game.set_current_board_position(0).unwrap();
//! let view = game.board_position();
//! assert!(view.is_first_position());
//! assert_eq!(view.number_of_board_positions(), 3);
//! assert!(view.board().is_empty());
//! ```

pub mod board;
pub mod board_position;
pub mod config;
pub mod constants;
pub mod game;
pub mod gtp;
pub mod handicap;
pub mod moves;
pub mod observer;
pub mod player;
pub mod playout;
pub mod vertex;
