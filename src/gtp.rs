//! Go Text Protocol (GTP) style command interface.
//!
//! Implements the board-handling subset of GTP version 2 and adds commands
//! to navigate between board positions, so that a front-end can drive a
//! [`Game`] over a text pipe.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`, `list_commands`,
//!   `known_command <cmd>`, `quit`
//! - `boardsize <size>` - Start a new game on a board of the given size
//! - `clear_board` - Start a new game on an empty board, keeping size and komi
//! - `komi <value>` - Set komi
//! - `fixed_handicap <n>` - Start a new game with `n` handicap stones
//! - `play <color> <vertex|pass>` - Append a move
//! - `resign` - The player to move resigns
//! - `showboard` - Print the board at the current position
//! - `goto_position <n>`, `first_position`, `last_position`,
//!   `previous_position`, `next_position` - Navigate
//! - `position_info` - Current position, count and player to move
//! - `discard_future_moves` - Drop moves after the current position
//! - `vertex <string>` / `vertex <x> <y>` - Convert a vertex
//!
//! ## Example
//!
//! ```
//! use goban_nav::gtp::GtpEngine;
//! let mut engine = GtpEngine::new();
//! let input = "1 play black D4\n2 previous_position\nquit\n";
//! let mut output = Vec::new();
//! engine.run(input.as_bytes(), &mut output).unwrap();
//! ```

use std::io::{self, BufRead, Write};

use crate::board::{BoardSize, Color};
use crate::board_position::PositionError;
use crate::config::GameConfig;
use crate::game::{Game, GameError, GameState};
use crate::handicap::handicap_vertices;
use crate::vertex::Vertex;

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "discard_future_moves",
    "first_position",
    "fixed_handicap",
    "goto_position",
    "known_command",
    "komi",
    "last_position",
    "list_commands",
    "name",
    "next_position",
    "play",
    "position_info",
    "previous_position",
    "protocol_version",
    "quit",
    "resign",
    "showboard",
    "version",
    "vertex",
];

pub struct GtpEngine {
    config: GameConfig,
    game: Game,
}

impl Default for GtpEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GtpEngine {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
            .unwrap_or_else(|_| unreachable!("the default config is always valid"))
    }

    pub fn with_config(config: GameConfig) -> Result<Self, GameError> {
        let game = Game::new(&config)?;
        Ok(Self { config, game })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Replace the game with a fresh one built from `config`.
    fn restart(&mut self, config: GameConfig) -> (bool, String) {
        match Game::new(&config) {
            Ok(game) => {
                self.game = game;
                self.config = config;
                (true, String::new())
            }
            Err(e) => (false, e.to_string()),
        }
    }

    fn navigate(result: Result<(), PositionError>) -> (bool, String) {
        match result {
            Ok(()) => (true, String::new()),
            Err(e) => (false, e.to_string()),
        }
    }

    fn position_info(&self) -> String {
        let view = self.game.board_position();
        let last = view
            .current_move()
            .map_or("none".to_string(), |mv| match mv.vertex() {
                Some(v) => format!("{} {v}", mv.player),
                None => format!("{} pass", mv.player),
            });
        let state = match self.game.state() {
            GameState::InProgress => "in_progress".to_string(),
            GameState::Ended(reason) => format!("ended {reason:?}"),
        };
        format!(
            "position {} of {}\nmove {last}\nto_play {}{}\nstate {state}",
            view.current_board_position(),
            view.number_of_board_positions(),
            view.current_color(),
            if view.is_computer_players_turn() { " computer" } else { "" },
        )
    }

    /// Execute a GTP command and return (success, response).
    pub fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                if args.is_empty() {
                    return (false, "missing argument".to_string());
                }
                let known = KNOWN_COMMANDS.contains(&args[0].to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<usize>().ok().map(BoardSize::from_dimension) {
                    Some(Ok(board_size)) => {
                        let config = GameConfig {
                            board_size,
                            handicap: 0,
                            ..self.config.clone()
                        };
                        self.restart(config)
                    }
                    Some(Err(_)) | None => (false, "unacceptable size".to_string()),
                }
            }

            "clear_board" => {
                let config = GameConfig {
                    handicap: 0,
                    ..self.config.clone()
                };
                self.restart(config)
            }

            "komi" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<f32>() {
                    Ok(komi) => {
                        self.config.komi = Some(komi);
                        self.game.set_komi(komi);
                        (true, String::new())
                    }
                    Err(_) => (false, "invalid komi".to_string()),
                }
            }

            "fixed_handicap" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let Ok(handicap) = arg.parse::<usize>() else {
                    return (false, "invalid handicap".to_string());
                };
                if handicap == 0 {
                    return (false, "invalid handicap".to_string());
                }
                if !self.game.history().is_empty() {
                    return (false, "board not empty".to_string());
                }
                match handicap_vertices(self.config.board_size, handicap) {
                    Ok(vertices) => {
                        let config = GameConfig {
                            handicap,
                            ..self.config.clone()
                        };
                        let (ok, message) = self.restart(config);
                        if !ok {
                            return (ok, message);
                        }
                        let names: Vec<&str> = vertices.iter().map(Vertex::string).collect();
                        (true, names.join(" "))
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let color = match args[0].to_lowercase().as_str() {
                    "b" | "black" => Color::Black,
                    "w" | "white" => Color::White,
                    _ => return (false, "invalid color".to_string()),
                };
                if color != self.game.next_color() {
                    return (false, format!("it is {}'s turn", self.game.next_color()));
                }

                let result = if args[1].eq_ignore_ascii_case("pass") {
                    self.game.pass().map(|_| ())
                } else {
                    match Vertex::from_string(args[1]) {
                        Ok(vertex) => self.game.play(&vertex).map(|_| ()),
                        Err(e) => return (false, e.to_string()),
                    }
                };
                match result {
                    Ok(()) => (true, String::new()),
                    Err(e) => (false, e.to_string()),
                }
            }

            "resign" => match self.game.resign() {
                Ok(()) => (true, String::new()),
                Err(e) => (false, e.to_string()),
            },

            "showboard" => (true, format!("\n{}", self.game.board())),

            "goto_position" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<i64>() {
                    Ok(n) => Self::navigate(self.game.set_current_board_position(n)),
                    Err(_) => (false, "invalid position".to_string()),
                }
            }

            "first_position" => Self::navigate(self.game.go_to_first_position()),

            "last_position" => Self::navigate(self.game.go_to_last_position()),

            "previous_position" => Self::navigate(self.game.go_to_previous_position()),

            "next_position" => Self::navigate(self.game.go_to_next_position()),

            "position_info" => (true, self.position_info()),

            "discard_future_moves" => {
                let dropped = self.game.discard_future_moves();
                (true, dropped.to_string())
            }

            "vertex" => match args {
                [s] => match Vertex::from_string(s) {
                    Ok(v) => (true, format!("{} {}", v.x(), v.y())),
                    Err(e) => (false, e.to_string()),
                },
                [x, y] => match (x.parse::<i32>(), y.parse::<i32>()) {
                    (Ok(x), Ok(y)) => match Vertex::from_numeric((x, y)) {
                        Ok(v) => (true, v.to_string()),
                        Err(e) => (false, e.to_string()),
                    },
                    _ => (false, "invalid numeric vertex".to_string()),
                },
                _ => (false, "expected <vertex> or <x> <y>".to_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }
}
