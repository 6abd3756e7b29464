//! goban-nav command line.
//!
//! ## Usage
//!
//! - `goban-nav` / `goban-nav demo` - Play a random game and walk through it
//! - `goban-nav gtp` - Read GTP-style commands from stdin
//! - `goban-nav vertex C13` / `goban-nav vertex 3 13` - Convert a vertex
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` or `--verbose`.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use goban_nav::board::BoardSize;
use goban_nav::config::GameConfig;
use goban_nav::gtp::GtpEngine;
use goban_nav::observer::BoardPositionEvent;
use goban_nav::playout::random_game;
use goban_nav::vertex::Vertex;

/// goban-nav: Go board positions and vertex coordinates
#[derive(Parser)]
#[command(name = "goban-nav")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file with the game setup
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Board size (7, 9, 11, 13, 15, 17 or 19)
    #[arg(long, global = true)]
    board_size: Option<usize>,

    /// Number of handicap stones
    #[arg(long, global = true)]
    handicap: Option<usize>,

    #[arg(long, global = true)]
    komi: Option<f32>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP command loop on stdin/stdout
    Gtp,
    /// Play a random game and step through its board positions
    Demo {
        /// Number of moves to play
        #[arg(long, default_value_t = 20)]
        moves: usize,
        /// Seed for the random number generator
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Convert a vertex between "C13" and "3 13"
    Vertex {
        #[arg(num_args = 1..=2, required = true)]
        input: Vec<String>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(dimension) = cli.board_size {
        config.board_size = BoardSize::from_dimension(dimension)?;
    }
    if let Some(handicap) = cli.handicap {
        config.handicap = handicap;
    }
    if cli.komi.is_some() {
        config.komi = cli.komi;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(&cli)?;

    match &cli.command {
        Some(Commands::Gtp) => {
            let mut engine = GtpEngine::with_config(config)?;
            let stdin = std::io::stdin();
            engine
                .run(stdin.lock(), std::io::stdout())
                .context("GTP session failed")?;
        }
        Some(Commands::Vertex { input }) => convert_vertex(input)?,
        Some(Commands::Demo { moves, seed }) => run_demo(&config, *moves, *seed)?,
        None => run_demo(&config, 20, None)?,
    }
    Ok(())
}

fn convert_vertex(input: &[String]) -> Result<()> {
    let vertex = match input {
        [s] => Vertex::from_string(s)?,
        [x, y] => {
            let x: i32 = x.parse().context("letter axis must be a number")?;
            let y: i32 = y.parse().context("number axis must be a number")?;
            Vertex::from_numeric((x, y))?
        }
        _ => bail!("expected a vertex or two numbers"),
    };
    println!("{} = ({}, {})", vertex, vertex.x(), vertex.y());
    Ok(())
}

fn run_demo(config: &GameConfig, moves: usize, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let mut game = random_game(config, moves, &mut rng)?;

    game.on_board_position_change(|event, view| match event {
        BoardPositionEvent::NumberOfBoardPositionsChanged => {
            println!("  ({} positions)", view.number_of_board_positions())
        }
        BoardPositionEvent::CurrentBoardPositionChanged => println!(
            "  -> position {} of {}",
            view.current_board_position(),
            view.number_of_board_positions() - 1
        ),
    });

    println!("Played {} moves on {}\n", game.history().len(), config.board_size);

    let middle = game.history().len() / 2;
    for target in [0, middle, game.history().len()] {
        game.set_current_board_position(target as i64)?;
        let view = game.board_position();
        let last = view
            .current_move()
            .map_or("start".to_string(), |mv| match mv.vertex() {
                Some(v) => format!("{} {v}", mv.player),
                None => format!("{} pass", mv.player),
            });
        println!("Position {target} ({last}), {} to play:", view.current_color());
        println!("{}", view.board());
    }
    Ok(())
}
