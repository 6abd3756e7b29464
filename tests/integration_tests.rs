//! Integration tests for goban-nav
//!
//! These exercise the public API the way a front-end would: build a game,
//! play moves, navigate between board positions and watch notifications.

use std::cell::RefCell;
use std::rc::Rc;

use goban_nav::board::{Board, BoardSize, Color};
use goban_nav::board_position::{BoardPositionView, FollowPolicy, PositionError};
use goban_nav::config::GameConfig;
use goban_nav::game::{Game, GameError};
use goban_nav::observer::{BoardPositionEvent, BoardPositionObserver};
use goban_nav::player::PlayerKind;
use goban_nav::playout::{play_random_move, random_game};
use goban_nav::vertex::{Vertex, VertexError, VertexNumeric};

// =============================================================================
// Helper functions
// =============================================================================

fn v(s: &str) -> Vertex {
    Vertex::from_string(s).unwrap()
}

/// Play a sequence of moves, alternating colors. "pass" passes.
fn setup_game(size: BoardSize, moves: &[&str]) -> Game {
    let mut game = Game::new(&GameConfig::new(size)).unwrap();
    for mv in moves {
        if *mv == "pass" {
            game.pass().unwrap();
        } else {
            game.play(&v(mv)).unwrap();
        }
    }
    game
}

/// What an observer saw: the event plus the values it pulled from the view.
#[derive(Debug, Clone, PartialEq)]
struct Seen {
    event: BoardPositionEvent,
    current: usize,
    count: usize,
    board_matches_cursor: bool,
}

type Log = Rc<RefCell<Vec<Seen>>>;

/// Rebuild the board for the view's current position from scratch and
/// compare it with the board the game shows.
fn board_matches_cursor(view: &BoardPositionView<'_>) -> bool {
    let game = view.game();
    let mut expected = Board::new(game.board().size());
    expected.setup_handicap(game.handicap()).unwrap();
    for mv in game.history().iter().take(view.current_board_position()) {
        expected.apply(mv).unwrap();
    }
    &expected == view.board()
}

fn record(game: &mut Game) -> Log {
    let log: Log = Rc::default();
    let sink = Rc::clone(&log);
    game.on_board_position_change(move |event, view| {
        sink.borrow_mut().push(Seen {
            event,
            current: view.current_board_position(),
            count: view.number_of_board_positions(),
            board_matches_cursor: board_matches_cursor(view),
        });
    });
    log
}

fn events(log: &Log) -> Vec<BoardPositionEvent> {
    log.borrow().iter().map(|s| s.event).collect()
}

// =============================================================================
// Vertex codec
// =============================================================================

#[test]
fn test_vertex_roundtrip_all_numeric() {
    for x in 1..=19 {
        for y in 1..=19 {
            let s = Vertex::from_numeric((x, y)).unwrap().to_string();
            assert_eq!(
                Vertex::from_string(&s).unwrap().numeric(),
                VertexNumeric::new(x, y),
                "roundtrip of {s}"
            );
        }
    }
}

#[test]
fn test_vertex_letter_gap() {
    assert_eq!(v("A1").numeric(), VertexNumeric::new(1, 1));
    assert_eq!(v("H8").numeric(), VertexNumeric::new(8, 8));
    assert_eq!(v("J9").numeric(), VertexNumeric::new(9, 9));
    assert!(matches!(
        Vertex::from_string("I5"),
        Err(VertexError::InvalidFormat(_))
    ));
}

#[test]
fn test_vertex_numeric_out_of_range() {
    assert!(matches!(
        Vertex::from_numeric((20, 1)),
        Err(VertexError::OutOfRange { .. })
    ));
    assert!(matches!(
        Vertex::from_numeric((0, 1)),
        Err(VertexError::OutOfRange { .. })
    ));
}

// =============================================================================
// Board position queries
// =============================================================================

#[test]
fn test_first_and_last_flags() {
    let mut game = setup_game(BoardSize::Nine, &["E5", "C3", "pass", "G7"]);
    let n = game.history().len();
    assert_eq!(game.board_position().number_of_board_positions(), n + 1);
    assert_eq!(game.board_position().current_board_position(), n);

    for i in 0..=n {
        game.set_current_board_position(i as i64).unwrap();
        let view = game.board_position();
        assert_eq!(view.is_first_position(), i == 0, "position {i}");
        assert_eq!(view.is_last_position(), i == n, "position {i}");
    }
}

#[test]
fn test_current_move() {
    let moves = ["E5", "C3", "pass", "G7"];
    let mut game = setup_game(BoardSize::Nine, &moves);

    game.set_current_board_position(0).unwrap();
    assert!(game.board_position().current_move().is_none());

    for (i, s) in moves.iter().enumerate() {
        game.set_current_board_position(i as i64 + 1).unwrap();
        let mv = game.board_position().current_move().unwrap();
        assert_eq!(mv.number, i + 1);
        assert_eq!(mv, &game.history().as_slice()[i]);
        match *s {
            "pass" => assert!(mv.is_pass()),
            s => assert_eq!(mv.vertex(), Some(&v(s))),
        }
    }
}

#[test]
fn test_current_player_follows_position() {
    let mut config = GameConfig::new(BoardSize::Nine);
    config.white = PlayerKind::Computer;
    let mut game = Game::new(&config).unwrap();
    game.play(&v("E5")).unwrap();
    game.play(&v("C3")).unwrap();

    assert_eq!(game.board_position().current_color(), Color::Black);
    assert!(!game.board_position().is_computer_players_turn());

    game.set_current_board_position(1).unwrap();
    assert_eq!(game.board_position().current_color(), Color::White);
    assert!(game.board_position().is_computer_players_turn());

    game.set_current_board_position(0).unwrap();
    assert_eq!(game.board_position().current_color(), Color::Black);
}

#[test]
fn test_handicap_position_zero() {
    let mut config = GameConfig::new(BoardSize::Nineteen);
    config.handicap = 4;
    let mut game = Game::new(&config).unwrap();
    assert_eq!(game.board().count_stones(Color::Black), 4);
    assert_eq!(game.board_position().current_color(), Color::White);

    game.play(&v("K10")).unwrap();
    game.set_current_board_position(0).unwrap();
    assert_eq!(game.board().count_stones(Color::Black), 4);
    assert_eq!(game.board().count_stones(Color::White), 0);
}

// =============================================================================
// Range errors
// =============================================================================

#[test]
fn test_out_of_range_positions() {
    let mut game = setup_game(BoardSize::Nine, &["E5", "C3", "G7"]);
    game.set_current_board_position(1).unwrap();
    let board = game.board().clone();
    let log = record(&mut game);

    assert_eq!(
        game.set_current_board_position(4),
        Err(PositionError::Range {
            requested: 4,
            number_of_board_positions: 4
        })
    );
    assert!(matches!(
        game.set_current_board_position(-1),
        Err(PositionError::Range { requested: -1, .. })
    ));

    assert_eq!(game.board_position().current_board_position(), 1);
    assert_eq!(game.board(), &board);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_same_position_sends_nothing() {
    let mut game = setup_game(BoardSize::Nine, &["E5", "C3"]);
    let log = record(&mut game);
    game.set_current_board_position(2).unwrap();
    assert!(log.borrow().is_empty());

    game.set_current_board_position(0).unwrap();
    game.set_current_board_position(0).unwrap();
    assert_eq!(events(&log), [BoardPositionEvent::CurrentBoardPositionChanged]);
}

// =============================================================================
// Synchronization with appended moves
// =============================================================================

#[test]
fn test_count_notification_comes_first() {
    let mut game = setup_game(BoardSize::Nine, &["E5"]);
    let log = record(&mut game);

    game.play(&v("C3")).unwrap();

    assert_eq!(
        *log.borrow(),
        [
            Seen {
                event: BoardPositionEvent::NumberOfBoardPositionsChanged,
                current: 1,
                count: 3,
                board_matches_cursor: true,
            },
            Seen {
                event: BoardPositionEvent::CurrentBoardPositionChanged,
                current: 2,
                count: 3,
                board_matches_cursor: true,
            },
        ]
    );
    assert!(game.board_position().is_last_position());
}

#[test]
fn test_pass_is_a_new_position() {
    let mut game = setup_game(BoardSize::Nine, &["E5"]);
    let log = record(&mut game);
    let board = game.board().clone();

    game.pass().unwrap();

    assert_eq!(
        events(&log),
        [
            BoardPositionEvent::NumberOfBoardPositionsChanged,
            BoardPositionEvent::CurrentBoardPositionChanged,
        ]
    );
    assert_eq!(game.board_position().current_board_position(), 2);
    assert_eq!(game.board(), &board);
}

#[test]
fn test_auto_follow_from_earlier_position() {
    let mut game = setup_game(BoardSize::Nine, &["E5", "C3", "G7"]);
    game.set_current_board_position(1).unwrap();
    let log = record(&mut game);

    // Appended at the end: White's move 4, not a branch from position 1.
    let mv = game.play(&v("D4")).unwrap();
    assert_eq!(mv.number, 4);
    assert_eq!(mv.player, Color::White);

    let seen = log.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!((seen[0].current, seen[0].count), (1, 5));
    assert_eq!((seen[1].current, seen[1].count), (4, 5));
    assert!(seen.iter().all(|s| s.board_matches_cursor));
    assert_eq!(game.board().count_stones(Color::Black), 2);
}

#[test]
fn test_pinned_position_stays() {
    let mut game = setup_game(BoardSize::Nine, &["E5", "C3", "G7"]);
    game.set_follow_policy(FollowPolicy::Pinned);
    game.set_current_board_position(1).unwrap();
    let board = game.board().clone();
    let log = record(&mut game);

    game.play(&v("D4")).unwrap();
    game.pass().unwrap();

    assert_eq!(
        events(&log),
        [
            BoardPositionEvent::NumberOfBoardPositionsChanged,
            BoardPositionEvent::NumberOfBoardPositionsChanged,
        ]
    );
    assert!(log.borrow().iter().all(|s| s.board_matches_cursor));
    let view = game.board_position();
    assert_eq!(view.current_board_position(), 1);
    assert_eq!(view.number_of_board_positions(), 6);
    assert!(!view.is_last_position());
    assert_eq!(game.board(), &board);

    game.go_to_last_position().unwrap();
    assert_eq!(game.board().stone_at(&v("D4")), Some(Color::White));
}

#[test]
fn test_rejected_move_sends_nothing() {
    let mut game = setup_game(BoardSize::Nine, &["E5", "C3"]);
    game.set_current_board_position(0).unwrap();
    let log = record(&mut game);

    assert!(matches!(game.play(&v("E5")), Err(GameError::Board(_))));
    assert!(log.borrow().is_empty());
    assert_eq!(game.board_position().current_board_position(), 0);
    assert!(game.board().is_empty());
}

#[test]
fn test_discard_future_moves_notifies_count_only() {
    let mut game = setup_game(BoardSize::Nine, &["E5", "C3", "G7"]);
    game.set_current_board_position(1).unwrap();
    let log = record(&mut game);

    assert_eq!(game.discard_future_moves(), 2);
    assert_eq!(events(&log), [BoardPositionEvent::NumberOfBoardPositionsChanged]);
    assert_eq!(log.borrow()[0].count, 2);
    assert!(game.board_position().is_last_position());
}

#[test]
fn test_unsubscribe() {
    let mut game = setup_game(BoardSize::Nine, &["E5"]);
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let id = game.on_board_position_change(move |_, _| *sink.borrow_mut() += 1);

    game.go_to_first_position().unwrap();
    assert!(game.unsubscribe(id));
    assert!(!game.unsubscribe(id));
    game.go_to_last_position().unwrap();
    assert_eq!(*count.borrow(), 1);
}

struct CountingObserver {
    counts: Rc<RefCell<(usize, usize)>>,
}

impl BoardPositionObserver for CountingObserver {
    fn board_position_changed(&mut self, event: BoardPositionEvent, _: &BoardPositionView<'_>) {
        let mut counts = self.counts.borrow_mut();
        match event {
            BoardPositionEvent::NumberOfBoardPositionsChanged => counts.0 += 1,
            BoardPositionEvent::CurrentBoardPositionChanged => counts.1 += 1,
        }
    }
}

#[test]
fn test_trait_observer() {
    let mut game = setup_game(BoardSize::Nine, &[]);
    let counts = Rc::new(RefCell::new((0, 0)));
    game.subscribe(CountingObserver {
        counts: Rc::clone(&counts),
    });

    game.play(&v("E5")).unwrap();
    game.play(&v("C3")).unwrap();
    game.go_to_first_position().unwrap();

    assert_eq!(*counts.borrow(), (2, 3));
}

// =============================================================================
// Replay equivalence
// =============================================================================

#[test]
fn test_replay_is_path_independent() {
    let mut rng = fastrand::Rng::with_seed(2024);
    let mut game = random_game(&GameConfig::new(BoardSize::Seven), 120, &mut rng).unwrap();
    let n = game.history().len();
    assert!(
        game.history().iter().any(|mv| !mv.captured.is_empty()),
        "the game should contain captures"
    );

    for k in [0, 1, n / 3, n / 2, n - 1] {
        game.set_current_board_position(k as i64).unwrap();
        let direct = game.board().clone();

        game.set_current_board_position(n as i64).unwrap();
        game.set_current_board_position(k as i64).unwrap();
        assert_eq!(game.board(), &direct, "position {k} after visiting the end");
        assert_eq!(game.board().regions(), direct.regions());
        assert!(board_matches_cursor(&game.board_position()));
    }
}

#[test]
fn test_random_navigation_keeps_board_in_sync() {
    let mut rng = fastrand::Rng::with_seed(99);
    let mut game = random_game(&GameConfig::new(BoardSize::Nine), 60, &mut rng).unwrap();

    for _ in 0..50 {
        let count = game.board_position().number_of_board_positions();
        game.set_current_board_position(rng.usize(..count) as i64).unwrap();
        assert!(board_matches_cursor(&game.board_position()));

        // Moves keep being appended while the user looks around.
        if rng.bool() && !game.is_ended() {
            play_random_move(&mut game, &mut rng).unwrap();
            assert!(game.board_position().is_last_position());
            assert!(board_matches_cursor(&game.board_position()));
        }
    }
}
