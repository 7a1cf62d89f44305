//! Tests for engine turn flow through the public API.

use nxn_tictactoe::{
    GameEngine, GameErrorKind, GameState, GameStateChanged, Player, SpaceValue,
};
use std::cell::RefCell;
use std::rc::Rc;

fn players() -> (Player, Player) {
    (
        Player::new("X", SpaceValue::MarkerA).expect("valid player"),
        Player::new("O", SpaceValue::MarkerB).expect("valid player"),
    )
}

#[test]
fn test_turn_flow_to_row_win() {
    let (x, o) = players();
    let mut engine = GameEngine::builder()
        .player1(x.clone())
        .player2(o)
        .starting_player(x)
        .board_size(3)
        .build()
        .expect("valid engine");

    engine.make_move(0, 0).expect("X move");
    assert_eq!(engine.current_player().name(), "O");
    assert_eq!(engine.current_game_state(), &GameState::InPlay);

    engine.make_move(0, 1).expect("O move");
    assert_eq!(engine.current_player().name(), "X");

    engine.make_move(1, 0).expect("X move");
    engine.make_move(1, 1).expect("O move");
    engine.make_move(2, 0).expect("X move");

    assert_eq!(engine.current_game_state(), &GameState::Won("Row0".to_string()));
    assert_eq!(engine.current_game_state().to_string(), "WonRow0");
    assert_eq!(engine.current_player().name(), "X");
    assert_eq!(engine.player1().total_wins(), 1);
    assert_eq!(engine.player2().total_wins(), 0);
}

#[test]
fn test_board_values_map_back_to_coordinates() {
    let (x, o) = players();
    let mut engine = GameEngine::new(x, o, 4).expect("valid engine");
    engine.make_move(3, 1).expect("X move");
    engine.make_move(0, 2).expect("O move");

    let size = engine.board_size();
    for (i, value) in engine.board_values().enumerate() {
        let (col, row) = (i % size, i / size);
        let expected = match (col, row) {
            (3, 1) => SpaceValue::MarkerA,
            (0, 2) => SpaceValue::MarkerB,
            _ => SpaceValue::Available,
        };
        assert_eq!(value, expected, "space ({}, {})", col, row);
        assert_eq!(
            engine.space_available(col, row).expect("in range"),
            expected == SpaceValue::Available
        );
    }
}

#[test]
fn test_failed_move_is_atomic_and_silent() {
    let (x, o) = players();
    let mut engine = GameEngine::new(x, o, 3).expect("valid engine");
    let notifications = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&notifications);
    engine.subscribe(move |_: &GameStateChanged| *counter.borrow_mut() += 1);

    engine.make_move(1, 1).expect("X move");
    let board = engine.board().clone();

    let err = engine.make_move(1, 1).expect_err("space taken");
    assert_eq!(err.kind(), GameErrorKind::InvalidMove);
    assert_eq!(engine.board(), &board);
    assert_eq!(engine.current_player().name(), "O");
    assert_eq!(*notifications.borrow(), 1);
}

#[test]
fn test_listeners_called_in_registration_order() {
    let (x, o) = players();
    let mut engine = GameEngine::new(x, o, 3).expect("valid engine");
    let order = Rc::new(RefCell::new(Vec::new()));
    for tag in 0..3 {
        let order = Rc::clone(&order);
        engine.subscribe(move |change: &GameStateChanged| {
            order.borrow_mut().push((tag, change.state.to_string()));
        });
    }

    engine.make_move(2, 2).expect("X move");
    assert_eq!(
        *order.borrow(),
        vec![
            (0, "InPlay".to_string()),
            (1, "InPlay".to_string()),
            (2, "InPlay".to_string()),
        ]
    );
}

#[test]
fn test_square_win_on_large_board() {
    let (x, o) = players();
    let mut engine = GameEngine::builder()
        .player1(x)
        .player2(o)
        .board_size(5)
        .include_squares(true)
        .build()
        .expect("valid engine");

    for (col, row) in [(2, 2), (0, 0), (3, 2), (4, 4), (2, 3), (0, 4), (3, 3)] {
        engine.make_move(col, row).expect("legal move");
    }
    assert_eq!(
        engine.current_game_state(),
        &GameState::Won("Square22".to_string())
    );
    assert!(engine.is_winning_space(3, 3));
}

#[test]
fn test_two_by_two_board() {
    let (x, o) = players();
    let mut engine = GameEngine::new(x, o, 2).expect("valid engine");
    engine.make_move(0, 0).expect("X move");
    engine.make_move(1, 0).expect("O move");
    engine.make_move(0, 1).expect("X move");
    assert_eq!(
        engine.current_game_state(),
        &GameState::Won("Column0".to_string())
    );
}
