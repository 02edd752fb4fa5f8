use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use xiangqi_core::*;

fn c(file: i8, rank: i8) -> Coord {
    Coord::new(file, rank)
}

fn game_from(fen: &str) -> Game {
    let board = Board::from_fen(fen).unwrap_or_else(|e| panic!("bad FEN '{fen}': {e}"));
    Game::from_board(GameConfig::default(), board)
}

#[test]
fn checkmate_by_two_chariots() {
    // The chariot on (0,8) covers the general's step forward; the second
    // one sweeps the back rank.
    let mut game = game_from("3k5/9/9/9/8r/9/9/9/r8/4K4 b");
    assert_eq!(game.status(), GameStatus::Ongoing);

    let event = game.attempt_move(c(8, 4), c(8, 9)).unwrap();
    assert_eq!(event.status, GameStatus::Checkmate(Color::Black));
    assert!(game.is_in_check(Color::Red));
    assert!(legal_moves(game.board()).is_empty());
    assert_eq!(game.outcome().and_then(|o| o.winner), Some(Color::Black));
}

#[test]
fn no_legal_move_without_check_is_a_loss() {
    let game = game_from("3k5/9/9/9/5r3/9/9/9/r8/4K4 w");
    assert!(!game.is_in_check(Color::Red));
    assert_eq!(game.classify(), GameStatus::NoMove(Color::Black));
    assert_eq!(
        game.outcome().map(|o| o.reason),
        Some(EndReason::NoLegalMove)
    );
}

#[test]
fn soldier_gains_sideways_steps_after_the_river() {
    let mut game = Game::default();
    assert!(matches!(
        game.attempt_move(c(4, 6), c(3, 6)),
        Err(MoveError::GeometryViolation {
            kind: PieceKind::Soldier,
            ..
        })
    ));

    for (from, to) in [
        (c(4, 6), c(4, 5)),
        (c(0, 3), c(0, 4)),
        (c(4, 5), c(4, 4)),
        (c(0, 4), c(0, 5)),
    ] {
        game.attempt_move(from, to)
            .unwrap_or_else(|e| panic!("{from}->{to} refused: {e}"));
    }

    assert!(game.attempt_move(c(4, 4), c(3, 4)).is_ok());
    game.attempt_move(c(0, 5), c(1, 5)).unwrap();
    // Never backwards.
    assert!(matches!(
        game.attempt_move(c(3, 4), c(3, 5)),
        Err(MoveError::GeometryViolation { .. })
    ));
}

#[test]
fn pinned_guard_leaves_the_grid_untouched() {
    let mut game = game_from("3k5/9/4r4/9/9/9/9/9/4A4/4K4 w");
    let before = game.snapshot();
    assert_eq!(
        game.attempt_move(c(4, 8), c(3, 7)),
        Err(MoveError::WouldCauseSelfCheck)
    );
    assert_eq!(game.snapshot(), before);
    assert_eq!(game.board().check_status(), CheckStatus::WouldCauseSelfCheck);
    for at in Coord::all() {
        assert_eq!(game.snapshot().piece_at(at), before.piece_at(at));
    }
    // The general itself may step aside.
    game.attempt_move(c(4, 9), c(5, 9)).unwrap();
}

#[test]
fn random_playout_unwinds_to_the_start() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..8 {
        let mut board = Board::startpos();
        let start = board.snapshot();
        let mut played = 0;

        for _ in 0..40 {
            let moves = legal_moves(&board);
            let Some(mv) = moves.choose(&mut rng).copied() else {
                break;
            };
            board.try_move(mv.from, mv.to).unwrap();
            played += 1;

            let reparsed = Board::from_fen(&board.to_fen()).unwrap();
            assert_eq!(reparsed.snapshot(), board.snapshot());
        }

        assert_eq!(board.history().len(), played);
        for _ in 0..played {
            assert!(board.undo_last().is_some());
        }
        assert_eq!(board.snapshot(), start);
        assert_eq!(board.undo_last(), None);
    }
}

#[test]
fn peer_moves_are_validated_like_local_ones() {
    let mut game = Game::default();

    let illegal: WireMessage = serde_json::from_str(
        r#"{"type":"move","from":{"file":0,"rank":9},"to":{"file":0,"rank":5}}"#,
    )
    .unwrap();
    let (from, to) = illegal.move_coords().unwrap();
    let before = game.snapshot();
    assert!(game.attempt_move(from, to).is_err());
    assert_eq!(game.snapshot(), before);

    let legal: WireMessage = serde_json::from_str(
        r#"{"type":"move","from":{"file":7,"rank":7},"to":{"file":4,"rank":7}}"#,
    )
    .unwrap();
    let (from, to) = legal.move_coords().unwrap();
    let event = game.attempt_move(from, to).unwrap();
    assert_eq!(move_to_iccs(Move::new(from, to)), "h2e2");

    let reply = WireMessage::Move {
        from: event.record.from,
        to: event.record.to,
    };
    let json = serde_json::to_string(&reply).unwrap();
    assert_eq!(serde_json::from_str::<WireMessage>(&json).unwrap(), reply);
}

#[test]
fn each_side_gets_three_regrets() {
    let mut game = Game::default();
    for left in (0..3).rev() {
        game.attempt_move(c(7, 7), c(4, 7)).unwrap();
        game.try_regret(Color::Red).unwrap();
        assert_eq!(game.regret_remaining(Color::Red), left);
    }
    game.attempt_move(c(7, 7), c(4, 7)).unwrap();
    assert_eq!(
        game.try_regret(Color::Red),
        Err(RegretError::RegretExhausted(Color::Red))
    );
    assert_eq!(game.regret_remaining(Color::Black), 3);
}

#[test]
fn config_file_drives_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.toml");
    std::fs::write(&path, "max_regret = 0\nred_player = \"Alice\"\n").unwrap();

    let config = GameConfig::load(&path).unwrap();
    assert_eq!(config.player_name(Color::Red), "Alice");
    assert_eq!(config.player_name(Color::Black), "Black");

    let mut game = Game::new(config);
    game.attempt_move(c(7, 7), c(4, 7)).unwrap();
    assert_eq!(
        game.try_regret(Color::Red),
        Err(RegretError::RegretExhausted(Color::Red))
    );
}
