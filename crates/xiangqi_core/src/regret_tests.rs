use super::*;
use crate::types::Coord;

fn c(file: i8, rank: i8) -> Coord {
    Coord::new(file, rank)
}

/// Commit a move on the board and tell the tracker about it.
fn play(board: &mut Board, tracker: &mut RegretTracker, from: Coord, to: Coord) {
    let mover = board.side_to_move();
    board.try_move(from, to).unwrap();
    tracker.record_move(mover);
}

#[test]
fn test_no_prior_move() {
    let mut board = Board::startpos();
    let mut tracker = RegretTracker::default();
    assert_eq!(
        tracker.try_regret(&mut board, Color::Red),
        Err(RegretError::NoPriorMove)
    );
    assert_eq!(tracker.remaining(Color::Red), DEFAULT_MAX_REGRET);
}

#[test]
fn test_single_regret_restores_position() {
    let mut board = Board::startpos();
    let mut tracker = RegretTracker::new(3);
    let start = board.snapshot();
    play(&mut board, &mut tracker, c(7, 7), c(4, 7));

    let record = tracker.try_regret(&mut board, Color::Red).unwrap();
    assert_eq!(record.from, c(7, 7));
    assert_eq!(board.snapshot(), start);
    assert_eq!(board.side_to_move(), Color::Red);
    assert_eq!(tracker.remaining(Color::Red), 2);
    assert_eq!(tracker.remaining(Color::Black), 3);
    assert_eq!(tracker.last_move_side(), None);
}

#[test]
fn test_one_ply_per_regret() {
    let mut board = Board::startpos();
    let mut tracker = RegretTracker::new(3);
    play(&mut board, &mut tracker, c(7, 7), c(4, 7));
    play(&mut board, &mut tracker, c(7, 0), c(6, 2));
    tracker.try_regret(&mut board, Color::Black).unwrap();
    // Red's cannon move is still on the board, but a second regret needs a
    // real move first.
    assert_eq!(board.history().len(), 1);
    assert_eq!(
        tracker.try_regret(&mut board, Color::Red),
        Err(RegretError::NoPriorMove)
    );
}

#[test]
fn test_only_own_move() {
    let mut board = Board::startpos();
    let mut tracker = RegretTracker::new(3);
    play(&mut board, &mut tracker, c(7, 7), c(4, 7));
    assert_eq!(
        tracker.try_regret(&mut board, Color::Black),
        Err(RegretError::NotOwnMove {
            requested: Color::Black,
            last_mover: Color::Red
        })
    );
    assert_eq!(board.history().len(), 1);
}

#[test]
fn test_exhausts_after_max() {
    let mut board = Board::startpos();
    let mut tracker = RegretTracker::new(2);
    for _ in 0..2 {
        play(&mut board, &mut tracker, c(7, 7), c(4, 7));
        tracker.try_regret(&mut board, Color::Red).unwrap();
    }
    play(&mut board, &mut tracker, c(7, 7), c(4, 7));
    assert_eq!(
        tracker.try_regret(&mut board, Color::Red),
        Err(RegretError::RegretExhausted(Color::Red))
    );
    assert_eq!(board.history().len(), 1);
}

#[test]
fn test_zero_allowance() {
    let mut board = Board::startpos();
    let mut tracker = RegretTracker::new(0);
    play(&mut board, &mut tracker, c(7, 7), c(4, 7));
    assert_eq!(
        tracker.check(Color::Red),
        Err(RegretError::RegretExhausted(Color::Red))
    );
}

#[test]
fn test_reset_restores_allowance() {
    let mut board = Board::startpos();
    let mut tracker = RegretTracker::new(1);
    play(&mut board, &mut tracker, c(7, 7), c(4, 7));
    tracker.try_regret(&mut board, Color::Red).unwrap();
    assert_eq!(tracker.remaining(Color::Red), 0);
    tracker.reset();
    assert_eq!(tracker.remaining(Color::Red), 1);
    assert_eq!(tracker.max(), 1);
}
