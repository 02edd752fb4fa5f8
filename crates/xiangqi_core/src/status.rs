use serde::{Deserialize, Serialize};

use crate::{board::Board, movegen::has_legal_move, types::Color};

/// Classification of a position from the point of view of the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    /// The given colour is in check but has a way out.
    Check(Color),
    /// The side to move is in check with no legal move; the colour is the winner.
    Checkmate(Color),
    /// The side to move is not in check but has no legal move. Under these
    /// rules that is a loss, not a draw; the colour is the winner.
    NoMove(Color),
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate(_) | GameStatus::NoMove(_))
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate(c) | GameStatus::NoMove(c) => Some(c),
            _ => None,
        }
    }
}

/// Classify the position for the side to move by searching for any legal
/// move; the search stops at the first one found.
pub fn classify(board: &Board) -> GameStatus {
    let side = board.side_to_move();
    let attacked = board.in_check(side);
    match (has_legal_move(board), attacked) {
        (true, false) => GameStatus::Ongoing,
        (true, true) => GameStatus::Check(side),
        (false, true) => GameStatus::Checkmate(side.other()),
        (false, false) => GameStatus::NoMove(side.other()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startpos_is_ongoing() {
        assert_eq!(classify(&Board::startpos()), GameStatus::Ongoing);
    }

    #[test]
    fn test_check_with_escape() {
        // Black chariot on (0,9) checks the red general on (4,9) along the
        // back rank; the general can step up to (4,8).
        let b = Board::from_fen("3k5/9/9/9/9/9/9/9/9/r3K4 w").unwrap();
        assert_eq!(classify(&b), GameStatus::Check(Color::Red));
    }

    #[test]
    fn test_terminal_helpers() {
        assert!(GameStatus::Checkmate(Color::Black).is_terminal());
        assert!(GameStatus::NoMove(Color::Red).is_terminal());
        assert!(!GameStatus::Check(Color::Red).is_terminal());
        assert_eq!(GameStatus::NoMove(Color::Red).winner(), Some(Color::Red));
        assert_eq!(GameStatus::Ongoing.winner(), None);
    }
}
