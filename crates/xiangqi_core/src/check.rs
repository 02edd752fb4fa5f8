use crate::board::Board;
use crate::rules::{count_between, is_valid_move};
use crate::types::*;

impl Board {
    /// True if any enemy piece could move onto `color`'s general.
    ///
    /// A missing general counts as attacked so callers fail closed; the
    /// legality path reports the corruption separately.
    pub fn in_check(&self, color: Color) -> bool {
        let Some(gpos) = self.general_pos(color) else {
            return true;
        };
        self.is_square_attacked(gpos, color.other())
    }

    pub fn is_square_attacked(&self, target: Coord, by: Color) -> bool {
        self.pieces_of(by)
            .any(|pc| is_valid_move(self, pc.pos, target))
    }

    /// Both generals on one file with nothing between them.
    pub fn generals_facing(&self) -> bool {
        match (self.general_pos(Color::Red), self.general_pos(Color::Black)) {
            (Some(red), Some(black)) => {
                red.file == black.file && count_between(self, red, black) == Some(0)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::types::*;

    #[test]
    fn test_startpos_nobody_in_check() {
        let b = Board::startpos();
        assert!(!b.in_check(Color::Red));
        assert!(!b.in_check(Color::Black));
        assert!(!b.generals_facing());
    }

    #[test]
    fn test_chariot_gives_check_on_open_file() {
        let b = Board::from_fen("4k4/9/9/9/9/9/9/9/9/3K1R3 b").unwrap();
        assert!(!b.in_check(Color::Black));
        let b = Board::from_fen("4k4/9/9/9/9/9/9/9/9/3K4R b").unwrap();
        assert!(!b.in_check(Color::Black));
        let b = Board::from_fen("4k3R/9/9/9/9/9/9/9/9/3K5 b").unwrap();
        assert!(b.in_check(Color::Black));
    }

    #[test]
    fn test_cannon_needs_screen_to_check() {
        // Red cannon on (4,7) aims at the black general on (4,0).
        let open = Board::from_fen("4k4/9/9/9/9/9/9/4C4/9/3K5 b").unwrap();
        assert!(!open.in_check(Color::Black));
        let screened = Board::from_fen("4k4/9/9/4p4/9/9/9/4C4/9/3K5 b").unwrap();
        assert!(screened.in_check(Color::Black));
        let double = Board::from_fen("4k4/9/4p4/4p4/9/9/9/4C4/9/3K5 b").unwrap();
        assert!(!double.in_check(Color::Black));
    }

    #[test]
    fn test_knight_check_respects_leg() {
        // Red knight on (3,2) attacks (4,0) through the leg at (3,1).
        let free = Board::from_fen("4k4/9/3N5/9/9/9/9/9/9/3K5 b").unwrap();
        assert!(free.in_check(Color::Black));
        let hobbled = Board::from_fen("4k4/3a5/3N5/9/9/9/9/9/9/3K5 b").unwrap();
        assert!(!hobbled.in_check(Color::Black));
    }

    #[test]
    fn test_missing_general_counts_as_attacked() {
        let b = Board::from_fen("9/9/9/9/9/9/9/9/9/4K4 w").unwrap();
        assert!(b.in_check(Color::Black));
        assert!(!b.in_check(Color::Red));
    }

    #[test]
    fn test_generals_facing() {
        let facing = Board::from_fen("4k4/9/9/9/9/9/9/9/9/4K4 w").unwrap();
        assert!(facing.generals_facing());
        let blocked = Board::from_fen("4k4/9/9/9/4p4/9/9/9/9/4K4 w").unwrap();
        assert!(!blocked.generals_facing());
        let offset = Board::from_fen("4k4/9/9/9/9/9/9/9/9/3K5 w").unwrap();
        assert!(!offset.generals_facing());
    }
}
