use crate::board::Board;
use crate::error::MoveError;
use crate::rules::is_valid_move;
use crate::types::*;

/// A committed move and the check state it leaves the opponent in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub record: MoveRecord,
    /// The new side to move is in check.
    pub gives_check: bool,
}

impl Board {
    /// Validate and commit a move for the side to move.
    ///
    /// On `Err` the grid, turn and history are exactly as they were before
    /// the call; only the diagnostic [`CheckStatus`] is updated.
    pub fn try_move(&mut self, from: Coord, to: Coord) -> Result<MoveOutcome, MoveError> {
        self.set_check_status(CheckStatus::None);

        for c in [from, to] {
            if !c.in_bounds() {
                return Err(MoveError::OutOfBounds(c));
            }
        }
        let mover = self.side_to_move();
        let piece = self.piece_at(from).ok_or(MoveError::NoPieceAtSource(from))?;
        if piece.color != mover {
            return Err(MoveError::WrongTurnOwner {
                expected: mover,
                found: piece.color,
            });
        }
        if let Some(target) = self.piece_at(to)
            && target.color == mover
        {
            return Err(MoveError::BlockedBySameColor(to));
        }
        if self.general_pos(mover).is_none() {
            return Err(MoveError::NoGeneralFound(mover));
        }

        let was_in_check = self.in_check(mover);
        if was_in_check {
            self.set_check_status(CheckStatus::AlreadyInCheck);
        }

        if !is_valid_move(self, from, to) {
            return Err(MoveError::GeometryViolation {
                kind: piece.kind,
                from,
                to,
            });
        }

        let captured = self.relocate(from, to);

        if self.in_check(mover) {
            self.restore(from, to, captured);
            if was_in_check {
                return Err(MoveError::AlreadyInCheckUnresolved);
            }
            self.set_check_status(CheckStatus::WouldCauseSelfCheck);
            return Err(MoveError::WouldCauseSelfCheck);
        }

        // A general may not end on an open file facing the other general.
        // Taking the enemy general removes it, so a capture never trips this.
        if piece.kind == PieceKind::General && self.generals_facing() {
            self.restore(from, to, captured);
            self.set_check_status(CheckStatus::FlyingGeneralViolation);
            return Err(MoveError::FlyingGeneralViolation);
        }

        let record = MoveRecord { from, to, captured };
        self.set_check_status(CheckStatus::None);
        self.push_record(record);
        self.flip_turn();
        let gives_check = self.in_check(self.side_to_move());
        Ok(MoveOutcome {
            record,
            gives_check,
        })
    }

    /// Pop the last committed move and reverse it, handing the turn back.
    pub fn undo_last(&mut self) -> Option<MoveRecord> {
        let record = self.pop_record()?;
        self.restore(record.from, record.to, record.captured);
        self.flip_turn();
        self.set_check_status(CheckStatus::None);
        Some(record)
    }
}

#[cfg(test)]
#[path = "legality_tests.rs"]
mod legality_tests;
