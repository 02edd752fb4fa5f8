//! Bounded take-backs ("regrets").
//!
//! Each colour may take back its own most recent move a limited number of
//! times per game. One successful regret undoes exactly one ply; another
//! regret needs a real move in between.

use crate::board::Board;
use crate::error::RegretError;
use crate::types::{Color, MoveRecord};

pub const DEFAULT_MAX_REGRET: u32 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegretTracker {
    max: u32,
    remaining: [u32; 2],
    last_move_side: Option<Color>,
}

impl Default for RegretTracker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REGRET)
    }
}

impl RegretTracker {
    pub fn new(max: u32) -> Self {
        Self {
            max,
            remaining: [max; 2],
            last_move_side: None,
        }
    }

    /// Restore full allowances, as at the start of a game.
    pub fn reset(&mut self) {
        self.remaining = [self.max; 2];
        self.last_move_side = None;
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn remaining(&self, side: Color) -> u32 {
        self.remaining[side.idx()]
    }

    pub fn last_move_side(&self) -> Option<Color> {
        self.last_move_side
    }

    /// Note that `side` just committed a move.
    pub fn record_move(&mut self, side: Color) {
        self.last_move_side = Some(side);
    }

    /// Whether `side` could take back right now, without doing it.
    pub fn check(&self, side: Color) -> Result<(), RegretError> {
        let last = self.last_move_side.ok_or(RegretError::NoPriorMove)?;
        if last != side {
            return Err(RegretError::NotOwnMove {
                requested: side,
                last_mover: last,
            });
        }
        if self.remaining[side.idx()] == 0 {
            return Err(RegretError::RegretExhausted(side));
        }
        Ok(())
    }

    /// Take back `side`'s last move on `board`.
    pub fn try_regret(&mut self, board: &mut Board, side: Color) -> Result<MoveRecord, RegretError> {
        self.check(side)?;
        let record = board.undo_last().ok_or(RegretError::NoPriorMove)?;
        self.remaining[side.idx()] -= 1;
        self.last_move_side = None;
        Ok(record)
    }
}

#[cfg(test)]
#[path = "regret_tests.rs"]
mod regret_tests;
