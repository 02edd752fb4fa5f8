//! Game session: the contract a host (view, network glue, test) drives.
//!
//! A session owns the board, the regret allowances and the configuration.
//! Hosts never touch the board directly; they propose moves, ask for
//! take-backs and receive immutable snapshots through [`GameObserver`].

use tracing::{debug, error, info};

use crate::board::{Board, BoardSnapshot};
use crate::config::GameConfig;
use crate::error::{MoveError, RegretError};
use crate::regret::RegretTracker;
use crate::status::{GameStatus, classify};
use crate::types::{Color, Coord, MoveRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    Checkmate,
    NoLegalMove,
    Resignation,
    DrawAgreed,
}

/// How a finished game ended. `winner` is `None` for a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub winner: Option<Color>,
    pub reason: EndReason,
}

impl Outcome {
    fn from_status(status: GameStatus) -> Option<Outcome> {
        match status {
            GameStatus::Checkmate(w) => Some(Outcome {
                winner: Some(w),
                reason: EndReason::Checkmate,
            }),
            GameStatus::NoMove(w) => Some(Outcome {
                winner: Some(w),
                reason: EndReason::NoLegalMove,
            }),
            GameStatus::Ongoing | GameStatus::Check(_) => None,
        }
    }

    /// Ended by the rules of play rather than by the players' agreement.
    pub fn by_rule(self) -> bool {
        matches!(self.reason, EndReason::Checkmate | EndReason::NoLegalMove)
    }
}

/// Everything a view needs after a committed move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveEvent {
    pub mover: Color,
    pub record: MoveRecord,
    pub snapshot: BoardSnapshot,
    pub side_to_move: Color,
    pub status: GameStatus,
    pub outcome: Option<Outcome>,
}

/// Host-side listener. Implementations render, log or forward; they get
/// read-only data and cannot mutate the session. Any selection or
/// highlight state belongs to the implementor and should be cleared in
/// `on_move`.
pub trait GameObserver {
    fn on_move(&mut self, event: &MoveEvent);

    fn on_regret(&mut self, _side: Color, _record: &MoveRecord, _snapshot: &BoardSnapshot) {}

    fn on_reset(&mut self, _snapshot: &BoardSnapshot) {}

    /// Called for endings that do not come from a move (resignation, draw).
    fn on_game_over(&mut self, _outcome: &Outcome) {}
}

pub struct Game {
    board: Board,
    regret: RegretTracker,
    config: GameConfig,
    status: GameStatus,
    outcome: Option<Outcome>,
    observers: Vec<Box<dyn GameObserver>>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self {
            board: Board::startpos(),
            regret: RegretTracker::new(config.max_regret),
            config,
            status: GameStatus::Ongoing,
            outcome: None,
            observers: Vec::new(),
        }
    }

    /// Start from an arbitrary position, e.g. one parsed from FEN.
    pub fn from_board(config: GameConfig, board: Board) -> Self {
        let status = classify(&board);
        Self {
            board,
            regret: RegretTracker::new(config.max_regret),
            config,
            status,
            outcome: Outcome::from_status(status),
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    /// Reset to the opening position with full regret allowances.
    pub fn initialize(&mut self) {
        self.board.initialize();
        self.regret.reset();
        self.status = GameStatus::Ongoing;
        self.outcome = None;
        info!(
            red = %self.config.red_player,
            black = %self.config.black_player,
            "board initialised, red to move"
        );
        let snapshot = self.board.snapshot();
        for obs in &mut self.observers {
            obs.on_reset(&snapshot);
        }
    }

    /// Validate and commit a move for the side to move. Local clicks and
    /// moves received from a peer both come through here.
    pub fn attempt_move(&mut self, from: Coord, to: Coord) -> Result<MoveEvent, MoveError> {
        if self.outcome.is_some() {
            return Err(MoveError::GameOver);
        }
        let mover = self.board.side_to_move();
        let committed = match self.board.try_move(from, to) {
            Ok(c) => c,
            Err(e) if e.is_fatal() => {
                error!(%from, %to, error = %e, "board is corrupted");
                return Err(e);
            }
            Err(e) => {
                debug!(%from, %to, %mover, reason = %e, "move rejected");
                return Err(e);
            }
        };

        self.regret.record_move(mover);
        self.status = classify(&self.board);
        self.outcome = Outcome::from_status(self.status);
        info!(%from, %to, %mover, check = committed.gives_check, "move committed");
        if let Some(o) = self.outcome {
            info!(winner = ?o.winner, reason = ?o.reason, "game over");
        }

        let event = MoveEvent {
            mover,
            record: committed.record,
            snapshot: self.board.snapshot(),
            side_to_move: self.board.side_to_move(),
            status: self.status,
            outcome: self.outcome,
        };
        for obs in &mut self.observers {
            obs.on_move(&event);
        }
        Ok(event)
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.board.in_check(color)
    }

    /// Classify the current position afresh.
    pub fn classify(&self) -> GameStatus {
        classify(&self.board)
    }

    /// Take back `side`'s most recent move. A game that ended by checkmate
    /// or by having no move is reopened; resignations and agreed draws are
    /// final.
    pub fn try_regret(&mut self, side: Color) -> Result<MoveRecord, RegretError> {
        if let Some(o) = self.outcome
            && !o.by_rule()
        {
            return Err(RegretError::GameOver);
        }
        let record = match self.regret.try_regret(&mut self.board, side) {
            Ok(r) => r,
            Err(e) => {
                debug!(%side, reason = %e, "regret refused");
                return Err(e);
            }
        };
        self.status = classify(&self.board);
        self.outcome = Outcome::from_status(self.status);
        info!(
            %side,
            remaining = self.regret.remaining(side),
            "regret granted"
        );
        let snapshot = self.board.snapshot();
        for obs in &mut self.observers {
            obs.on_regret(side, &record, &snapshot);
        }
        Ok(record)
    }

    pub fn regret_remaining(&self, side: Color) -> u32 {
        self.regret.remaining(side)
    }

    /// `side` concedes. Returns `None` if the game was already over.
    pub fn resign(&mut self, side: Color) -> Option<Outcome> {
        self.finish(Outcome {
            winner: Some(side.other()),
            reason: EndReason::Resignation,
        })
    }

    /// Both players agreed to a draw. Returns `None` if the game was
    /// already over.
    pub fn agree_draw(&mut self) -> Option<Outcome> {
        self.finish(Outcome {
            winner: None,
            reason: EndReason::DrawAgreed,
        })
    }

    fn finish(&mut self, outcome: Outcome) -> Option<Outcome> {
        if self.outcome.is_some() {
            return None;
        }
        self.outcome = Some(outcome);
        info!(winner = ?outcome.winner, reason = ?outcome.reason, "game over");
        for obs in &mut self.observers {
            obs.on_game_over(&outcome);
        }
        Some(outcome)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Status as of the last committed move or regret.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
