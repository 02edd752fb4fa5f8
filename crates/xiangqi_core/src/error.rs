use std::path::PathBuf;

use crate::types::{Color, Coord, PieceKind};

/// Reasons a proposed move is refused. Every variant except
/// [`MoveError::NoGeneralFound`] is an ordinary game condition and leaves the
/// board untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("point {0} is off the board")]
    OutOfBounds(Coord),

    #[error("no piece at {0}")]
    NoPieceAtSource(Coord),

    #[error("it is {expected}'s turn, but the piece at the source is {found}")]
    WrongTurnOwner { expected: Color, found: Color },

    #[error("destination {0} holds a piece of the mover's own colour")]
    BlockedBySameColor(Coord),

    #[error("{kind:?} cannot move from {from} to {to}")]
    GeometryViolation {
        kind: PieceKind,
        from: Coord,
        to: Coord,
    },

    #[error("the mover is in check and this move does not resolve it")]
    AlreadyInCheckUnresolved,

    #[error("the move would leave the mover's own general in check")]
    WouldCauseSelfCheck,

    #[error("the generals would face each other on an open file")]
    FlyingGeneralViolation,

    #[error("no {0} general on the board")]
    NoGeneralFound(Color),

    #[error("the game is already over")]
    GameOver,
}

impl MoveError {
    /// True when the board is corrupted and the session should be abandoned.
    pub fn is_fatal(&self) -> bool {
        matches!(self, MoveError::NoGeneralFound(_))
    }
}

/// Reasons a take-back request is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegretError {
    #[error("no move to take back since the last regret")]
    NoPriorMove,

    #[error("{0} has no regrets left")]
    RegretExhausted(Color),

    #[error("{requested} cannot take back a move made by {last_mover}")]
    NotOwnMove { requested: Color, last_mover: Color },

    #[error("the game was ended by the players and cannot be reopened")]
    GameOver,
}

/// Errors from parsing a FEN position string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("expected 10 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} does not describe exactly 9 files")]
    FileCount { rank: usize },

    #[error("invalid piece letter '{0}'")]
    PieceLetter(char),

    #[error("invalid side to move '{0}'")]
    SideToMove(String),

    #[error("invalid fullmove number '{0}'")]
    MoveNumber(String),

    #[error("more than one {0} general")]
    DuplicateGeneral(Color),

    #[error("{color} {kind:?} cannot stand on {at}")]
    IllegalPlacement {
        kind: PieceKind,
        color: Color,
        at: Coord,
    },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
