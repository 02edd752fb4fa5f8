//! # xiangqi_core
//!
//! Rule engine for Xiangqi (Chinese chess), usable without any rendering
//! surface:
//!
//! - [`board`]: grid, side to move, move history, FEN
//! - [`rules`]: per-kind movement geometry
//! - [`check`]: attack detection and the flying-general face-off
//! - [`legality`]: transactional move validation and undo
//! - [`movegen`] / [`status`]: legal-move enumeration and checkmate / no-move classification
//! - [`regret`]: bounded per-colour take-backs
//! - [`game`]: the session contract hosts call into
//! - [`notation`], [`wire`], [`config`], [`error`], [`perft`]

pub mod board;
pub mod check;
pub mod config;
pub mod error;
pub mod game;
pub mod legality;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod regret;
pub mod rules;
pub mod status;
pub mod types;
pub mod wire;

pub use board::*;
pub use config::*;
pub use error::*;
pub use game::*;
pub use legality::MoveOutcome;
pub use movegen::*;
pub use notation::*;
pub use perft::perft;
pub use regret::*;
pub use rules::is_valid_move;
pub use status::*;
pub use types::*;
pub use wire::WireMessage;
