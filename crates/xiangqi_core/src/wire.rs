//! Messages exchanged between two running instances.
//!
//! The transport decides how these travel; the engine only ever needs the
//! `(from, to)` pair out of a [`WireMessage::Move`], and that pair is
//! re-validated like any local input.

use serde::{Deserialize, Serialize};

use crate::types::Coord;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireMessage {
    Move { from: Coord, to: Coord },
    RegretRequest,
    DrawOffer,
    DrawAccepted,
    DrawRejected,
    Surrender,
    RestartRequest,
    RestartAccepted,
    RestartRejected,
    Disconnect,
}

impl WireMessage {
    pub fn move_coords(&self) -> Option<(Coord, Coord)> {
        match *self {
            WireMessage::Move { from, to } => Some((from, to)),
            _ => None,
        }
    }
}
