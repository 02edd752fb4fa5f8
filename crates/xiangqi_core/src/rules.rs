//! Per-kind movement geometry.
//!
//! Each rule answers "may this piece go from `from` to `to` on this grid",
//! ignoring whose turn it is and whether any general is in check. The same
//! predicates serve as attack tests: in Xiangqi a piece attacks exactly the
//! points it could move to.

use crate::board::Board;
use crate::types::*;

type RuleFn = fn(&Board, Piece, Coord, Coord) -> bool;

/// Rule table lookup. Exhaustive, so a new kind cannot ship without a rule.
fn rule_for(kind: PieceKind) -> RuleFn {
    match kind {
        PieceKind::General => general,
        PieceKind::Guard => guard,
        PieceKind::Bishop => bishop,
        PieceKind::Knight => knight,
        PieceKind::Chariot => chariot,
        PieceKind::Cannon => cannon,
        PieceKind::Soldier => soldier,
    }
}

/// Geometric legality of moving the piece on `from` to `to`.
///
/// Rejects off-board points, an empty source, a null move and landing on a
/// piece of the mover's own colour before dispatching to the kind's rule.
pub fn is_valid_move(board: &Board, from: Coord, to: Coord) -> bool {
    if !from.in_bounds() || !to.in_bounds() || from == to {
        return false;
    }
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    if let Some(target) = board.piece_at(to)
        && target.color == piece.color
    {
        return false;
    }
    rule_for(piece.kind)(board, piece, from, to)
}

/// Number of pieces strictly between two points on a shared file or rank,
/// or `None` if the points are not aligned.
pub fn count_between(board: &Board, from: Coord, to: Coord) -> Option<usize> {
    if from.file == to.file {
        let (lo, hi) = (from.rank.min(to.rank), from.rank.max(to.rank));
        Some(
            (lo + 1..hi)
                .filter(|&r| board.piece_at(Coord::new(from.file, r)).is_some())
                .count(),
        )
    } else if from.rank == to.rank {
        let (lo, hi) = (from.file.min(to.file), from.file.max(to.file));
        Some(
            (lo + 1..hi)
                .filter(|&f| board.piece_at(Coord::new(f, from.rank)).is_some())
                .count(),
        )
    } else {
        None
    }
}

fn deltas(from: Coord, to: Coord) -> (i8, i8) {
    (to.file - from.file, to.rank - from.rank)
}

fn general(_board: &Board, pc: Piece, from: Coord, to: Coord) -> bool {
    let (df, dr) = deltas(from, to);
    to.in_palace(pc.color) && df.abs() + dr.abs() == 1
}

fn guard(_board: &Board, pc: Piece, from: Coord, to: Coord) -> bool {
    let (df, dr) = deltas(from, to);
    to.in_palace(pc.color) && df.abs() == 1 && dr.abs() == 1
}

fn bishop(board: &Board, pc: Piece, from: Coord, to: Coord) -> bool {
    let (df, dr) = deltas(from, to);
    if df.abs() != 2 || dr.abs() != 2 {
        return false;
    }
    // bishop's eye
    let eye = Coord::new(from.file + df / 2, from.rank + dr / 2);
    board.piece_at(eye).is_none() && to.on_own_side(pc.color)
}

fn knight(board: &Board, _pc: Piece, from: Coord, to: Coord) -> bool {
    let (df, dr) = deltas(from, to);
    let leg = match (df.abs(), dr.abs()) {
        (1, 2) => Coord::new(from.file, from.rank + dr / 2),
        (2, 1) => Coord::new(from.file + df / 2, from.rank),
        _ => return false,
    };
    board.piece_at(leg).is_none()
}

fn chariot(board: &Board, _pc: Piece, from: Coord, to: Coord) -> bool {
    count_between(board, from, to) == Some(0)
}

fn cannon(board: &Board, _pc: Piece, from: Coord, to: Coord) -> bool {
    let Some(between) = count_between(board, from, to) else {
        return false;
    };
    // Same-colour targets were rejected by the caller, so an occupied
    // destination is an enemy piece and needs exactly one screen.
    match board.piece_at(to) {
        None => between == 0,
        Some(_) => between == 1,
    }
}

fn soldier(_board: &Board, pc: Piece, from: Coord, to: Coord) -> bool {
    let (df, dr) = deltas(from, to);
    let forward = pc.color.forward();
    if df == 0 && dr == forward {
        return true;
    }
    let crossed = !from.on_own_side(pc.color);
    crossed && dr == 0 && df.abs() == 1
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
