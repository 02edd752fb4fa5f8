use crate::{board::Board, rules::is_valid_move, types::*};

/// Generate all legal moves, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into`, cloning the board only once.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let mut tmp = board.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
///
/// Every candidate goes through [`Board::try_move`] and is taken back
/// immediately, so the board is left as it was found (apart from the
/// diagnostic check status).
pub fn legal_moves_into(board: &mut Board, out: &mut Vec<Move>) {
    out.clear();
    for mv in candidates(board) {
        if board.try_move(mv.from, mv.to).is_ok() {
            board.undo_last();
            out.push(mv);
        }
    }
}

/// True if the side to move has at least one legal move. Stops at the first.
pub fn has_legal_move(board: &Board) -> bool {
    let mut tmp = board.clone();
    for mv in candidates(board) {
        if tmp.try_move(mv.from, mv.to).is_ok() {
            return true;
        }
    }
    false
}

/// Every (piece, destination) pair for the side to move that passes the
/// piece's movement rule.
fn candidates(board: &Board) -> Vec<Move> {
    let side = board.side_to_move();
    board
        .pieces_of(side)
        .flat_map(|pc| Coord::all().map(move |to| Move::new(pc.pos, to)))
        .filter(|mv| is_valid_move(board, mv.from, mv.to))
        .collect()
}
