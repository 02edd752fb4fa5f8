use crate::error::FenError;
use crate::types::*;

pub const START_FEN: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 0 1";

const BACK_RANK: [PieceKind; 9] = [
    PieceKind::Chariot,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Guard,
    PieceKind::General,
    PieceKind::Guard,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Chariot,
];

/// Game position: a 10x9 grid, the side to move, the committed move history
/// and the diagnostic status of the last attempted move.
///
/// The grid is only mutated through [`Board::try_move`], [`Board::undo_last`]
/// and [`Board::initialize`]; everything else reads.
#[derive(Clone, Debug)]
pub struct Board {
    grid: [Option<Piece>; SQUARES],
    side_to_move: Color,
    history: Vec<MoveRecord>,
    check_status: CheckStatus,
    /// Plies played before this board was set up, from the FEN move number.
    ply_offset: usize,
}

/// Immutable copy of the observable board state handed to views and used
/// for before/after comparisons.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSnapshot {
    grid: [Option<Piece>; SQUARES],
    pub side_to_move: Color,
}

impl BoardSnapshot {
    pub fn piece_at(&self, c: Coord) -> Option<Piece> {
        if !c.in_bounds() {
            return None;
        }
        self.grid[c.idx()]
    }

    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.grid.iter().flatten().copied()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Board {
    /// A board with no pieces. Used as the base for layouts and FEN parsing.
    pub fn empty(side_to_move: Color) -> Self {
        Board {
            grid: [None; SQUARES],
            side_to_move,
            history: Vec::new(),
            check_status: CheckStatus::None,
            ply_offset: 0,
        }
    }

    pub fn startpos() -> Self {
        let mut b = Board::empty(Color::Red);
        b.initialize();
        b
    }

    /// Clear the grid, lay out the 32 standard pieces, clear history and
    /// give the move to Red.
    pub fn initialize(&mut self) {
        self.grid = [None; SQUARES];
        for (f, &kind) in BACK_RANK.iter().enumerate() {
            let f = f as i8;
            self.place(Piece::new(kind, Color::Black, Coord::new(f, 0)));
            self.place(Piece::new(kind, Color::Red, Coord::new(f, 9)));
        }
        for f in [1, 7] {
            self.place(Piece::new(PieceKind::Cannon, Color::Black, Coord::new(f, 2)));
            self.place(Piece::new(PieceKind::Cannon, Color::Red, Coord::new(f, 7)));
        }
        for f in (0..FILES).step_by(2) {
            self.place(Piece::new(PieceKind::Soldier, Color::Black, Coord::new(f, 3)));
            self.place(Piece::new(PieceKind::Soldier, Color::Red, Coord::new(f, 6)));
        }
        self.history.clear();
        self.check_status = CheckStatus::None;
        self.side_to_move = Color::Red;
        self.ply_offset = 0;
    }

    pub fn piece_at(&self, c: Coord) -> Option<Piece> {
        if !c.in_bounds() {
            return None;
        }
        self.grid[c.idx()]
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn check_status(&self) -> CheckStatus {
        self.check_status
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.grid.iter().flatten().copied()
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |p| p.color == color)
    }

    pub fn general_pos(&self, color: Color) -> Option<Coord> {
        self.pieces_of(color)
            .find(|p| p.kind == PieceKind::General)
            .map(|p| p.pos)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            grid: self.grid,
            side_to_move: self.side_to_move,
        }
    }

    // ---------------------------------------------------------------------
    // Raw mutation, only reachable from the legality and undo paths.
    // ---------------------------------------------------------------------

    fn place(&mut self, piece: Piece) {
        self.grid[piece.pos.idx()] = Some(piece);
    }

    pub(crate) fn set_check_status(&mut self, status: CheckStatus) {
        self.check_status = status;
    }

    pub(crate) fn flip_turn(&mut self) {
        self.side_to_move = self.side_to_move.other();
    }

    pub(crate) fn push_record(&mut self, record: MoveRecord) {
        self.history.push(record);
    }

    pub(crate) fn pop_record(&mut self) -> Option<MoveRecord> {
        self.history.pop()
    }

    /// Move the piece on `from` to `to`, updating its position, and return
    /// whatever stood on `to`. Both points must be in bounds and `from`
    /// occupied.
    pub(crate) fn relocate(&mut self, from: Coord, to: Coord) -> Option<Piece> {
        let captured = self.grid[to.idx()].take();
        if let Some(mut moved) = self.grid[from.idx()].take() {
            moved.pos = to;
            self.grid[to.idx()] = Some(moved);
        }
        captured
    }

    /// Exact inverse of [`Board::relocate`].
    pub(crate) fn restore(&mut self, from: Coord, to: Coord, captured: Option<Piece>) {
        if let Some(mut moved) = self.grid[to.idx()].take() {
            moved.pos = from;
            self.grid[from.idx()] = Some(moved);
        }
        self.grid[to.idx()] = captured.map(|mut p| {
            p.pos = to;
            p
        });
    }

    // ---------------------------------------------------------------------
    // FEN
    // ---------------------------------------------------------------------

    /// Parse a Xiangqi FEN string. Rows run from rank 0 (Black's back edge)
    /// to rank 9; uppercase letters are Red. The castling, en-passant and
    /// halfmove fields are ignored; the fullmove number is kept so that
    /// `to_fen` reproduces it.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut parts = fen.split_whitespace();
        let board_part = parts.next().unwrap_or("");
        let side = match parts.next().unwrap_or("w") {
            "w" | "r" => Color::Red,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };
        let fullmove = match parts.nth(2) {
            Some(txt) => txt
                .parse::<usize>()
                .map_err(|_| FenError::MoveNumber(txt.to_string()))?
                .max(1),
            None => 1,
        };

        let rows: Vec<&str> = board_part.split('/').collect();
        if rows.len() != RANKS as usize {
            return Err(FenError::RankCount(rows.len()));
        }

        let mut board = Board::empty(side);
        board.ply_offset = (fullmove - 1) * 2 + side.idx();
        for (rank, row) in rows.iter().enumerate() {
            let mut file: i8 = 0;
            for ch in row.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let kind = PieceKind::from_letter(ch).ok_or(FenError::PieceLetter(ch))?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::Red
                    } else {
                        Color::Black
                    };
                    let at = Coord::checked(file, rank as i8).ok_or(FenError::FileCount { rank })?;
                    check_placement(kind, color, at)?;
                    if kind == PieceKind::General && board.general_pos(color).is_some() {
                        return Err(FenError::DuplicateGeneral(color));
                    }
                    board.place(Piece::new(kind, color, at));
                    file += 1;
                }
                if file > FILES {
                    return Err(FenError::FileCount { rank });
                }
            }
            if file != FILES {
                return Err(FenError::FileCount { rank });
            }
        }
        Ok(board)
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(64);
        for rank in 0..RANKS {
            if rank > 0 {
                out.push('/');
            }
            let mut empty = 0;
            for file in 0..FILES {
                match self.piece_at(Coord::new(file, rank)) {
                    Some(p) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(p.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
        }
        let side = match self.side_to_move {
            Color::Red => 'w',
            Color::Black => 'b',
        };
        let fullmove = (self.ply_offset + self.history.len()) / 2 + 1;
        format!("{out} {side} - - 0 {fullmove}")
    }
}

fn check_placement(kind: PieceKind, color: Color, at: Coord) -> Result<(), FenError> {
    let ok = match kind {
        PieceKind::General | PieceKind::Guard => at.in_palace(color),
        PieceKind::Bishop => at.on_own_side(color),
        _ => true,
    };
    if ok {
        Ok(())
    } else {
        Err(FenError::IllegalPlacement { kind, color, at })
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
