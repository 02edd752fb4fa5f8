use serde::{Deserialize, Serialize};

pub const FILES: i8 = 9;
pub const RANKS: i8 = 10;
pub const SQUARES: usize = 90;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}
impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Black => 1,
        }
    }
    /// Rank step that moves a soldier of this colour towards the enemy.
    pub fn forward(self) -> i8 {
        match self {
            Color::Red => -1,
            Color::Black => 1,
        }
    }
    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Black => "black",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    General,
    Guard,
    Bishop,
    Knight,
    Chariot,
    Cannon,
    Soldier,
}

impl PieceKind {
    /// FEN letter for a Red piece; Black uses the lowercase form.
    pub fn letter(self) -> char {
        match self {
            PieceKind::General => 'K',
            PieceKind::Guard => 'A',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
            PieceKind::Chariot => 'R',
            PieceKind::Cannon => 'C',
            PieceKind::Soldier => 'P',
        }
    }

    pub fn from_letter(ch: char) -> Option<PieceKind> {
        match ch.to_ascii_uppercase() {
            'K' => Some(PieceKind::General),
            'A' => Some(PieceKind::Guard),
            'B' | 'E' => Some(PieceKind::Bishop),
            'N' | 'H' => Some(PieceKind::Knight),
            'R' => Some(PieceKind::Chariot),
            'C' => Some(PieceKind::Cannon),
            'P' => Some(PieceKind::Soldier),
            _ => None,
        }
    }
}

/// A board point. `file` runs 0..=8 left to right, `rank` runs 0..=9 from
/// Black's back edge to Red's back edge.
///
/// Values arriving from outside (text input, a peer) may be out of range;
/// call [`Coord::in_bounds`] before indexing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub file: i8,
    pub rank: i8,
}

impl Coord {
    pub const fn new(file: i8, rank: i8) -> Self {
        Self { file, rank }
    }

    /// Bounds-checked constructor.
    pub fn checked(file: i8, rank: i8) -> Option<Self> {
        let c = Self::new(file, rank);
        c.in_bounds().then_some(c)
    }

    pub fn in_bounds(self) -> bool {
        (0..FILES).contains(&self.file) && (0..RANKS).contains(&self.rank)
    }

    /// Flat index into the 90-cell grid. Caller guarantees `in_bounds`.
    pub(crate) fn idx(self) -> usize {
        self.rank as usize * FILES as usize + self.file as usize
    }

    pub(crate) fn from_idx(i: usize) -> Self {
        Self::new((i % FILES as usize) as i8, (i / FILES as usize) as i8)
    }

    /// Iterate every point on the board, rank-major.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..SQUARES).map(Coord::from_idx)
    }

    /// True for the 3x3 palace belonging to `color`.
    pub fn in_palace(self, color: Color) -> bool {
        if !(3..=5).contains(&self.file) {
            return false;
        }
        match color {
            Color::Red => (7..=9).contains(&self.rank),
            Color::Black => (0..=2).contains(&self.rank),
        }
    }

    /// True if the point lies on `color`'s side of the river.
    pub fn on_own_side(self, color: Color) -> bool {
        match color {
            Color::Red => self.rank >= 5,
            Color::Black => self.rank <= 4,
        }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.file, self.rank)
    }
}

/// A piece on the board. `pos` always equals the cell holding it; a captured
/// piece keeps the point it was taken on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub pos: Coord,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, pos: Coord) -> Self {
        Self { kind, color, pos }
    }

    pub fn fen_char(self) -> char {
        match self.color {
            Color::Red => self.kind.letter(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    pub fn new(from: Coord, to: Coord) -> Self {
        Self { from, to }
    }
}

/// One committed ply. Pushed by a successful move, popped only by undo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Coord,
    pub to: Coord,
    pub captured: Option<Piece>,
}

/// Diagnostic flag left on the board by the last move attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    #[default]
    None,
    AlreadyInCheck,
    WouldCauseSelfCheck,
    FlyingGeneralViolation,
}
