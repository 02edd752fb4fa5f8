//! ICCS coordinate notation: files `a`..`i` left to right, ranks `0`..`9`
//! counted from Red's back edge. `h2e2` moves Red's right cannon to the
//! centre file.

use crate::types::*;

pub fn coord_to_iccs(c: Coord) -> String {
    let f = (b'a' + c.file as u8) as char;
    let r = (b'0' + (RANKS - 1 - c.rank) as u8) as char;
    format!("{f}{r}")
}

pub fn parse_iccs_coord(txt: &str) -> Option<Coord> {
    let b = txt.as_bytes();
    if b.len() != 2 {
        return None;
    }
    let f = b[0].to_ascii_lowercase();
    let r = b[1];
    if !(b'a'..=b'i').contains(&f) || !r.is_ascii_digit() {
        return None;
    }
    Coord::checked((f - b'a') as i8, RANKS - 1 - (r - b'0') as i8)
}

pub fn move_to_iccs(mv: Move) -> String {
    let mut s = coord_to_iccs(mv.from);
    s.push_str(&coord_to_iccs(mv.to));
    s
}

/// Parse `h2e2` or `h2-e2`. Only the syntax is checked; legality is the
/// board's business.
pub fn parse_iccs_move(txt: &str) -> Option<Move> {
    let txt = txt.trim();
    if !txt.is_ascii() {
        return None;
    }
    let (from, to) = match txt.len() {
        4 => (&txt[0..2], &txt[2..4]),
        5 if txt.as_bytes()[2] == b'-' => (&txt[0..2], &txt[3..5]),
        _ => return None,
    };
    Some(Move::new(parse_iccs_coord(from)?, parse_iccs_coord(to)?))
}
