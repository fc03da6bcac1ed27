//! Pawn structure and minor-piece colour affinity
//!
//! Both terms are computed per side on the bitboards and combined as
//! White minus Black by the caller.
//!
//! - **Pawn chains**: each pawn defended by a friendly pawn and each pawn
//!   defending a friendly pawn earns [`PAWN_CHAIN_BONUS`].
//! - **Doubled pawns**: every pawn on a file holding two or more friendly
//!   pawns costs [`DOUBLED_PAWN_PENALTY`].
//! - **Knights** like friendly pawns on their own square colour (the pawns
//!   build outposts there), **bishops** like them on the opposite colour
//!   (the pawns do not block their diagonals).

use crate::board::Position;
use crate::constants::{
    BISHOP_PAWN_AFFINITY, DOUBLED_PAWN_PENALTY, FILE_A, FILE_H, KNIGHT_PAWN_AFFINITY,
    LIGHT_SQUARES, PAWN_CHAIN_BONUS,
};
use crate::types::{Color, PieceKind};

/// Squares attacked by a set of pawns of `color`
fn pawn_attacks(pawns: u64, color: Color) -> u64 {
    match color {
        Color::White => ((pawns << 7) & !FILE_H) | ((pawns << 9) & !FILE_A),
        Color::Black => ((pawns >> 9) & !FILE_H) | ((pawns >> 7) & !FILE_A),
    }
}

pub fn pawn_structure(pos: &Position, color: Color) -> i32 {
    let pawns = pos.pieces(color, PieceKind::Pawn).0;

    let defended = pawns & pawn_attacks(pawns, color);
    // a pawn of `color` on s attacks t exactly when an enemy pawn on t would attack s
    let defending = pawns & pawn_attacks(pawns, !color);
    let chain = (defended.count_ones() + defending.count_ones()) as i32 * PAWN_CHAIN_BONUS;

    let doubled: i32 = (0..8)
        .map(|file| (pawns & (FILE_A << file)).count_ones() as i32)
        .filter(|&count| count >= 2)
        .map(|count| count * DOUBLED_PAWN_PENALTY)
        .sum();

    chain - doubled
}

pub fn minor_affinity(pos: &Position, color: Color) -> i32 {
    let pawns = pos.pieces(color, PieceKind::Pawn).0;
    let light_pawns = (pawns & LIGHT_SQUARES).count_ones() as i32;
    let dark_pawns = (pawns & !LIGHT_SQUARES).count_ones() as i32;

    let knights: i32 = pos
        .pieces(color, PieceKind::Knight)
        .iter()
        .map(|sq| if sq.is_light() { light_pawns } else { dark_pawns })
        .sum();
    let bishops: i32 = pos
        .pieces(color, PieceKind::Bishop)
        .iter()
        .map(|sq| if sq.is_light() { dark_pawns } else { light_pawns })
        .sum();

    knights * KNIGHT_PAWN_AFFINITY + bishops * BISHOP_PAWN_AFFINITY
}

/// Structure and affinity terms, White minus Black
pub fn structure_balance(pos: &Position) -> i32 {
    let side = |color| pawn_structure(pos, color) + minor_affinity(pos, color);
    side(Color::White) - side(Color::Black)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pawn_chain_counts_both_ends() {
        // d4 defended by c3: one defended, one defending
        let pos = Position::from_fen("4k3/8/8/8/3P4/2P5/8/4K3 w - - 0 1").unwrap();
        assert_eq!(pawn_structure(&pos, Color::White), 2 * PAWN_CHAIN_BONUS);
    }

    #[test]
    fn test_black_chain_matches_white_chain() {
        let pos = Position::from_fen("4k3/8/2p5/3p4/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(pawn_structure(&pos, Color::Black), 2 * PAWN_CHAIN_BONUS);
    }

    #[test]
    fn test_no_wraparound_between_a_and_h_files() {
        // a3 and h3/h2 must not see each other
        let pos = Position::from_fen("4k3/8/8/8/8/P6P/7P/4K3 w - - 0 1").unwrap();
        assert_eq!(pawn_structure(&pos, Color::White), -2 * DOUBLED_PAWN_PENALTY);
    }

    #[test]
    fn test_doubled_pawns_penalised_per_pawn() {
        let pos = Position::from_fen("4k3/8/8/8/4P3/8/4P3/4K3 w - - 0 1").unwrap();
        assert_eq!(pawn_structure(&pos, Color::White), -2 * DOUBLED_PAWN_PENALTY);
    }

    #[test]
    fn test_knight_and_bishop_affinity() {
        // e4 is light: knight on d5 (light) likes it, bishop on c1 (dark) likes it too
        let pos = Position::from_fen("4k3/8/8/3N4/4P3/8/8/2B1K3 w - - 0 1").unwrap();
        assert_eq!(
            minor_affinity(&pos, Color::White),
            KNIGHT_PAWN_AFFINITY + BISHOP_PAWN_AFFINITY
        );
    }

    #[test]
    fn test_startpos_is_balanced() {
        assert_eq!(structure_balance(&Position::startpos()), 0);
    }
}
