//! Material evaluation
//!
//! Counts each piece kind through its bitboard (`POPCNT`) and weights it by
//! [`PieceKind::value`]. Kings are counted too; with one king per side they
//! cancel out.

use crate::board::Position;
use crate::types::{Color, PieceKind};

/// Material of one side in centipawns
pub fn material(pos: &Position, color: Color) -> i32 {
    PieceKind::ALL
        .iter()
        .map(|&kind| pos.pieces(color, kind).count_ones() as i32 * kind.value())
        .sum()
}

/// White material minus Black material
pub fn material_balance(pos: &Position) -> i32 {
    material(pos, Color::White) - material(pos, Color::Black)
}
