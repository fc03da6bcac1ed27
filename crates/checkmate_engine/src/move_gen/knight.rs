//! Leaper move generation (knights and kings)
//!
//! Leapers jump straight to each destination of a fixed pattern. A
//! destination is valid when it is on the board and not occupied by a
//! friendly piece.

use super::MoveList;
use crate::board::Position;
use crate::types::{Color, Move, Square};

/// Append every leaper move from `from` following `pattern`
///
/// Used with [`crate::constants::KNIGHT_DIRS`] for knights and
/// [`crate::constants::KING_DIRS`] for ordinary king steps.
pub(super) fn generate_leaper_moves(
    pos: &Position,
    from: Square,
    color: Color,
    pattern: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(df, dr) in pattern {
        let Some(to) = from.offset(df, dr) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(piece) if piece.color == color => {}
            _ => moves.push(Move::new(from, to)),
        }
    }
}
