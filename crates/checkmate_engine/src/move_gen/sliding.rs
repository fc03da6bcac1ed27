//! Sliding piece move generation
//!
//! Bishops, rooks and queens walk each of their directions one square at a
//! time until the ray leaves the board or hits a piece. A blocking enemy
//! piece is a capture and ends the ray; a blocking friendly piece just ends it.
//!
//! ## Typical move counts
//!
//! From an open central square: 14 for rooks, 13 for bishops, 27 for queens.

use super::MoveList;
use crate::board::Position;
use crate::types::{Color, Move, Square};

pub(super) fn generate_sliding_moves(
    pos: &Position,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(df, dr) in directions {
        let mut current = from;
        while let Some(to) = current.offset(df, dr) {
            match pos.piece_at(to) {
                None => moves.push(Move::new(from, to)),
                Some(piece) => {
                    if piece.color != color {
                        moves.push(Move::new(from, to));
                    }
                    break;
                }
            }
            current = to;
        }
    }
}
