//! Pawn move generation
//!
//! ## Pawn Movement Rules
//!
//! - One square forward onto an empty square
//! - Two squares forward from the starting rank when both squares are empty
//! - Diagonal captures of enemy pieces
//! - En passant onto the position's en-passant target square
//! - Reaching the last rank yields one move per promotion piece (Q, R, B, N)

use super::MoveList;
use crate::board::Position;
use crate::constants::PROMOTION_KINDS;
use crate::types::{Color, Move, Square};

pub(super) fn generate_pawn_moves(pos: &Position, from: Square, color: Color, moves: &mut MoveList) {
    let forward = color.forward();

    if let Some(one) = from.offset(0, forward) {
        if pos.piece_at(one).is_none() {
            push_pawn_move(from, one, color, moves);

            if from.rank() == color.pawn_rank() {
                if let Some(two) = one.offset(0, forward) {
                    if pos.piece_at(two).is_none() {
                        moves.push(Move::new(from, two));
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        let Some(target) = from.offset(df, forward) else {
            continue;
        };
        match pos.piece_at(target) {
            Some(piece) if piece.color != color => push_pawn_move(from, target, color, moves),
            None if pos.en_passant == Some(target) => moves.push(Move::new(from, target)),
            _ => {}
        }
    }
}

fn push_pawn_move(from: Square, to: Square, color: Color, moves: &mut MoveList) {
    if to.rank() == color.promotion_rank() {
        for kind in PROMOTION_KINDS {
            moves.push(Move::with_promotion(from, to, kind));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}
