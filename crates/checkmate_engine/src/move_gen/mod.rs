//! # Move Generation
//!
//! ## Overview
//!
//! Generates moves directly from the mailbox in two stages:
//!
//! 1. **Pseudo-legal**: every move that obeys piece movement rules, ignoring
//!    whether the mover's own king is left in check. Castling through check is
//!    already excluded here.
//! 2. **Legal**: each pseudo-legal move is applied to a copy of the position
//!    and dropped if the mover's king ends up attacked.
//!
//! Copying a [`Position`] is a flat memory copy, so the legality filter needs
//! no unmake logic at all.
//!
//! ## Generation Order
//!
//! Pieces are visited by ascending square index, each piece emitting its
//! moves in direction order, castling last. The order is fully deterministic,
//! which the move orderer relies on for stable tie-breaking.
//!
//! ## Module Organization
//!
//! - `pawn` - pushes, captures, en passant, promotions
//! - `knight` - fixed-pattern leapers (knights and king steps)
//! - `sliding` - bishops, rooks, queens
//! - `king` - castling
//! - `attack` - square attack detection and check
//! - `apply` - applying a move to a position

mod apply;
mod attack;
mod king;
mod knight;
mod pawn;
mod sliding;

pub use apply::apply_move;
pub use attack::{is_in_check, is_square_attacked};

use crate::board::Position;
use crate::constants::{BISHOP_DIRS, KING_DIRS, KNIGHT_DIRS, ROOK_DIRS};
use crate::types::{Move, PieceKind};

pub type MoveList = Vec<Move>;

/// All pseudo-legal moves for the side to move
pub fn pseudo_legal_moves(pos: &Position) -> MoveList {
    let color = pos.side_to_move;
    let mut moves = MoveList::with_capacity(48);

    for from in pos.occupancy(color).iter() {
        let Some(piece) = pos.piece_at(from) else {
            continue;
        };
        match piece.kind {
            PieceKind::Pawn => pawn::generate_pawn_moves(pos, from, color, &mut moves),
            PieceKind::Knight => {
                knight::generate_leaper_moves(pos, from, color, &KNIGHT_DIRS, &mut moves)
            }
            PieceKind::Bishop => {
                sliding::generate_sliding_moves(pos, from, color, &BISHOP_DIRS, &mut moves)
            }
            PieceKind::Rook => {
                sliding::generate_sliding_moves(pos, from, color, &ROOK_DIRS, &mut moves)
            }
            PieceKind::Queen => {
                sliding::generate_sliding_moves(pos, from, color, &ROOK_DIRS, &mut moves);
                sliding::generate_sliding_moves(pos, from, color, &BISHOP_DIRS, &mut moves);
            }
            PieceKind::King => {
                knight::generate_leaper_moves(pos, from, color, &KING_DIRS, &mut moves)
            }
        }
    }

    king::generate_castling_moves(pos, color, &mut moves);
    moves
}

/// All legal moves for the side to move
pub fn legal_moves(pos: &Position) -> MoveList {
    let mut moves = pseudo_legal_moves(pos);
    moves.retain(|&mv| is_legal(pos, mv));
    moves
}

/// Whether the side to move has at least one legal move
pub fn has_legal_move(pos: &Position) -> bool {
    pseudo_legal_moves(pos)
        .into_iter()
        .any(|mv| is_legal(pos, mv))
}

/// Whether a pseudo-legal move keeps the mover's king safe
fn is_legal(pos: &Position, mv: Move) -> bool {
    let mut next = *pos;
    apply_move(&mut next, mv);
    !is_in_check(&next, pos.side_to_move)
}

/// Whether the move captures something, en passant included
pub fn is_capture(pos: &Position, mv: Move) -> bool {
    captured_kind(pos, mv).is_some()
}

/// Kind of the piece a move removes from the board, if any
pub fn captured_kind(pos: &Position, mv: Move) -> Option<PieceKind> {
    if let Some(victim) = pos.piece_at(mv.to) {
        return Some(victim.kind);
    }
    let mover = pos.piece_at(mv.from)?;
    if mover.kind == PieceKind::Pawn
        && pos.en_passant == Some(mv.to)
        && mv.from.file() != mv.to.file()
    {
        Some(PieceKind::Pawn)
    } else {
        None
    }
}

/// Whether the move leaves the opponent's king attacked
pub fn gives_check(pos: &Position, mv: Move) -> bool {
    let mut next = *pos;
    apply_move(&mut next, mv);
    is_in_check(&next, next.side_to_move)
}
