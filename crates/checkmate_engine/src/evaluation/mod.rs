//! # Static Position Evaluation
//!
//! ## Overview
//!
//! [`evaluate`] scores a position in centipawns from the point of view of the
//! side to move (positive = good for the player about to move), which is the
//! convention negamax needs. It is pure and deterministic: the same position
//! always yields the same score.
//!
//! The score is the sum of four White-minus-Black terms, negated when Black
//! is to move:
//!
//! 1. **Material** - counted through the bitboards
//! 2. **Piece-square tables** - middlegame or endgame set, see [`GamePhase`]
//! 3. **Pawn structure** - chain bonus, doubled-pawn penalty
//! 4. **Minor-piece colour affinity** - knights and bishops vs own pawns
//!
//! Every term treats both colours identically, so flipping the board and
//! swapping colours and side to move leaves the evaluation unchanged.
//!
//! ## Module Organization
//!
//! - `material` - material balance
//! - `pst` - piece-square tables
//! - `structure` - pawn structure and minor-piece affinity

mod material;
mod pst;
mod structure;

pub use material::{material, material_balance};
pub use pst::{pst_balance, square_value};
pub use structure::{minor_affinity, pawn_structure, structure_balance};

use crate::board::Position;
use crate::types::{Color, PieceKind};

/// Which set of piece-square tables applies
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Middlegame,
    Endgame,
}

/// Endgame when no queens remain, or when every side that still has a queen
/// has no rooks and at most one minor piece
pub fn game_phase(pos: &Position) -> GamePhase {
    let queenless_enough = Color::ALL.iter().all(|&color| {
        if pos.pieces(color, PieceKind::Queen).is_empty() {
            return true;
        }
        let minors = pos.pieces(color, PieceKind::Knight).count_ones()
            + pos.pieces(color, PieceKind::Bishop).count_ones();
        pos.pieces(color, PieceKind::Rook).is_empty() && minors <= 1
    });

    if queenless_enough {
        GamePhase::Endgame
    } else {
        GamePhase::Middlegame
    }
}

/// Evaluation from White's point of view
pub fn evaluate_white(pos: &Position) -> i32 {
    let phase = game_phase(pos);
    material_balance(pos) + pst_balance(&pos.board, phase) + structure_balance(pos)
}

/// Evaluation from the side to move's point of view
pub fn evaluate(pos: &Position) -> i32 {
    let score = evaluate_white(pos);
    match pos.side_to_move {
        Color::White => score,
        Color::Black => -score,
    }
}
