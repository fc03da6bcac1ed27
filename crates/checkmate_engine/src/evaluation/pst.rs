//! Piece-square tables
//!
//! Values are in centipawns from White's point of view, indexed by square
//! with a1 = 0 (so the first row of each table is rank 1). Black pieces read
//! the vertically mirrored square (`index ^ 56`).
//!
//! Kings and pawns switch tables in the endgame: the king walks to the centre
//! and passed pawns gain value with every rank they advance.

use super::GamePhase;
use crate::types::{Color, Piece, PieceKind, Square};

#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10,-20,-20, 10, 10,  5,
     5, -5,-10,  0,  0,-10, -5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5,  5, 10, 25, 25, 10,  5,  5,
    10, 10, 20, 30, 30, 20, 10, 10,
    50, 50, 50, 50, 50, 50, 50, 50,
     0,  0,  0,  0,  0,  0,  0,  0,
];

/// Endgame pawn value by relative rank
const PAWN_ENDGAME_BY_RANK: [i32; 8] = [0, 0, 5, 10, 20, 35, 60, 0];

#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
   -50,-40,-30,-30,-30,-30,-40,-50,
   -40,-20,  0,  5,  5,  0,-20,-40,
   -30,  5, 10, 15, 15, 10,  5,-30,
   -30,  0, 15, 20, 20, 15,  0,-30,
   -30,  5, 15, 20, 20, 15,  5,-30,
   -30,  0, 10, 15, 15, 10,  0,-30,
   -40,-20,  0,  0,  0,  0,-20,-40,
   -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_PST: [i32; 64] = [
   -20,-10,-10,-10,-10,-10,-10,-20,
   -10,  5,  0,  0,  0,  0,  5,-10,
   -10, 10, 10, 10, 10, 10, 10,-10,
   -10,  0, 10, 10, 10, 10,  0,-10,
   -10,  5,  5, 10, 10,  5,  5,-10,
   -10,  0,  5, 10, 10,  5,  0,-10,
   -10,  0,  0,  0,  0,  0,  0,-10,
   -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_PST: [i32; 64] = [
     0,  0,  0,  5,  5,  0,  0,  0,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     5, 10, 10, 10, 10, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_PST: [i32; 64] = [
   -20,-10,-10, -5, -5,-10,-10,-20,
   -10,  0,  0,  0,  0,  0,  0,-10,
   -10,  5,  5,  5,  5,  5,  0,-10,
     0,  0,  5,  5,  5,  5,  0, -5,
    -5,  0,  5,  5,  5,  5,  0, -5,
   -10,  0,  5,  5,  5,  5,  0,-10,
   -10,  0,  0,  0,  0,  0,  0,-10,
   -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_PST_MIDDLEGAME: [i32; 64] = [
    20, 30, 10,  0,  0, 10, 30, 20,
    20, 20,  0,  0,  0,  0, 20, 20,
   -10,-20,-20,-20,-20,-20,-20,-10,
   -20,-30,-30,-40,-40,-30,-30,-20,
   -30,-40,-40,-50,-50,-40,-40,-30,
   -30,-40,-40,-50,-50,-40,-40,-30,
   -30,-40,-40,-50,-50,-40,-40,-30,
   -30,-40,-40,-50,-50,-40,-40,-30,
];

#[rustfmt::skip]
const KING_PST_ENDGAME: [i32; 64] = [
   -50,-30,-30,-30,-30,-30,-30,-50,
   -30,-30,  0,  0,  0,  0,-30,-30,
   -30,-10, 20, 30, 30, 20,-10,-30,
   -30,-10, 30, 40, 40, 30,-10,-30,
   -30,-10, 30, 40, 40, 30,-10,-30,
   -30,-10, 20, 30, 30, 20,-10,-30,
   -30,-20,-10,  0,  0,-10,-20,-30,
   -50,-40,-30,-20,-20,-30,-40,-50,
];

/// Table value of `piece` on `square`, from the owner's point of view
pub fn square_value(piece: Piece, square: Square, phase: GamePhase) -> i32 {
    let index = match piece.color {
        Color::White => square.index(),
        Color::Black => square.flip_vertical().index(),
    };

    match (piece.kind, phase) {
        (PieceKind::Pawn, GamePhase::Middlegame) => PAWN_PST[index],
        (PieceKind::Pawn, GamePhase::Endgame) => PAWN_ENDGAME_BY_RANK[index / 8],
        (PieceKind::Knight, _) => KNIGHT_PST[index],
        (PieceKind::Bishop, _) => BISHOP_PST[index],
        (PieceKind::Rook, _) => ROOK_PST[index],
        (PieceKind::Queen, _) => QUEEN_PST[index],
        (PieceKind::King, GamePhase::Middlegame) => KING_PST_MIDDLEGAME[index],
        (PieceKind::King, GamePhase::Endgame) => KING_PST_ENDGAME[index],
    }
}

/// Table total for White minus table total for Black
pub fn pst_balance(board: &[Option<Piece>; 64], phase: GamePhase) -> i32 {
    Square::all()
        .filter_map(|square| board[square.index()].map(|piece| (piece, square)))
        .map(|(piece, square)| {
            let value = square_value(piece, square, phase);
            match piece.color {
                Color::White => value,
                Color::Black => -value,
            }
        })
        .sum()
}
