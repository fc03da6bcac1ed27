//! Castling move generation
//!
//! Ordinary king steps go through the leaper generator; this file only
//! produces castling moves, encoded as the king moving two files.
//!
//! ## Castling Conditions
//!
//! - The matching right is still held and the rook is on its corner
//! - Every square between king and rook is empty
//! - The king is not in check and does not cross or land on an attacked square

use super::attack::is_square_attacked;
use super::MoveList;
use crate::board::{CastlingRights, Position};
use crate::types::{Color, Move, Piece, PieceKind, Square};

pub(super) fn generate_castling_moves(pos: &Position, color: Color, moves: &mut MoveList) {
    let rank = match color {
        Color::White => 0,
        Color::Black => 7,
    };
    let king_from = Square::at(4, rank);
    if pos.piece_at(king_from) != Some(Piece::new(color, PieceKind::King)) {
        return;
    }

    let enemy = !color;
    let rook = Some(Piece::new(color, PieceKind::Rook));
    let empty = |files: &[u8]| files.iter().all(|&f| pos.piece_at(Square::at(f, rank)).is_none());
    let safe = |files: &[u8]| {
        files
            .iter()
            .all(|&f| !is_square_attacked(pos, Square::at(f, rank), enemy))
    };

    if !safe(&[4]) {
        return;
    }

    if pos.castling.has(CastlingRights::kingside(color))
        && pos.piece_at(Square::at(7, rank)) == rook
        && empty(&[5, 6])
        && safe(&[5, 6])
    {
        moves.push(Move::new(king_from, Square::at(6, rank)));
    }

    if pos.castling.has(CastlingRights::queenside(color))
        && pos.piece_at(Square::at(0, rank)) == rook
        && empty(&[1, 2, 3])
        && safe(&[2, 3])
    {
        moves.push(Move::new(king_from, Square::at(2, rank)));
    }
}
