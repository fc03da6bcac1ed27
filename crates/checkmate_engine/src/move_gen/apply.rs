//! Move application
//!
//! [`apply_move`] updates the mailbox for the special moves (castling rook
//! hop, en-passant victim removal, promotion), maintains castling rights and
//! the en-passant target, flips the side to move and finally rebuilds the
//! bitboards so the position is consistent again.

use crate::board::{CastlingRights, Position};
use crate::types::{Move, Piece, PieceKind, Square};

/// Apply a (pseudo-)legal move in place
///
/// A move whose origin square is empty leaves the position untouched.
pub fn apply_move(pos: &mut Position, mv: Move) {
    let Some(piece) = pos.piece_at(mv.from) else {
        return;
    };
    let color = piece.color;
    let is_pawn = piece.kind == PieceKind::Pawn;

    if is_pawn
        && pos.en_passant == Some(mv.to)
        && mv.from.file() != mv.to.file()
        && pos.piece_at(mv.to).is_none()
    {
        if let Some(victim) = mv.to.offset(0, -color.forward()) {
            pos.set_piece(victim, None);
        }
    }

    if piece.kind == PieceKind::King && mv.from.file().abs_diff(mv.to.file()) == 2 {
        let rank = mv.from.rank();
        let (rook_from, rook_to) = if mv.to.file() == 6 {
            (Square::at(7, rank), Square::at(5, rank))
        } else {
            (Square::at(0, rank), Square::at(3, rank))
        };
        let rook = pos.piece_at(rook_from);
        pos.set_piece(rook_from, None);
        pos.set_piece(rook_to, rook);
    }

    let placed = match mv.promotion {
        Some(kind) if is_pawn => Piece::new(color, kind),
        _ => piece,
    };
    pos.set_piece(mv.from, None);
    pos.set_piece(mv.to, Some(placed));

    pos.castling
        .revoke(CastlingRights::touched_by(mv.from) | CastlingRights::touched_by(mv.to));

    pos.en_passant = if is_pawn && mv.from.rank().abs_diff(mv.to.rank()) == 2 {
        mv.from.offset(0, color.forward())
    } else {
        None
    };

    pos.side_to_move = !color;
    pos.refresh_bitboards();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn mv(text: &str) -> Move {
        let from = Square::parse(&text[0..2]).unwrap();
        let to = Square::parse(&text[2..4]).unwrap();
        Move::new(from, to)
    }

    #[test]
    fn test_double_push_sets_en_passant() {
        let mut pos = Position::startpos();
        apply_move(&mut pos, mv("e2e4"));
        assert_eq!(pos.en_passant, Square::parse("e3"));
        assert_eq!(pos.side_to_move, Color::Black);
        apply_move(&mut pos, mv("g8f6"));
        assert_eq!(pos.en_passant, None);
    }

    #[test]
    fn test_en_passant_removes_victim() {
        let mut pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        apply_move(&mut pos, mv("e5d6"));
        assert_eq!(pos.piece_at(Square::parse("d5").unwrap()), None);
        assert_eq!(pos.pieces(Color::Black, PieceKind::Pawn).count_ones(), 0);
    }

    #[test]
    fn test_castling_moves_rook_and_clears_rights() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        apply_move(&mut pos, mv("e1g1"));
        assert_eq!(
            pos.piece_at(Square::F1),
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
        assert_eq!(pos.piece_at(Square::H1), None);
        assert!(!pos.castling.has(CastlingRights::WHITE_KINGSIDE));
        assert!(!pos.castling.has(CastlingRights::WHITE_QUEENSIDE));
        assert!(pos.castling.has(CastlingRights::BLACK_QUEENSIDE));

        apply_move(&mut pos, mv("e8c8"));
        assert_eq!(
            pos.piece_at(Square::D8),
            Some(Piece::new(Color::Black, PieceKind::Rook))
        );
        assert_eq!(pos.piece_at(Square::A8), None);
    }

    #[test]
    fn test_promotion_replaces_pawn() {
        let mut pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let a7 = Square::parse("a7").unwrap();
        apply_move(&mut pos, Move::with_promotion(a7, Square::A8, PieceKind::Knight));
        assert_eq!(
            pos.piece_at(Square::A8),
            Some(Piece::new(Color::White, PieceKind::Knight))
        );
        assert_eq!(pos.pieces(Color::White, PieceKind::Pawn).count_ones(), 0);
        assert_eq!(pos.pieces(Color::White, PieceKind::Knight).count_ones(), 1);
    }
}
