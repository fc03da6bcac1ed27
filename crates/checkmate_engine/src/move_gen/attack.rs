//! Attack detection and square checking
//!
//! Provides the primitive behind check detection, castling safety and legal
//! move filtering.
//!
//! ## Algorithm
//!
//! Rather than walking every enemy piece and asking whether it reaches the
//! target, we look *outward from the target*: a knight pattern, a king
//! pattern, the two pawn capture squares and the eight sliding rays. The
//! first piece met on a ray decides that ray.

use crate::board::Position;
use crate::constants::{BISHOP_DIRS, KING_DIRS, KNIGHT_DIRS, ROOK_DIRS};
use crate::types::{Color, Piece, PieceKind, Square};

/// Check if `square` is attacked by any piece of colour `by`
///
/// # Examples
///
/// ```rust,ignore
/// // Is e4 attacked by black?
/// let attacked = is_square_attacked(&pos, Square::parse("e4").unwrap(), Color::Black);
/// ```
pub fn is_square_attacked(pos: &Position, square: Square, by: Color) -> bool {
    let holds = |sq: Option<Square>, kind: PieceKind| {
        sq.and_then(|s| pos.piece_at(s)) == Some(Piece::new(by, kind))
    };

    // A pawn of `by` attacks from one rank behind the target, from its point of view
    let behind = -by.forward();
    if holds(square.offset(-1, behind), PieceKind::Pawn)
        || holds(square.offset(1, behind), PieceKind::Pawn)
    {
        return true;
    }

    if KNIGHT_DIRS
        .iter()
        .any(|&(df, dr)| holds(square.offset(df, dr), PieceKind::Knight))
    {
        return true;
    }

    if KING_DIRS
        .iter()
        .any(|&(df, dr)| holds(square.offset(df, dr), PieceKind::King))
    {
        return true;
    }

    ray_attack(pos, square, by, &ROOK_DIRS, PieceKind::Rook)
        || ray_attack(pos, square, by, &BISHOP_DIRS, PieceKind::Bishop)
}

/// First piece on each ray is a `slider` or queen of colour `by`
fn ray_attack(
    pos: &Position,
    square: Square,
    by: Color,
    directions: &[(i8, i8)],
    slider: PieceKind,
) -> bool {
    for &(df, dr) in directions {
        let mut current = square;
        while let Some(next) = current.offset(df, dr) {
            if let Some(piece) = pos.piece_at(next) {
                if piece.color == by && (piece.kind == slider || piece.kind == PieceKind::Queen) {
                    return true;
                }
                break;
            }
            current = next;
        }
    }
    false
}

/// Whether the king of `color` is attacked; a missing king is never in check
pub fn is_in_check(pos: &Position, color: Color) -> bool {
    pos.king_square(color)
        .map(|king| is_square_attacked(pos, king, !color))
        .unwrap_or(false)
}
