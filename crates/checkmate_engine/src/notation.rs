//! # Notation - FEN Positions and Coordinate Move Tokens
//!
//! ## FEN
//!
//! [`Position::from_fen`] reads the first four FEN fields: piece placement,
//! side to move, castling availability and en-passant target. The half-move
//! clock and full-move number are accepted but ignored, and may be omitted.
//!
//! ## Move Tokens
//!
//! Protocol moves are coordinate text: `<file><rank><file><rank>[promotion]`,
//! e.g. `e2e4` or `a7a8q`. [`parse_move_token`] only checks syntax; whether
//! the move is playable is answered by [`resolve_move`], which matches the
//! token against the legal move list of a position.

use crate::board::{CastlingRights, Position};
use crate::error::{EngineError, EngineResult};
use crate::move_gen::legal_moves;
use crate::types::{Color, Move, Piece, PieceKind, Square};

impl Position {
    /// Parse a position from FEN text
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidFen`] when fewer than four fields are
    /// present or any of them is malformed.
    pub fn from_fen(fen: &str) -> EngineResult<Position> {
        let invalid = |reason: &str| EngineError::InvalidFen {
            fen: fen.to_string(),
            reason: reason.to_string(),
        };

        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(invalid("expected at least 4 fields"));
        }

        let mut pos = Position::empty();

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(invalid("placement must have 8 ranks"));
        }
        for (row, rank_text) in ranks.iter().enumerate() {
            let rank = 7 - row as u8;
            let mut file = 0u8;
            for c in rank_text.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if !(1..=8).contains(&skip) {
                        return Err(invalid("empty-square count out of range"));
                    }
                    file += skip as u8;
                } else {
                    let piece = Piece::from_fen_char(c).ok_or_else(|| invalid("unknown piece letter"))?;
                    let square =
                        Square::from_coords(file, rank).ok_or_else(|| invalid("rank overflows"))?;
                    pos.set_piece(square, Some(piece));
                    file += 1;
                }
                if file > 8 {
                    return Err(invalid("rank overflows"));
                }
            }
            if file != 8 {
                return Err(invalid("rank does not cover 8 files"));
            }
        }

        pos.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(invalid("side to move must be 'w' or 'b'")),
        };

        if fields[2] != "-" {
            for c in fields[2].chars() {
                let flag = match c {
                    'K' => CastlingRights::WHITE_KINGSIDE,
                    'Q' => CastlingRights::WHITE_QUEENSIDE,
                    'k' => CastlingRights::BLACK_KINGSIDE,
                    'q' => CastlingRights::BLACK_QUEENSIDE,
                    _ => return Err(invalid("unknown castling flag")),
                };
                pos.castling.grant(flag);
            }
        }

        pos.en_passant = match fields[3] {
            "-" => None,
            text => Some(Square::parse(text).ok_or_else(|| invalid("bad en-passant square"))?),
        };

        pos.refresh_bitboards();
        Ok(pos)
    }
}

/// Parse coordinate move text without checking legality
///
/// Promotion letters `n`, `b`, `r`, `q` and `k` are accepted.
///
/// # Errors
///
/// Returns [`EngineError::InvalidMoveToken`] for anything else.
pub fn parse_move_token(token: &str) -> EngineResult<Move> {
    let invalid = || EngineError::InvalidMoveToken {
        token: token.to_string(),
    };

    if !token.is_ascii() || !(4..=5).contains(&token.len()) {
        return Err(invalid());
    }
    let from = Square::parse(&token[0..2]).ok_or_else(invalid)?;
    let to = Square::parse(&token[2..4]).ok_or_else(invalid)?;

    match token[4..].chars().next() {
        None => Ok(Move::new(from, to)),
        Some(c) => match PieceKind::from_char(c) {
            Some(kind) if kind != PieceKind::Pawn && c.is_ascii_lowercase() => {
                Ok(Move::with_promotion(from, to, kind))
            }
            _ => Err(invalid()),
        },
    }
}

/// Match move text against the legal moves of `pos`
///
/// # Errors
///
/// [`EngineError::InvalidMoveToken`] for malformed text,
/// [`EngineError::IllegalMove`] when the move is not legal here.
pub fn resolve_move(pos: &Position, token: &str) -> EngineResult<Move> {
    let parsed = parse_move_token(token)?;
    legal_moves(pos)
        .into_iter()
        .find(|&mv| mv == parsed)
        .ok_or(EngineError::IllegalMove { mv: parsed })
}
