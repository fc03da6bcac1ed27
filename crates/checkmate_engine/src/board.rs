//! # Board Representation - Mailbox Plus Derived Bitboards
//!
//! ## Overview
//!
//! [`Position`] is the complete game state the engine searches: a 64-entry
//! mailbox (`Option<Piece>` per square), one bitboard per colour and piece
//! kind, side to move, castling rights, the en-passant target square and a
//! terminal flag.
//!
//! The mailbox is authoritative. Bitboards are *derived* from it by
//! [`Position::refresh_bitboards`], which [`crate::move_gen::apply_move`] calls
//! after every move. Because the whole structure is `Copy`, a snapshot taken
//! before a move already carries consistent bitboards, and restoring the
//! snapshot restores them too.
//!
//! ## Terminal Flag
//!
//! `game_over` is only maintained for the *real* game position held by the
//! engine (after a `position` command or a committed move), never inside the
//! search tree where the absence of legal moves is detected directly.

use crate::bitset::BitSet;
use crate::constants::STARTPOS_FEN;
use crate::types::{Color, Piece, PieceKind, Square};

/// Castling availability as four flag bits
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;

    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    #[inline]
    pub const fn has(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    #[inline]
    pub fn grant(&mut self, flag: u8) {
        self.0 |= flag;
    }

    #[inline]
    pub fn revoke(&mut self, flag: u8) {
        self.0 &= !flag;
    }

    pub const fn kingside(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        }
    }

    pub const fn queenside(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        }
    }

    /// Rights lost when a piece leaves or lands on `square`
    pub const fn touched_by(square: Square) -> u8 {
        match square.index() {
            0 => Self::WHITE_QUEENSIDE,
            4 => Self::WHITE_KINGSIDE | Self::WHITE_QUEENSIDE,
            7 => Self::WHITE_KINGSIDE,
            56 => Self::BLACK_QUEENSIDE,
            60 => Self::BLACK_KINGSIDE | Self::BLACK_QUEENSIDE,
            63 => Self::BLACK_KINGSIDE,
            _ => 0,
        }
    }

    /// Same rights with the colours exchanged
    pub const fn swapped(self) -> CastlingRights {
        CastlingRights(((self.0 & 0b0011) << 2) | ((self.0 & 0b1100) >> 2))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub bitboards: [[BitSet; 6]; 2],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub game_over: bool,
}

impl Default for Position {
    fn default() -> Self {
        Position::startpos()
    }
}

impl Position {
    /// An empty board, White to move, no rights
    pub fn empty() -> Self {
        Position {
            board: [None; 64],
            bitboards: [[BitSet::EMPTY; 6]; 2],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            game_over: false,
        }
    }

    /// Standard initial position
    pub fn startpos() -> Self {
        // constant input, the error arm is unreachable
        Position::from_fen(STARTPOS_FEN).unwrap_or_else(|_| Position::empty())
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.index()]
    }

    /// Place (or clear) a square without touching the bitboards
    #[inline]
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.board[square.index()] = piece;
    }

    /// Rebuild every bitboard from the mailbox
    pub fn refresh_bitboards(&mut self) {
        self.bitboards = [[BitSet::EMPTY; 6]; 2];
        for square in Square::all() {
            if let Some(piece) = self.board[square.index()] {
                self.bitboards[piece.color.index()][piece.kind.index()].insert(square);
            }
        }
    }

    #[inline]
    pub fn pieces(&self, color: Color, kind: PieceKind) -> BitSet {
        self.bitboards[color.index()][kind.index()]
    }

    /// Union of every bitboard of one colour
    pub fn occupancy(&self, color: Color) -> BitSet {
        BitSet(
            self.bitboards[color.index()]
                .iter()
                .fold(0u64, |acc, set| acc | set.0),
        )
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color, PieceKind::King).iter().next()
    }

    /// The same position seen from the other side: ranks flipped, colours
    /// exchanged, side to move swapped
    pub fn mirrored(&self) -> Position {
        let mut mirrored = Position::empty();
        for square in Square::all() {
            if let Some(piece) = self.board[square.index()] {
                mirrored.board[square.flip_vertical().index()] =
                    Some(Piece::new(!piece.color, piece.kind));
            }
        }
        mirrored.side_to_move = !self.side_to_move;
        mirrored.castling = self.castling.swapped();
        mirrored.en_passant = self.en_passant.map(Square::flip_vertical);
        mirrored.game_over = self.game_over;
        mirrored.refresh_bitboards();
        mirrored
    }

    /// Same placement, side, rights and en-passant square; ignores the
    /// terminal flag
    pub fn same_state(&self, other: &Position) -> bool {
        self.board == other.board
            && self.side_to_move == other.side_to_move
            && self.castling == other.castling
            && self.en_passant == other.en_passant
    }

    /// Recompute the terminal flag from the legal move set
    pub fn update_game_over(&mut self) {
        self.game_over = !crate::move_gen::has_legal_move(self);
    }
}
