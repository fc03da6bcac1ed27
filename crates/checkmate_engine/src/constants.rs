//! # Engine Constants - Piece Values, Evaluation Weights & Search Defaults
//!
//! ## Overview
//!
//! Every tunable number the engine uses lives here: piece valuations in
//! centipawns, the structural evaluation weights, direction vectors for move
//! generation and the default search parameters that [`crate::engine::EngineConfig`]
//! starts from.
//!
//! ## Centipawn Valuation System
//!
//! Scores are integers in centipawns (1/100th of a pawn):
//!
//! - **Pawn**: 100
//! - **Knight**: 320
//! - **Bishop**: 330 (slightly above the knight, the bishop pair is usually worth more)
//! - **Rook**: 500
//! - **Queen**: 900
//! - **King**: 20,000 (both sides always own one, so it cancels out of the balance)
//!
//! ## Direction Vectors
//!
//! Directions are `(file delta, rank delta)` pairs rather than flat offsets.
//! Stepping a square by a pair either yields another on-board square or
//! nothing, so sliding pieces and knights never wrap around the board edge.

use crate::types::PieceKind;

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 20_000;

/// Material value indexed by [`PieceKind::index`]
pub const FIGURE_VALUE: [i32; 6] = [
    PAWN_VALUE,
    KNIGHT_VALUE,
    BISHOP_VALUE,
    ROOK_VALUE,
    QUEEN_VALUE,
    KING_VALUE,
];

/// Bonus for every pawn protected by, or protecting, a friendly pawn
pub const PAWN_CHAIN_BONUS: i32 = 5;
/// Penalty per pawn standing on a file that holds two or more friendly pawns
pub const DOUBLED_PAWN_PENALTY: i32 = 10;
/// Knight bonus per friendly pawn on the knight's square colour
pub const KNIGHT_PAWN_AFFINITY: i32 = 2;
/// Bishop bonus per friendly pawn on the opposite square colour
pub const BISHOP_PAWN_AFFINITY: i32 = 2;

/// Ordering bonus for a move that gives check
pub const CHECK_BONUS: i32 = 100;

pub const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const ROOK_DIRS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
pub const KNIGHT_DIRS: [(i8, i8); 8] = [
    (1, 2), (-1, 2), (1, -2), (-1, -2),
    (2, 1), (2, -1), (-2, 1), (-2, -1),
];
pub const KING_DIRS: [(i8, i8); 8] = [
    (0, 1), (1, 0), (0, -1), (-1, 0),
    (1, 1), (1, -1), (-1, 1), (-1, -1),
];

/// Pieces a pawn may promote to, in generation order
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Light squares (b1, d1, ..., a2, c2, ...) as a bitboard
pub const LIGHT_SQUARES: u64 = 0x55AA_55AA_55AA_55AA;
pub const FILE_A: u64 = 0x0101_0101_0101_0101;
pub const FILE_H: u64 = FILE_A << 7;

pub const DEFAULT_MIN_DEPTH: u32 = 2;
pub const DEFAULT_MAX_DEPTH: u32 = 6;
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;
/// Nodes between two poll points
pub const DEFAULT_POLL_INTERVAL: u64 = 128;
pub const DEFAULT_MAX_QUIESCENCE_DEPTH: u32 = 8;
pub const DEFAULT_LOW_TIME_MS: u64 = 10_000;

/// Hard ceiling for iterative deepening, also bounds the recursion depth
pub const MAX_PLY: u32 = 64;

pub const ENGINE_NAME: &str = "checkmate.exe";
pub const ENGINE_AUTHOR: &str = "amel-fou mapatenk mwijnsma";
