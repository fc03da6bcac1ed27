//! # Checkmate - A Pondering UCI Chess Engine
//!
//! A small alpha-beta engine that speaks the Universal Chess Interface over
//! text lines and keeps thinking while the opponent is on move.
//!
//! ## Crate Layout
//!
//! - [`types`], [`bitset`], [`board`] - squares, pieces, moves and the
//!   [`board::Position`] the engine searches
//! - [`notation`] - FEN and coordinate move text
//! - [`move_gen`] - legal move generation and move application
//! - [`evaluation`] - static evaluation (material, piece-square tables,
//!   pawn structure)
//! - [`search`] - negamax alpha-beta, quiescence, iterative deepening and
//!   cooperative cancellation
//! - [`engine`] - command intake, protocol parsing, configuration and the
//!   pondering state machine
//!
//! ## Example
//!
//! ```no_run
//! use checkmate_engine::engine::{spawn_stdin_reader, Engine, EngineConfig};
//!
//! # fn main() -> Result<(), checkmate_engine::EngineError> {
//! let (source, _reader) = spawn_stdin_reader()?;
//! let stdout = std::io::stdout();
//! let mut engine = Engine::new(EngineConfig::default(), source, stdout.lock())?;
//! engine.run()?;
//! # Ok(())
//! # }
//! ```

pub mod bitset;
pub mod board;
pub mod constants;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod move_gen;
pub mod notation;
pub mod search;
pub mod types;

pub use board::Position;
pub use engine::{Engine, EngineConfig, EngineState};
pub use error::{EngineError, EngineResult};
pub use search::{Score, SearchLimits, Searcher};
pub use types::{Color, Move, Piece, PieceKind, Square};
