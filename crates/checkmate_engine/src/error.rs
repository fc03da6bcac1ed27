//! Error types for the engine
//!
//! Protocol-input problems (bad FEN, bad move text) are recovered where they
//! occur and only logged. The remaining variants are invariant violations or
//! resource exhaustion and end the engine loop.

use thiserror::Error;

use crate::types::Move;

/// Errors that can occur in the engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// FEN text could not be parsed
    #[error("Invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    /// Move text is not of the form `e2e4` / `e7e8q`
    #[error("Invalid move token '{token}'")]
    InvalidMoveToken { token: String },

    /// Well-formed move that is not legal in the position
    #[error("Illegal move {mv}")]
    IllegalMove { mv: Move },

    /// Command intake is full
    #[error("Command queue overflow (capacity {capacity})")]
    QueueOverflow { capacity: usize },

    /// Command arrived in a state that cannot accept it
    #[error("Unexpected '{event}' while {state}")]
    UnexpectedTransition { state: String, event: String },

    /// The predicted reply is not legal after our own move
    #[error("Predicted reply {mv} is illegal")]
    IllegalPrediction { mv: Move },

    /// Search finished without completing a single depth
    #[error("No move found, search unwound before depth {depth} completed")]
    NoMoveFound { depth: u32 },

    /// Invalid engine configuration
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
