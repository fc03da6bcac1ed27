//! Alpha-beta search with iterative deepening
//!
//! This module implements the core search using:
//! - Negamax variant of alpha-beta pruning
//! - Quiescence search over captures and checks at the leaves
//! - Move ordering for better pruning
//! - Iterative deepening with cooperative cancellation
//!
//! A [`Searcher`] owns a private working copy of the position and borrows
//! its owner only through the [`SearchControl`] trait. Every move it tries is
//! bracketed by snapshot and restore, so after any search, finished or
//! unwound, the working position equals the root it started from.
//!
//! ## Module Organization
//!
//! - `alphabeta` - Core negamax alpha-beta recursion
//! - `quiescence` - Quiescence search to avoid horizon effect
//! - `ordering` - Move ordering heuristics
//! - `make_unmake` - Snapshot/restore around moves
//! - `iterative` - Iterative deepening driver
//! - `control` - Poll points and cancellation flags
//! - `score` - Mate-aware score type

mod alphabeta;
mod control;
mod iterative;
mod make_unmake;
mod ordering;
mod quiescence;
mod score;

pub use control::{Cancellation, CompletedDepth, FixedDepth, SearchControl};
pub use iterative::DeepeningOutcome;
pub use ordering::{order_moves, score_move};
pub use score::Score;

use crate::board::Position;
use crate::constants::{
    DEFAULT_MAX_QUIESCENCE_DEPTH, DEFAULT_MIN_DEPTH, DEFAULT_POLL_INTERVAL,
};
use crate::error::EngineResult;
use crate::types::Move;

/// Depth and cadence parameters of one search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    /// First iteration; never interrupted by a plain stop
    pub min_depth: u32,
    /// Nodes between two poll points
    pub poll_interval: u64,
    pub max_quiescence_depth: u32,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            min_depth: DEFAULT_MIN_DEPTH,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_quiescence_depth: DEFAULT_MAX_QUIESCENCE_DEPTH,
        }
    }
}

/// Outcome of searching one node
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub score: Score,
    pub best_move: Option<Move>,
    /// Best move found for the opponent after `best_move`
    pub reply: Option<Move>,
}

impl SearchResult {
    /// Placeholder returned while unwinding a cancelled iteration
    pub const fn unwound() -> Self {
        SearchResult {
            score: Score::ZERO,
            best_move: None,
            reply: None,
        }
    }

    pub const fn leaf(score: Score) -> Self {
        SearchResult {
            score,
            best_move: None,
            reply: None,
        }
    }
}

pub struct Searcher<'c, C: SearchControl + ?Sized> {
    pos: Position,
    control: &'c mut C,
    limits: SearchLimits,
    nodes: u64,
    /// Distance from the root, used for mate scores
    ply: u32,
    iteration_depth: u32,
    signal: Cancellation,
    unwound: bool,
}

impl<'c, C: SearchControl + ?Sized> Searcher<'c, C> {
    pub fn new(root: Position, control: &'c mut C, limits: SearchLimits) -> Self {
        Searcher {
            pos: root,
            control,
            limits: SearchLimits {
                poll_interval: limits.poll_interval.max(1),
                ..limits
            },
            nodes: 0,
            ply: 0,
            iteration_depth: limits.min_depth,
            signal: Cancellation::NONE,
            unwound: false,
        }
    }

    /// Working position; equals the root whenever no search is running
    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Cancellation flags gathered so far
    pub fn signal(&self) -> Cancellation {
        self.signal
    }

    /// Count a node, poll on cadence, and report whether to unwind
    fn enter_node(&mut self) -> EngineResult<bool> {
        if self.unwound {
            return Ok(true);
        }

        self.nodes += 1;
        if self.nodes % self.limits.poll_interval == 0 {
            self.poll()?;
        }

        if self
            .signal
            .should_unwind(self.iteration_depth, self.limits.min_depth)
        {
            self.unwound = true;
        }
        Ok(self.unwound)
    }

    fn poll(&mut self) -> EngineResult<()> {
        let signal = self.control.poll()?;
        self.signal.raise(signal);

        // the own-time bound can shrink mid-iteration after a ponder hit
        if let Some(limit) = self.control.depth_limit() {
            if self.iteration_depth > limit {
                self.signal.stop = true;
            }
        }
        Ok(())
    }
}
