//! Cooperative cancellation
//!
//! The searcher never looks at the protocol itself. Every `poll_interval`
//! nodes it calls [`SearchControl::poll`], which gives the owner of the
//! search a chance to drain pending commands and answer with a
//! [`Cancellation`]. Between the poll points the search runs undisturbed.
//!
//! Two flags travel back:
//!
//! - **stop**: unwind and keep the deepest completed iteration
//! - **discard**: unwind and throw everything away (misprediction, quit)
//!
//! The minimum depth is protected: a plain stop only interrupts iterations
//! deeper than `min_depth`, so a move is always available. A discard
//! interrupts at any depth.

use std::time::Duration;

use super::SearchResult;
use crate::error::EngineResult;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cancellation {
    pub stop: bool,
    pub discard: bool,
}

impl Cancellation {
    pub const NONE: Cancellation = Cancellation {
        stop: false,
        discard: false,
    };
    pub const STOP: Cancellation = Cancellation {
        stop: true,
        discard: false,
    };
    pub const DISCARD: Cancellation = Cancellation {
        stop: true,
        discard: true,
    };

    /// Merge another signal in; flags are only ever raised
    pub fn raise(&mut self, other: Cancellation) {
        self.stop |= other.stop;
        self.discard |= other.discard;
    }

    /// Whether an iteration at `iteration_depth` must unwind now
    pub fn should_unwind(self, iteration_depth: u32, min_depth: u32) -> bool {
        self.stop && (self.discard || iteration_depth > min_depth)
    }
}

/// One finished iteration of the deepening loop
#[derive(Clone, Copy, Debug)]
pub struct CompletedDepth {
    pub depth: u32,
    pub result: SearchResult,
    /// Nodes visited since the search started
    pub nodes: u64,
    pub elapsed: Duration,
}

/// The seam between a running search and whoever owns it
pub trait SearchControl {
    /// Called at every poll point
    ///
    /// # Errors
    ///
    /// Any error aborts the search and is returned from it unchanged.
    fn poll(&mut self) -> EngineResult<Cancellation>;

    /// Called once per completed iteration
    fn report(&mut self, completed: &CompletedDepth) -> EngineResult<()>;

    /// Deepest iteration worth starting, `None` for unbounded
    fn depth_limit(&self) -> Option<u32>;
}

/// Control for fixed-depth searches: never cancels, records every report
#[derive(Debug, Default)]
pub struct FixedDepth {
    pub depth: u32,
    pub reports: Vec<CompletedDepth>,
}

impl FixedDepth {
    pub fn new(depth: u32) -> Self {
        FixedDepth {
            depth,
            reports: Vec::new(),
        }
    }
}

impl SearchControl for FixedDepth {
    fn poll(&mut self) -> EngineResult<Cancellation> {
        Ok(Cancellation::NONE)
    }

    fn report(&mut self, completed: &CompletedDepth) -> EngineResult<()> {
        self.reports.push(*completed);
        Ok(())
    }

    fn depth_limit(&self) -> Option<u32> {
        Some(self.depth)
    }
}
