//! Iterative deepening search
//!
//! Runs full-window negamax at `min_depth`, `min_depth + 1`, ... and keeps
//! the result of the deepest iteration that ran to completion. Each
//! completed iteration is reported to the [`SearchControl`] (which prints
//! the `info depth ...` line).
//!
//! The loop ends when
//! - a *discard* arrives: the whole search is thrown away
//! - an iteration is unwound by *stop*: the previous iteration stands
//! - *stop* is already set after an iteration completes
//! - the next depth would exceed the control's depth limit or [`MAX_PLY`]

use instant::Instant;
use tracing::{debug, info};

use super::{CompletedDepth, Score, SearchControl, Searcher};
use crate::constants::MAX_PLY;
use crate::error::{EngineError, EngineResult};
use crate::types::move_text;

#[derive(Clone, Copy, Debug)]
pub enum DeepeningOutcome {
    /// The search was cancelled with discard; no result exists
    Discarded,
    /// Deepest completed iteration
    Completed(CompletedDepth),
}

impl<C: SearchControl + ?Sized> Searcher<'_, C> {
    /// Iterative deepening search
    ///
    /// # Errors
    ///
    /// [`EngineError::NoMoveFound`] if not even the first iteration
    /// completed without a discard, plus anything the control raises.
    pub fn deepen(&mut self) -> EngineResult<DeepeningOutcome> {
        let start_time = Instant::now();
        let mut best: Option<CompletedDepth> = None;
        let mut depth = self.limits.min_depth.max(1);

        loop {
            self.iteration_depth = depth;
            self.unwound = false;
            self.ply = 0;

            let result = self.negamax(depth, Score::MIN, Score::MAX)?;

            if self.signal.discard {
                debug!(depth, nodes = self.nodes, "search discarded");
                return Ok(DeepeningOutcome::Discarded);
            }

            if self.unwound {
                debug!(depth, "iteration interrupted, keeping previous depth");
                break;
            }

            let completed = CompletedDepth {
                depth,
                result,
                nodes: self.nodes,
                elapsed: start_time.elapsed(),
            };
            info!(
                depth,
                score = %result.score,
                nodes = self.nodes,
                best = %move_text(result.best_move),
                "depth completed"
            );
            self.control.report(&completed)?;
            best = Some(completed);

            if self.signal.stop {
                break;
            }

            depth += 1;
            if depth > MAX_PLY {
                break;
            }
            if let Some(limit) = self.control.depth_limit() {
                if depth > limit {
                    break;
                }
            }
        }

        best.map(DeepeningOutcome::Completed)
            .ok_or(EngineError::NoMoveFound { depth })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;
    use crate::search::{Cancellation, FixedDepth, SearchLimits};

    fn limits(min_depth: u32) -> SearchLimits {
        SearchLimits {
            min_depth,
            poll_interval: 1,
            max_quiescence_depth: 4,
        }
    }

    #[test]
    fn test_reports_every_depth_up_to_limit() {
        let mut control = FixedDepth::new(3);
        let outcome = Searcher::new(Position::startpos(), &mut control, limits(1))
            .deepen()
            .unwrap();
        let depths: Vec<u32> = control.reports.iter().map(|r| r.depth).collect();
        assert_eq!(depths, vec![1, 2, 3]);
        match outcome {
            DeepeningOutcome::Completed(done) => {
                assert_eq!(done.depth, 3);
                assert!(done.result.best_move.is_some());
            }
            DeepeningOutcome::Discarded => panic!("nothing asked for a discard"),
        }
    }

    /// Raises a fixed signal after a number of polls
    struct StopAfter {
        polls: u32,
        signal: Cancellation,
        reports: u32,
    }

    impl SearchControl for StopAfter {
        fn poll(&mut self) -> EngineResult<Cancellation> {
            if self.polls == 0 {
                return Ok(self.signal);
            }
            self.polls -= 1;
            Ok(Cancellation::NONE)
        }

        fn report(&mut self, _completed: &CompletedDepth) -> EngineResult<()> {
            self.reports += 1;
            Ok(())
        }

        fn depth_limit(&self) -> Option<u32> {
            None
        }
    }

    #[test]
    fn test_stop_keeps_minimum_depth_result() {
        let mut control = StopAfter {
            polls: 0,
            signal: Cancellation::STOP,
            reports: 0,
        };
        let outcome = Searcher::new(Position::startpos(), &mut control, limits(2))
            .deepen()
            .unwrap();
        assert_eq!(control.reports, 1);
        assert!(matches!(
            outcome,
            DeepeningOutcome::Completed(CompletedDepth { depth: 2, .. })
        ));
    }

    #[test]
    fn test_discard_throws_result_away() {
        let mut control = StopAfter {
            polls: 10,
            signal: Cancellation::DISCARD,
            reports: 0,
        };
        let outcome = Searcher::new(Position::startpos(), &mut control, limits(2))
            .deepen()
            .unwrap();
        assert!(matches!(outcome, DeepeningOutcome::Discarded));
    }

    #[test]
    fn test_working_position_restored_after_unwind() {
        let root = Position::startpos();
        let mut control = StopAfter {
            polls: 500,
            signal: Cancellation::STOP,
            reports: 0,
        };
        let mut searcher = Searcher::new(root, &mut control, limits(1));
        searcher.deepen().unwrap();
        assert_eq!(searcher.position(), &root);
    }
}
