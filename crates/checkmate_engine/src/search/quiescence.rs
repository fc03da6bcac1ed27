//! Quiescence search to avoid horizon effect
//!
//! At depth 0 the position may be in the middle of an exchange. Instead of
//! trusting the static evaluation there, we keep searching *noisy* moves
//! only (captures, en passant included, and checks) until the position is
//! quiet. The side to move may always decline to continue, so the static
//! evaluation ("stand pat") is a lower bound on the result.
//!
//! The extension is capped at `max_quiescence_depth` plies; at the cap the
//! stand-pat value is returned as is.

use super::ordering::order_moves;
use super::{Score, SearchControl, SearchResult, Searcher};
use crate::board::Position;
use crate::error::EngineResult;
use crate::evaluation::evaluate;
use crate::move_gen::{gives_check, is_capture, legal_moves};
use crate::types::Move;

/// Captures and checking moves
pub(crate) fn is_noisy(pos: &Position, mv: Move) -> bool {
    is_capture(pos, mv) || gives_check(pos, mv)
}

impl<C: SearchControl + ?Sized> Searcher<'_, C> {
    /// Capture/check-only search below the main horizon
    ///
    /// # Errors
    ///
    /// Propagates any error raised by the control at a poll point.
    pub fn quiescence(&mut self, mut alpha: Score, beta: Score, qdepth: u32) -> EngineResult<SearchResult> {
        if self.enter_node()? {
            return Ok(SearchResult::unwound());
        }

        let stand_pat = Score::Centipawns(evaluate(&self.pos));

        if qdepth >= self.limits.max_quiescence_depth {
            return Ok(SearchResult::leaf(stand_pat));
        }

        if stand_pat >= beta {
            return Ok(SearchResult::leaf(beta));
        }

        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut result = SearchResult::leaf(alpha);

        let mut moves = legal_moves(&self.pos);
        moves.retain(|&mv| is_noisy(&self.pos, mv));
        order_moves(&self.pos, &mut moves);

        for mv in moves {
            let child = self.descend(mv, |s| s.quiescence(-beta, -alpha, qdepth + 1))?;
            if self.unwound {
                return Ok(SearchResult::unwound());
            }

            let score = -child.score;
            if score >= beta {
                return Ok(SearchResult {
                    score: beta,
                    best_move: Some(mv),
                    reply: child.best_move,
                });
            }

            if score > alpha {
                alpha = score;
                result = SearchResult {
                    score,
                    best_move: Some(mv),
                    reply: child.best_move,
                };
            }
        }

        Ok(result)
    }
}
