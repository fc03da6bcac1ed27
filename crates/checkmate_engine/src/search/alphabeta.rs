//! Negamax alpha-beta search
//!
//! Each node scores positions from the point of view of the side to move,
//! so a child's score is negated on the way up and the window is swapped and
//! negated on the way down: `(alpha, beta)` becomes `(-beta, -alpha)`.
//!
//! Terminal nodes: no legal moves and in check is `Mated(ply)`, otherwise a
//! draw (stalemate). Depth 0 hands over to the quiescence search.

use super::ordering::order_moves;
use super::{Score, SearchControl, SearchResult, Searcher};
use crate::error::EngineResult;
use crate::move_gen::{is_in_check, legal_moves};

impl<C: SearchControl + ?Sized> Searcher<'_, C> {
    /// Fixed-depth negamax with alpha-beta pruning
    ///
    /// # Errors
    ///
    /// Propagates any error raised by the control at a poll point.
    pub fn negamax(&mut self, depth: u32, mut alpha: Score, beta: Score) -> EngineResult<SearchResult> {
        if self.enter_node()? {
            return Ok(SearchResult::unwound());
        }

        if depth == 0 {
            return self.quiescence(alpha, beta, 0);
        }

        let mut moves = legal_moves(&self.pos);
        if moves.is_empty() {
            let score = if is_in_check(&self.pos, self.pos.side_to_move) {
                Score::Mated(self.ply)
            } else {
                Score::Draw
            };
            return Ok(SearchResult::leaf(score));
        }

        order_moves(&self.pos, &mut moves);

        let mut best = SearchResult::leaf(Score::MIN);
        for mv in moves {
            let child = self.descend(mv, |s| s.negamax(depth - 1, -beta, -alpha))?;
            if self.unwound {
                return Ok(SearchResult::unwound());
            }

            let score = -child.score;
            if score > best.score {
                best = SearchResult {
                    score,
                    best_move: Some(mv),
                    reply: child.best_move,
                };
            }

            if score >= beta {
                return Ok(SearchResult {
                    score: beta,
                    best_move: Some(mv),
                    reply: child.best_move,
                });
            }

            if score > alpha {
                alpha = score;
            }
        }

        Ok(best)
    }
}
