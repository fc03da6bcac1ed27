//! Move making and unmaking for search
//!
//! A [`Position`] is a flat `Copy` value, so the undo information is simply
//! the whole position before the move. Restoring it brings back the board,
//! rights, en-passant square and the already consistent bitboards at once.

use super::{SearchControl, SearchResult, Searcher};
use crate::board::Position;
use crate::error::EngineResult;
use crate::move_gen::apply_move;
use crate::types::Move;

/// Position before a move
#[derive(Clone, Copy)]
pub(crate) struct Snapshot(Position);

/// Make a move on the board (returns the snapshot to restore)
pub(crate) fn make_move(pos: &mut Position, mv: Move) -> Snapshot {
    let snapshot = Snapshot(*pos);
    apply_move(pos, mv);
    snapshot
}

/// Unmake a move on the board
pub(crate) fn unmake_move(pos: &mut Position, snapshot: Snapshot) {
    *pos = snapshot.0;
}

impl<C: SearchControl + ?Sized> Searcher<'_, C> {
    /// Play `mv`, run `child` one ply deeper, then restore, also on error
    pub(super) fn descend<F>(&mut self, mv: Move, child: F) -> EngineResult<SearchResult>
    where
        F: FnOnce(&mut Self) -> EngineResult<SearchResult>,
    {
        let snapshot = make_move(&mut self.pos, mv);
        self.ply += 1;
        let result = child(self);
        self.ply -= 1;
        unmake_move(&mut self.pos, snapshot);
        result
    }
}
