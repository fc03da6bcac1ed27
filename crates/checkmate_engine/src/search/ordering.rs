//! Move ordering for alpha-beta pruning
//!
//! Orders moves to maximize alpha-beta pruning efficiency by trying the
//! likely best moves first. The heuristic score of a move is:
//!
//! - the value of the captured piece (en passant counts as a pawn)
//! - plus [`CHECK_BONUS`] if the move gives check
//! - plus the piece-square gain of the moving piece (destination minus
//!   origin, in the current game phase)

use crate::board::Position;
use crate::constants::CHECK_BONUS;
use crate::evaluation::{game_phase, square_value, GamePhase};
use crate::move_gen::{captured_kind, gives_check};
use crate::types::Move;

/// Heuristic ordering score of a single move
pub fn score_move(pos: &Position, mv: Move, phase: GamePhase) -> i32 {
    let mut score = 0;

    if let Some(victim) = captured_kind(pos, mv) {
        score += victim.value();
    }

    if gives_check(pos, mv) {
        score += CHECK_BONUS;
    }

    if let Some(piece) = pos.piece_at(mv.from) {
        score += square_value(piece, mv.to, phase) - square_value(piece, mv.from, phase);
    }

    score
}

/// Score every move and sort descending; ties keep generation order
pub fn order_moves(pos: &Position, moves: &mut [Move]) {
    let phase = game_phase(pos);
    for mv in moves.iter_mut() {
        mv.score = score_move(pos, *mv, phase);
    }

    // sort_by is stable
    moves.sort_by(|a, b| b.score.cmp(&a.score));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_gen::legal_moves;
    use crate::types::Square;

    fn mv(text: &str) -> Move {
        Move::new(
            Square::parse(&text[0..2]).unwrap(),
            Square::parse(&text[2..4]).unwrap(),
        )
    }

    #[test]
    fn test_order_moves_prioritizes_captures() {
        // white pawn e4 can take the black queen on d5
        let pos = Position::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let mut moves = legal_moves(&pos);
        order_moves(&pos, &mut moves);
        assert_eq!(moves[0], mv("e4d5"));
    }

    #[test]
    fn test_check_bonus_applied() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let phase = game_phase(&pos);
        let check = score_move(&pos, mv("a1a8"), phase);
        let quiet = score_move(&pos, mv("a1a7"), phase);
        // a8 and a7 differ by 5 in the rook table (0 vs 5)
        assert_eq!(check - quiet, CHECK_BONUS - 5);
    }

    #[test]
    fn test_scores_written_and_sorted_descending() {
        let pos = Position::startpos();
        let mut moves = legal_moves(&pos);
        order_moves(&pos, &mut moves);
        assert!(moves.windows(2).all(|pair| pair[0].score >= pair[1].score));
        assert!(moves.iter().any(|m| m.score != 0));
    }

    #[test]
    fn test_ties_keep_generation_order() {
        let pos = Position::startpos();
        let generated = legal_moves(&pos);
        let mut ordered = generated.clone();
        order_moves(&pos, &mut ordered);
        for pair in ordered.windows(2) {
            if pair[0].score == pair[1].score {
                let first = generated.iter().position(|&m| m == pair[0]);
                let second = generated.iter().position(|&m| m == pair[1]);
                assert!(first < second);
            }
        }
    }
}
