//! Search scores
//!
//! A [`Score`] is either a centipawn value, a draw, or a forced mate
//! annotated with its distance in plies from the search root. Mates sort
//! outside every centipawn value, and among mates the nearer one is better
//! for the winner (`Mate(1) > Mate(3)`) and worse for the loser
//! (`Mated(0) < Mated(2)`).

use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;

/// Key offset that places mates beyond any reachable centipawn value
const MATE_BASE: i64 = 1 << 40;

#[derive(Clone, Copy, Debug)]
pub enum Score {
    /// The side to move gets mated at this ply
    Mated(u32),
    Centipawns(i32),
    Draw,
    /// The side to move mates at this ply
    Mate(u32),
}

impl Score {
    /// Worst possible score, also the initial "best so far"
    pub const MIN: Score = Score::Mated(0);
    pub const MAX: Score = Score::Mate(0);
    pub const ZERO: Score = Score::Centipawns(0);

    fn key(self) -> i64 {
        match self {
            Score::Mated(ply) => -MATE_BASE + ply as i64,
            Score::Centipawns(cp) => cp as i64,
            Score::Draw => 0,
            Score::Mate(ply) => MATE_BASE - ply as i64,
        }
    }

    /// Protocol rendering: `cp <n>` or `mate <moves>` (negative when mated)
    pub fn uci(self) -> String {
        match self {
            Score::Centipawns(cp) => format!("cp {cp}"),
            Score::Draw => "cp 0".to_string(),
            Score::Mate(ply) => format!("mate {}", (ply + 1) / 2),
            Score::Mated(ply) => format!("mate -{}", (ply + 1) / 2),
        }
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl Neg for Score {
    type Output = Score;

    fn neg(self) -> Score {
        match self {
            Score::Mated(ply) => Score::Mate(ply),
            Score::Centipawns(cp) => Score::Centipawns(cp.saturating_neg()),
            Score::Draw => Score::Draw,
            Score::Mate(ply) => Score::Mated(ply),
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uci())
    }
}
