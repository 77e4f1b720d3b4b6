//! Terminal scoring and pluggable cutoff heuristics.
//!
//! Search delegates non-terminal cutoff scoring to the `BoardScorer` trait so
//! alternate heuristics can be swapped without touching the search code.

use crate::game_state::board::Board;
use crate::game_state::player::Player;

/// Base value of a decided game; remaining depth is added on top so quicker
/// wins (and slower losses) score higher.
pub const WIN_SCORE: i32 = 100;

/// Bound wider than any reachable score.
pub const SCORE_INFINITY: i32 = 10_000;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of `player`, the side to move.
    fn score(&self, board: &Board, player: Player) -> i32;
}

/// Treats every unfinished position as unknown.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralScorer;

impl BoardScorer for NeutralScorer {
    #[inline]
    fn score(&self, _board: &Board, _player: Player) -> i32 {
        0
    }
}

/// Sums the variant's per-cell weights, positive for `player`'s stones and
/// negative for the opponent's. Variants without weights score 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalScorer;

impl BoardScorer for PositionalScorer {
    fn score(&self, board: &Board, player: Player) -> i32 {
        let Some(weights) = board.variant().position_weights() else {
            return 0;
        };

        let mut score = 0i32;
        for (sign, mut bb) in [
            (1, board.stones(player)),
            (-1, board.stones(player.opposite())),
        ] {
            while bb != 0 {
                let cell = bb.trailing_zeros() as usize;
                score += sign * weights[cell];
                bb &= bb - 1;
            }
        }
        score
    }
}

/// Score for the side that has won with `depth` plies of budget left.
#[inline]
pub const fn win_score(depth: u8) -> i32 {
    WIN_SCORE + depth as i32
}

/// Score for the side that has lost with `depth` plies of budget left.
#[inline]
pub const fn loss_score(depth: u8) -> i32 {
    -win_score(depth)
}

#[inline]
pub const fn is_decisive(score: i32) -> bool {
    score >= WIN_SCORE || score <= -WIN_SCORE
}
