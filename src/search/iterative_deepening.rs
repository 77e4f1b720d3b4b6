//! Iterative deepening driver over the negamax searcher.
//!
//! Runs complete root searches at depth 1, 2, ... up to the configured limit
//! and keeps the result of the deepest completed pass. A time budget is only
//! checked between passes: a pass that overruns still completes, and depth 1
//! always completes, so a search never returns without a move.

use std::time::{Duration, Instant};

use crate::errors::{TicTacErrors, TicTacResult};
use crate::game_state::position::{Outcome, Position};
use crate::game_state::variant::Variant;
use crate::search::board_scoring::BoardScorer;
use crate::search::negamax::Negamax;
use crate::search::transposition_table::{CacheConfig, TTStats, TranspositionTable};

/// Cache size used for 5×5 searches.
pub const FIVE_BY_FIVE_CACHE_ENTRIES: usize = 3_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub movetime_ms: Option<u64>,
    pub use_cache: bool,
    pub cache: CacheConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 9,
            movetime_ms: None,
            use_cache: true,
            cache: CacheConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Defaults used by the solver engine for each ruleset.
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Classic3x3 => Self::default(),
            Variant::Moveable3x3 => Self {
                max_depth: 20,
                use_cache: false,
                ..Self::default()
            },
            Variant::Square4x4 => Self {
                max_depth: 16,
                ..Self::default()
            },
            Variant::Five5x5 => Self {
                max_depth: 25,
                movetime_ms: Some(1000),
                use_cache: true,
                cache: CacheConfig {
                    capacity: Some(FIVE_BY_FIVE_CACHE_ENTRIES),
                    ..CacheConfig::default()
                },
            },
        }
    }
}

/// One completed deepening pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationReport {
    pub depth: u8,
    pub best_move: usize,
    pub best_score: i32,
    pub nodes: u64,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub best_move: Option<usize>,
    pub best_score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub nps: u64,
    pub tt_stats: TTStats,
    pub iterations: Vec<IterationReport>,
}

/// Search `position` for the side to move with a cache owned by this call.
pub fn solve<S: BoardScorer>(
    position: &Position,
    scorer: &S,
    config: &SearchConfig,
) -> TicTacResult<SearchResult> {
    if config.use_cache {
        let mut tt = TranspositionTable::new(config.cache);
        solve_with_tt(position, scorer, config, Some(&mut tt))
    } else {
        solve_with_tt(position, scorer, config, None)
    }
}

pub fn solve_with_tt<S: BoardScorer>(
    position: &Position,
    scorer: &S,
    config: &SearchConfig,
    mut tt: Option<&mut TranspositionTable>,
) -> TicTacResult<SearchResult> {
    if position.outcome() != Outcome::InProgress {
        return Err(TicTacErrors::GameAlreadyDecided);
    }
    let empty_cells = position.board.legal_moves().len();
    if empty_cells == 0 {
        return Err(TicTacErrors::NoLegalMoves);
    }

    let started_at = Instant::now();
    let budget = config.movetime_ms.map(Duration::from_millis);

    // Standard rulesets cannot last longer than the empty cells allow.
    let max_depth = if position.variant().caps_stones() {
        config.max_depth.max(1)
    } else {
        config.max_depth.clamp(1, empty_cells as u8)
    };

    let mut result = SearchResult::default();

    for depth in 1..=max_depth {
        let mut search = Negamax::new(position, scorer, tt.as_deref_mut());
        let best = search
            .search_root(position.side_to_move, depth)
            .ok_or(TicTacErrors::NoLegalMoves)?;

        result.best_move = Some(best.cell);
        result.best_score = best.score;
        result.reached_depth = depth;
        result.nodes += search.nodes();

        let elapsed = started_at.elapsed();
        result.iterations.push(IterationReport {
            depth,
            best_move: best.cell,
            best_score: best.score,
            nodes: search.nodes(),
            elapsed_ms: elapsed.as_millis() as u64,
        });

        if budget.is_some_and(|limit| elapsed >= limit) {
            break;
        }
    }

    result.elapsed_ms = started_at.elapsed().as_millis() as u64;
    result.nps = if result.elapsed_ms == 0 {
        0
    } else {
        result.nodes.saturating_mul(1000) / result.elapsed_ms
    };
    if let Some(tt) = tt {
        result.tt_stats = tt.stats();
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::{solve, SearchConfig};
    use crate::errors::TicTacErrors;
    use crate::game_state::board::Board;
    use crate::game_state::piece_history::PieceHistory;
    use crate::game_state::player::Player;
    use crate::game_state::position::Position;
    use crate::game_state::variant::Variant;
    use crate::search::board_scoring::{win_score, NeutralScorer, PositionalScorer};

    #[test]
    fn empty_three_by_three_is_a_draw_for_second_mover() {
        let pos = Position::new_game(Variant::Classic3x3, Player::Two);
        let config = SearchConfig {
            max_depth: 9,
            use_cache: false,
            ..SearchConfig::default()
        };
        let result = solve(&pos, &NeutralScorer, &config).expect("search should run");
        assert_eq!(result.best_score, 0);
        assert_eq!(result.reached_depth, 9);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn takes_immediate_win() {
        let board = Board::from_cells(Variant::Classic3x3, &[1, 1, 0, -1, -1, 0, 0, 0, 0])
            .expect("valid");
        let pos = Position::from_board(board, Player::One).expect("valid");
        let result =
            solve(&pos, &NeutralScorer, &SearchConfig::for_variant(Variant::Classic3x3))
                .expect("search should run");
        assert_eq!(result.best_move, Some(2));
        assert!(result.best_score > 0);
    }

    #[test]
    fn blocks_when_opponent_threatens() {
        let board = Board::from_cells(Variant::Classic3x3, &[-1, -1, 0, 0, 1, 0, 0, 0, 0])
            .expect("valid");
        let pos = Position::from_board(board, Player::One).expect("valid");
        let result =
            solve(&pos, &NeutralScorer, &SearchConfig::for_variant(Variant::Classic3x3))
                .expect("search should run");
        assert_eq!(result.best_move, Some(2));
    }

    #[test]
    fn depth_is_clamped_to_empty_cells() {
        let board = Board::from_cells(Variant::Classic3x3, &[1, -1, 1, -1, 1, -1, -1, 1, 0])
            .expect("valid");
        let pos = Position::from_board(board, Player::One).expect("valid");
        let result = solve(&pos, &NeutralScorer, &SearchConfig::default()).expect("search");
        assert_eq!(result.reached_depth, 1);
        assert_eq!(result.best_move, Some(8));
        assert_eq!(result.iterations.len(), 1);
    }

    #[test]
    fn decided_position_is_rejected() {
        let board = Board::from_cells(Variant::Classic3x3, &[1, 1, 1, -1, -1, 0, 0, 0, 0])
            .expect("valid");
        let pos = Position::from_board(board, Player::Two).expect("valid");
        assert_eq!(
            solve(&pos, &NeutralScorer, &SearchConfig::default()).map(|r| r.best_move),
            Err(TicTacErrors::GameAlreadyDecided)
        );
    }

    #[test]
    fn zero_budget_still_returns_depth_one() {
        let pos = Position::new_game(Variant::Five5x5, Player::One);
        let config = SearchConfig {
            movetime_ms: Some(0),
            ..SearchConfig::for_variant(Variant::Five5x5)
        };
        let result = solve(&pos, &PositionalScorer, &config).expect("search should run");
        assert_eq!(result.reached_depth, 1);
        assert_eq!(result.best_move, Some(12));
        assert_eq!(result.best_score, 7);
    }

    #[test]
    fn cache_on_and_off_agree_at_every_depth() {
        let board = Board::from_cells(
            Variant::Square4x4,
            &[1, -1, 0, 0, 0, 1, 0, 0, -1, 0, 0, 0, 0, 0, 0, 0],
        )
        .expect("valid");
        let pos = Position::from_board(board, Player::One).expect("valid");
        let cached = SearchConfig {
            max_depth: 5,
            ..SearchConfig::for_variant(Variant::Square4x4)
        };
        let uncached = SearchConfig {
            use_cache: false,
            ..cached
        };
        let a = solve(&pos, &PositionalScorer, &cached).expect("search");
        let b = solve(&pos, &PositionalScorer, &uncached).expect("search");
        assert_eq!(a.iterations.len(), b.iterations.len());
        for (x, y) in a.iterations.iter().zip(&b.iterations) {
            assert_eq!((x.best_move, x.best_score), (y.best_move, y.best_score));
        }
        assert!(a.tt_stats.stores > 0);
        assert_eq!(b.tt_stats.stores, 0);
    }

    #[test]
    fn moveable_line_through_oldest_stone_does_not_count() {
        // One holds 8, 4, 3 (8 oldest). Playing 0 would evict 8 and break 0-4-8;
        // playing 5 evicts 8 and completes 3-4-5.
        let board = Board::from_cells(Variant::Moveable3x3, &[0, -1, -1, 1, 1, 0, -1, 0, 1])
            .expect("valid");
        let history = PieceHistory::from_queues(&[8, 4, 3], &[1, 2, 6]).expect("valid");
        let pos = Position::from_parts(board, history, Player::One).expect("valid");
        let config = SearchConfig {
            max_depth: 4,
            ..SearchConfig::for_variant(Variant::Moveable3x3)
        };
        let result = solve(&pos, &NeutralScorer, &config).expect("search should run");
        assert_eq!(result.best_move, Some(5));
        assert_eq!(result.best_score, win_score(3));
        assert_eq!(result.reached_depth, 4);
        assert_eq!(result.tt_stats.probes, 0);
    }
}
