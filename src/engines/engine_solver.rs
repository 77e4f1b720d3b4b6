//! Solver engine: opening book where it applies, iterative deepening
//! everywhere else.
//!
//! One instance plays one ruleset. The 4×4 engine answers early positions from
//! its opening book; inside the book's coverage a missing row, or a missing
//! book, is reported as an error rather than replaced by a shallow search.

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::engines::time_management::resolve_search_config;
use crate::errors::{TicTacErrors, TicTacResult};
use crate::game_state::position::{Outcome, Position};
use crate::game_state::variant::Variant;
use crate::search::board_scoring::PositionalScorer;
use crate::search::iterative_deepening::{solve, SearchConfig, SearchResult};
use crate::search::transposition_table::RecencyPolicy;
use crate::tables::opening_book::{BookMove, OpeningBook, BOOK_MAX_STONES};

pub struct SolverEngine {
    variant: Variant,
    config: SearchConfig,
    scorer: PositionalScorer,
    opening_book: Option<OpeningBook>,
    use_own_book: bool,
}

impl SolverEngine {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            config: SearchConfig::for_variant(variant),
            scorer: PositionalScorer,
            opening_book: None,
            use_own_book: variant.uses_opening_book(),
        }
    }

    pub fn with_config(variant: Variant, config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::new(variant)
        }
    }

    /// Attach a book. Fails if the book was built for another ruleset.
    pub fn with_opening_book(mut self, book: OpeningBook) -> TicTacResult<Self> {
        if book.variant() != self.variant {
            return Err(TicTacErrors::VariantMismatch {
                expected: self.variant,
                found: book.variant(),
            });
        }
        self.opening_book = Some(book);
        Ok(self)
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// `None` when the position is outside book play. Inside it, the book
    /// must answer: no attached book counts as a miss.
    fn book_reply(&self, position: &Position) -> Option<TicTacResult<BookMove>> {
        let board = &position.board;
        if !self.use_own_book
            || !self.variant.uses_opening_book()
            || board.total_stones() > BOOK_MAX_STONES
        {
            return None;
        }
        Some(match &self.opening_book {
            Some(book) => book.lookup(board),
            None => Err(TicTacErrors::BookMiss(board.serialize())),
        })
    }

    fn search_lines(result: &SearchResult, use_cache: bool) -> Vec<String> {
        let mut lines = Vec::with_capacity(result.iterations.len() + 2);
        for it in &result.iterations {
            lines.push(format!(
                "info depth {} score {} nodes {} time {} currmove {}",
                it.depth, it.best_score, it.nodes, it.elapsed_ms, it.best_move
            ));
        }
        lines.push(format!(
            "info depth {} score {} nodes {} time {} nps {}",
            result.reached_depth, result.best_score, result.nodes, result.elapsed_ms, result.nps
        ));
        if use_cache {
            let stats = result.tt_stats;
            lines.push(format!(
                "info string tt probes {} hits {} stores {} evictions {}",
                stats.probes, stats.hits, stats.stores, stats.evictions
            ));
        }
        lines
    }
}

fn parse_bool(name: &str, value: &str) -> TicTacResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid_option(name, value)),
    }
}

fn invalid_option(name: &str, value: &str) -> TicTacErrors {
    TicTacErrors::InvalidOption {
        name: name.to_owned(),
        value: value.to_owned(),
    }
}

impl Engine for SolverEngine {
    fn name(&self) -> &str {
        "Solver"
    }

    fn set_option(&mut self, name: &str, value: &str) -> TicTacResult<()> {
        if name.eq_ignore_ascii_case("Depth") {
            let depth = value
                .trim()
                .parse::<u8>()
                .map_err(|_| invalid_option(name, value))?;
            self.config.max_depth = depth.max(1);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("MoveTime") {
            let ms = value
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid_option(name, value))?;
            // 0 removes the budget.
            self.config.movetime_ms = (ms > 0).then_some(ms);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("CacheEntries") {
            let entries = value
                .trim()
                .parse::<usize>()
                .map_err(|_| invalid_option(name, value))?;
            self.config.cache.capacity = (entries > 0).then_some(entries);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("UseCache") {
            self.config.use_cache = parse_bool(name, value)?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("LruRefresh") {
            self.config.cache.recency = if parse_bool(name, value)? {
                RecencyPolicy::RefreshOnHit
            } else {
                RecencyPolicy::InsertionOrder
            };
            return Ok(());
        }
        if name.eq_ignore_ascii_case("DepthPreferred") {
            self.config.cache.depth_preferred = parse_bool(name, value)?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("OwnBook") {
            self.use_own_book = parse_bool(name, value)?;
            return Ok(());
        }
        Err(invalid_option(name, value))
    }

    fn choose_move(
        &mut self,
        position: &Position,
        params: &GoParams,
    ) -> TicTacResult<EngineOutput> {
        if position.variant() != self.variant {
            return Err(TicTacErrors::VariantMismatch {
                expected: self.variant,
                found: position.variant(),
            });
        }
        if position.outcome() != Outcome::InProgress {
            return Err(TicTacErrors::GameAlreadyDecided);
        }

        let mut out = EngineOutput::default();

        if let Some(reply) = self.book_reply(position) {
            let book_move = reply?;
            out.best_move = Some(book_move.cell);
            out.score = Some(book_move.score);
            out.info_lines
                .push("info string opening book move".to_owned());
            return Ok(out);
        }

        let config = resolve_search_config(&self.config, params);
        let result = solve(position, &self.scorer, &config)?;

        out.best_move = result.best_move;
        out.score = Some(result.best_score);
        out.info_lines = Self::search_lines(&result, config.use_cache);
        if let Some(ms) = config.movetime_ms {
            out.info_lines
                .push(format!("info string solver movetime_ms {ms}"));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::SolverEngine;
    use crate::engines::engine_trait::{Engine, GoParams};
    use crate::errors::TicTacErrors;
    use crate::game_state::board::Board;
    use crate::game_state::player::Player;
    use crate::game_state::position::Position;
    use crate::game_state::variant::Variant;
    use crate::search::transposition_table::RecencyPolicy;
    use crate::tables::opening_book::OpeningBook;

    fn four_by_four_book() -> OpeningBook {
        OpeningBook::from_text(
            Variant::Square4x4,
            "0000000000000000 5 0\n0000010000000000 6 0\n",
        )
        .expect("book should parse")
    }

    #[test]
    fn book_row_is_returned_without_search() {
        let mut engine = SolverEngine::new(Variant::Square4x4)
            .with_opening_book(four_by_four_book())
            .expect("same ruleset");
        let mut pos = Position::new_game(Variant::Square4x4, Player::One);
        pos.play(5).expect("empty");

        let out = engine.choose_move(&pos, &GoParams::default()).expect("book hit");
        assert_eq!(out.best_move, Some(6));
        assert_eq!(out.score, Some(0));
        assert_eq!(out.info_lines, vec!["info string opening book move".to_owned()]);
    }

    #[test]
    fn book_miss_inside_coverage_is_an_error() {
        let mut engine = SolverEngine::new(Variant::Square4x4)
            .with_opening_book(four_by_four_book())
            .expect("same ruleset");
        let mut pos = Position::new_game(Variant::Square4x4, Player::One);
        pos.play(0).expect("empty");

        let err = engine
            .choose_move(&pos, &GoParams::default())
            .expect_err("row is missing");
        assert_eq!(err, TicTacErrors::BookMiss("1000000000000000".to_owned()));
    }

    #[test]
    fn four_by_four_without_book_refuses_to_search_early_positions() {
        let mut engine = SolverEngine::new(Variant::Square4x4);
        let pos = Position::new_game(Variant::Square4x4, Player::One);
        let params = GoParams {
            depth: Some(2),
            movetime_ms: None,
        };
        assert_eq!(
            engine.choose_move(&pos, &params).map(|out| out.best_move),
            Err(TicTacErrors::BookMiss("0000000000000000".to_owned()))
        );
    }

    #[test]
    fn four_by_four_without_book_searches_past_coverage() {
        let mut engine = SolverEngine::new(Variant::Square4x4);
        let board = Board::from_cells(
            Variant::Square4x4,
            &[1, 1, 1, 0, -1, -1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        )
        .expect("valid");
        let pos = Position::from_board(board, Player::Two).expect("valid");
        let out = engine
            .choose_move(
                &pos,
                &GoParams {
                    depth: Some(2),
                    movetime_ms: None,
                },
            )
            .expect("five stones is past book coverage");
        assert_eq!(out.best_move, Some(3));
    }

    #[test]
    fn own_book_off_falls_through_to_search() {
        let mut engine = SolverEngine::new(Variant::Square4x4)
            .with_opening_book(four_by_four_book())
            .expect("same ruleset");
        engine.set_option("OwnBook", "false").expect("valid");

        let board = Board::from_cells(
            Variant::Square4x4,
            &[1, 1, 1, 0, -1, -1, -1, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        )
        .expect("valid");
        let pos = Position::from_board(board, Player::One).expect("valid");
        let out = engine
            .choose_move(
                &pos,
                &GoParams {
                    depth: Some(3),
                    movetime_ms: None,
                },
            )
            .expect("search");
        assert_eq!(out.best_move, Some(3));
        assert!(out.info_lines.iter().any(|l| l.starts_with("info depth 3 ")));
        assert!(out.info_lines.iter().any(|l| l.starts_with("info string tt probes")));
    }

    #[test]
    fn wrong_ruleset_is_rejected() {
        let mut engine = SolverEngine::new(Variant::Classic3x3);
        let pos = Position::new_game(Variant::Five5x5, Player::One);
        assert!(matches!(
            engine.choose_move(&pos, &GoParams::default()),
            Err(TicTacErrors::VariantMismatch { .. })
        ));
        assert!(SolverEngine::new(Variant::Classic3x3)
            .with_opening_book(four_by_four_book())
            .is_err());
    }

    #[test]
    fn options_update_config() {
        let mut engine = SolverEngine::new(Variant::Five5x5);
        engine.set_option("Depth", "4").expect("valid");
        engine.set_option("movetime", "0").expect("valid");
        engine.set_option("CacheEntries", "0").expect("valid");
        engine.set_option("LruRefresh", "on").expect("valid");
        engine.set_option("DepthPreferred", "yes").expect("valid");
        engine.set_option("UseCache", "false").expect("valid");

        let config = engine.config();
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.movetime_ms, None);
        assert_eq!(config.cache.capacity, None);
        assert_eq!(config.cache.recency, RecencyPolicy::RefreshOnHit);
        assert!(config.cache.depth_preferred);
        assert!(!config.use_cache);

        assert!(matches!(
            engine.set_option("Depth", "deep"),
            Err(TicTacErrors::InvalidOption { .. })
        ));
        assert!(engine.set_option("Threads", "4").is_err());
    }

    #[test]
    fn empty_three_by_three_is_drawn() {
        let mut engine = SolverEngine::new(Variant::Classic3x3);
        let pos = Position::new_game(Variant::Classic3x3, Player::Two);
        let out = engine.choose_move(&pos, &GoParams::default()).expect("search");
        assert_eq!(out.score, Some(0));
        assert!(out.best_move.is_some());
    }
}
