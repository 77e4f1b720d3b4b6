//! Negamax with alpha-beta pruning and principal-variation re-search.
//!
//! The searcher owns a working copy of the board (and, for the moveable
//! ruleset, the placement history) and applies/undoes moves in place. Every
//! move's effect is reverted before its sibling is tried.
//!
//! Children after the window is opened are probed with a null window first and
//! re-searched with the full window only when the probe lands strictly inside
//! `(alpha, beta)`. Moves are always tried in ascending cell order.

use crate::game_state::board::Board;
use crate::game_state::piece_history::{
    place_capped_unchecked, undo_capped, PieceHistory, Placement,
};
use crate::game_state::player::Player;
use crate::game_state::position::Position;
use crate::search::board_scoring::{loss_score, win_score, BoardScorer, SCORE_INFINITY};
use crate::search::transposition_table::{Probe, TranspositionTable};

const SIDE_BIT: u32 = 63;

/// Best root move with its score from the mover's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootMove {
    pub cell: usize,
    pub score: i32,
}

pub struct Negamax<'a, S: BoardScorer> {
    board: Board,
    history: PieceHistory,
    scorer: &'a S,
    tt: Option<&'a mut TranspositionTable>,
    nodes: u64,
}

impl<'a, S: BoardScorer> Negamax<'a, S> {
    pub fn new(
        position: &Position,
        scorer: &'a S,
        tt: Option<&'a mut TranspositionTable>,
    ) -> Self {
        Self {
            board: position.board,
            history: position.history,
            scorer,
            tt,
            nodes: 0,
        }
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Try every root move at `depth` plies and keep the first strict
    /// maximum. `None` when the board has no empty cell.
    pub fn search_root(&mut self, player: Player, depth: u8) -> Option<RootMove> {
        let mut alpha = -SCORE_INFINITY;
        let beta = SCORE_INFINITY;
        let mut best: Option<RootMove> = None;

        for cell in self.board.legal_moves() {
            let placement = self.make(cell, player);
            let score = -self.negamax(
                player.opposite(),
                depth.saturating_sub(1),
                -beta,
                -alpha,
            );
            self.unmake(placement);

            if best.map_or(true, |b| score > b.score) {
                best = Some(RootMove { cell, score });
            }
            alpha = alpha.max(score);
        }

        best
    }

    /// Score of the current board for `player` (the side to move) searched
    /// `depth` plies inside `(alpha, beta)`.
    pub fn negamax(&mut self, player: Player, depth: u8, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;

        let alpha_orig = alpha;
        let beta_orig = beta;
        let key = self.key(player);

        if let Some(tt) = self.tt.as_deref_mut() {
            match tt.probe(key, depth, alpha, beta) {
                Probe::Hit(score) => return score,
                Probe::Miss { alpha: a, beta: b } => {
                    alpha = a;
                    beta = b;
                }
            }
        }

        let opponent = player.opposite();
        if self.board.is_win(opponent) {
            return loss_score(depth);
        }
        if self.board.is_win(player) {
            return win_score(depth);
        }
        if !self.caps_stones() && self.board.is_full() {
            return 0;
        }
        if depth == 0 {
            return self.scorer.score(&self.board, player);
        }

        let mut best = -SCORE_INFINITY;
        let mut empty = self.board.empty_mask();

        while empty != 0 {
            let cell = empty.trailing_zeros() as usize;
            empty &= empty - 1;

            let placement = self.make(cell, player);
            let mut score = -self.negamax(opponent, depth - 1, -alpha - 1, -alpha);
            if alpha < score && score < beta {
                score = -self.negamax(opponent, depth - 1, -beta, -score);
            }
            self.unmake(placement);

            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        if let Some(tt) = self.tt.as_deref_mut() {
            tt.store(key, alpha_orig, beta_orig, best, depth);
        }

        best
    }

    #[inline]
    fn caps_stones(&self) -> bool {
        self.board.variant().caps_stones()
    }

    /// Cache key for the current node. The moveable ruleset folds in the
    /// placement order, since the board alone does not say which stone leaves
    /// next.
    #[inline]
    fn key(&self, player: Player) -> u64 {
        let side = (player.index() as u64) << SIDE_BIT;
        if self.caps_stones() {
            self.history.packed() | side
        } else {
            self.board.packed_key() | side
        }
    }

    #[inline]
    fn make(&mut self, cell: usize, player: Player) -> Placement {
        if self.caps_stones() {
            place_capped_unchecked(&mut self.board, &mut self.history, cell, player)
        } else {
            self.board.place(cell, player);
            Placement {
                cell,
                player,
                evicted: None,
            }
        }
    }

    #[inline]
    fn unmake(&mut self, placement: Placement) {
        if self.caps_stones() {
            undo_capped(&mut self.board, &mut self.history, placement);
        } else {
            self.board.clear(placement.cell);
        }
    }
}
