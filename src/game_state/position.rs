//! Caller-facing game snapshot.
//!
//! `Position` bundles the board, the moveable-rules history and the side to
//! move. Search takes a position by reference and works on its own copy, so a
//! caller's snapshot is never modified by a search.

use crate::errors::{TicTacErrors, TicTacResult};
use crate::game_state::board::Board;
use crate::game_state::piece_history::{place_capped, PieceHistory, Placement};
use crate::game_state::player::Player;
use crate::game_state::variant::Variant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Win(Player),
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub history: PieceHistory,
    pub side_to_move: Player,
    pub ply: u16,
}

impl Position {
    #[inline]
    pub fn new_game(variant: Variant, first: Player) -> Self {
        Self {
            board: Board::new(variant),
            history: PieceHistory::new(),
            side_to_move: first,
            ply: 0,
        }
    }

    /// Wrap a board for the standard rulesets. Moveable positions need their
    /// history, see [`Position::from_parts`].
    pub fn from_board(board: Board, side_to_move: Player) -> TicTacResult<Self> {
        Self::from_parts(board, PieceHistory::new(), side_to_move)
    }

    pub fn from_parts(
        board: Board,
        history: PieceHistory,
        side_to_move: Player,
    ) -> TicTacResult<Self> {
        if board.variant().caps_stones() {
            history.validate_against(&board)?;
        } else if !history.is_empty() {
            return Err(TicTacErrors::HistoryMismatch(
                "history is only tracked for the moveable ruleset".to_owned(),
            ));
        }
        Ok(Self {
            board,
            history,
            side_to_move,
            ply: board.total_stones() as u16,
        })
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.board.variant()
    }

    #[inline]
    pub fn legal_moves(&self) -> Vec<usize> {
        self.board.legal_moves()
    }

    pub fn outcome(&self) -> Outcome {
        if self.board.is_win(Player::One) {
            Outcome::Win(Player::One)
        } else if self.board.is_win(Player::Two) {
            Outcome::Win(Player::Two)
        } else if !self.variant().caps_stones() && self.board.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }

    /// Play `cell` for the side to move under the variant's rules.
    pub fn play(&mut self, cell: usize) -> TicTacResult<Placement> {
        if self.outcome() != Outcome::InProgress {
            return Err(TicTacErrors::GameAlreadyDecided);
        }

        let player = self.side_to_move;
        let placement = if self.variant().caps_stones() {
            place_capped(&mut self.board, &mut self.history, cell, player)?
        } else {
            self.board.apply(cell, player)?;
            Placement {
                cell,
                player,
                evicted: None,
            }
        };

        self.side_to_move = player.opposite();
        self.ply = self.ply.saturating_add(1);
        Ok(placement)
    }
}
