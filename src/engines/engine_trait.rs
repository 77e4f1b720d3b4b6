//! Engine abstraction shared by the solver, the random mover and the match
//! harness.
//!
//! Engines receive a position plus per-move limits and answer with a cell and
//! a list of `info ...` lines describing the work done.

use crate::errors::TicTacResult;
use crate::game_state::position::Position;

/// Per-move limits. Fields left `None` fall back to the engine's own config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<usize>,
    pub score: Option<i32>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> TicTacResult<()> {
        Ok(())
    }

    fn choose_move(&mut self, position: &Position, params: &GoParams)
        -> TicTacResult<EngineOutput>;
}
