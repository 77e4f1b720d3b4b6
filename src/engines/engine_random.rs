//! Uniform random mover.
//!
//! Used as a sparring partner in engine matches and for smoke-testing the
//! harness. Seedable so matches are reproducible.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::errors::{TicTacErrors, TicTacResult};
use crate::game_state::position::{Outcome, Position};

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Random"
    }

    fn choose_move(
        &mut self,
        position: &Position,
        params: &GoParams,
    ) -> TicTacResult<EngineOutput> {
        if position.outcome() != Outcome::InProgress {
            return Err(TicTacErrors::GameAlreadyDecided);
        }
        let legal_moves = position.legal_moves();

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));
        if let Some(depth) = params.depth {
            out.info_lines
                .push(format!("info string random_engine requested_depth {depth}"));
        }

        let picked = legal_moves
            .choose(&mut self.rng)
            .ok_or(TicTacErrors::NoLegalMoves)?;
        out.best_move = Some(*picked);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::RandomEngine;
    use crate::engines::engine_trait::{Engine, GoParams};
    use crate::game_state::board::Board;
    use crate::game_state::player::Player;
    use crate::game_state::position::Position;
    use crate::game_state::variant::Variant;

    #[test]
    fn picks_only_empty_cells() {
        let board = Board::from_cells(Variant::Classic3x3, &[1, -1, 1, -1, 0, 1, -1, 1, -1])
            .expect("valid");
        let pos = Position::from_board(board, Player::One).expect("valid");
        let mut engine = RandomEngine::with_seed(3);
        for _ in 0..5 {
            let out = engine.choose_move(&pos, &GoParams::default()).expect("move");
            assert_eq!(out.best_move, Some(4));
        }
    }

    #[test]
    fn same_seed_same_choice() {
        let pos = Position::new_game(Variant::Five5x5, Player::One);
        let a = RandomEngine::with_seed(11)
            .choose_move(&pos, &GoParams::default())
            .expect("move");
        let b = RandomEngine::with_seed(11)
            .choose_move(&pos, &GoParams::default())
            .expect("move");
        assert_eq!(a.best_move, b.best_move);
    }
}
