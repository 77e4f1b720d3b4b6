//! Crate root module declarations for the grid tic-tac-toe search engine.
//!
//! This file exposes the top-level subsystems (board model, search, opening
//! book, engines and utility helpers) so binaries, benches and external
//! tooling can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod piece_history;
    pub mod player;
    pub mod position;
    pub mod variant;
}

pub mod search {
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod negamax;
    pub mod transposition_table;
}

pub mod tables {
    pub mod opening_book;
}

pub mod engines {
    pub mod engine_random;
    pub mod engine_solver;
    pub mod engine_trait;
    pub mod time_management;
}

pub mod utils {
    pub mod engine_match_harness;
    pub mod random_positions;
}
