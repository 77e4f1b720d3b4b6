//! Baseline search performance runner.
//!
//! Usage:
//! `cargo run --release --bin search_baseline`
//! `cargo run --release --bin search_baseline -- --depth 6`

use plum_tictactoe::errors::TicTacResult;
use plum_tictactoe::game_state::board::Board;
use plum_tictactoe::game_state::player::Player;
use plum_tictactoe::game_state::position::Position;
use plum_tictactoe::game_state::variant::Variant;
use plum_tictactoe::search::board_scoring::PositionalScorer;
use plum_tictactoe::search::iterative_deepening::{solve, SearchConfig};

fn parse_arg_u8(flag: &str, default: u8) -> u8 {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            if let Ok(v) = args[i + 1].parse::<u8>() {
                return v.max(1);
            }
        }
    }
    default
}

fn run_case(name: &str, position: &Position, depth: u8) -> TicTacResult<()> {
    let config = SearchConfig {
        max_depth: depth,
        movetime_ms: None,
        ..SearchConfig::for_variant(position.variant())
    };
    let result = solve(position, &PositionalScorer, &config)?;
    println!(
        "{name}: depth={} nodes={} elapsed_ms={} nps={} best_score={} best_move={:?} tt_hits={}",
        result.reached_depth,
        result.nodes,
        result.elapsed_ms,
        result.nps,
        result.best_score,
        result.best_move,
        result.tt_stats.hits
    );
    Ok(())
}

fn main() -> TicTacResult<()> {
    let depth = parse_arg_u8("--depth", 5);

    let late_four = Position::from_board(
        Board::from_serialized(Variant::Square4x4, "10-1001-1000000000")?,
        Player::One,
    )?;
    let suite = [
        ("classic_empty", Position::new_game(Variant::Classic3x3, Player::One)),
        ("moveable_empty", Position::new_game(Variant::Moveable3x3, Player::One)),
        ("square4_mid", late_four),
        ("five5_empty", Position::new_game(Variant::Five5x5, Player::One)),
    ];

    println!("search baseline run: depth={depth}");
    for (name, position) in &suite {
        run_case(name, position, depth)?;
    }
    Ok(())
}
