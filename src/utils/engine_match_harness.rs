//! Minimal head-to-head engine match harness for local testing.
//!
//! Runs two `Engine` implementations against each other on one ruleset, with
//! an optional seeded random opening prefix. The engine passed first always
//! plays `Player::One`, which also moves first.

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;

use crate::engines::engine_trait::{Engine, GoParams};
use crate::errors::{TicTacErrors, TicTacResult};
use crate::game_state::player::Player;
use crate::game_state::position::{Outcome, Position};
use crate::game_state::variant::Variant;
use crate::utils::random_positions::play_random_moves;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Win(Player),
    Draw,
    /// Ply cap reached without a result. Moveable games can run forever.
    DrawMaxPlies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    PlayerWin { player: PlayerId, side: Player },
    Draw,
    DrawMaxPlies,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub max_plies: u16,
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
    pub go_params: GoParams,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 60,
            opening_min_plies: 0,
            opening_max_plies: 2,
            go_params: GoParams::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_position: Position,
    pub opening_moves: Vec<usize>,
    pub played_moves: Vec<usize>,
    pub one_move_count: u32,
    pub two_move_count: u32,
    pub one_total_time_ns: u128,
    pub two_total_time_ns: u128,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: MatchConfig,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 9,
            base_seed: 0,
            per_game: MatchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} p1_avg_ms={:.3} p2_avg_ms={:.3}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            avg_ms(self.player1_total_time_ns, self.player1_moves),
            avg_ms(self.player2_total_time_ns, self.player2_moves),
        )
    }
}

fn avg_ms(total_ns: u128, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        total_ns as f64 / f64::from(moves) / 1_000_000.0
    }
}

/// Play a single seeded match. `engine_one` plays `Player::One`.
pub fn play_engine_match(
    engine_one: &mut dyn Engine,
    engine_two: &mut dyn Engine,
    variant: Variant,
    seed: u64,
    config: &MatchConfig,
) -> TicTacResult<MatchResult> {
    engine_one.new_game();
    engine_two.new_game();

    let mut position = Position::new_game(variant, Player::One);
    let mut rng = StdRng::seed_from_u64(seed);
    let lo = config.opening_min_plies.min(config.opening_max_plies);
    let hi = config.opening_max_plies.max(lo);
    let opening_plies = rng.random_range(lo..=hi) as usize;
    let opening_moves = play_random_moves(&mut position, opening_plies, &mut rng)?;

    let mut result = MatchResult {
        outcome: MatchOutcome::DrawMaxPlies,
        final_position: position.clone(),
        opening_moves,
        played_moves: Vec::new(),
        one_move_count: 0,
        two_move_count: 0,
        one_total_time_ns: 0,
        two_total_time_ns: 0,
    };

    for _ in 0..config.max_plies {
        match position.outcome() {
            Outcome::Win(player) => {
                result.outcome = MatchOutcome::Win(player);
                break;
            }
            Outcome::Draw => {
                result.outcome = MatchOutcome::Draw;
                break;
            }
            Outcome::InProgress => {}
        }

        let mover = position.side_to_move;
        let started = Instant::now();
        let out = match mover {
            Player::One => engine_one.choose_move(&position, &config.go_params)?,
            Player::Two => engine_two.choose_move(&position, &config.go_params)?,
        };
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            Player::One => {
                result.one_move_count = result.one_move_count.saturating_add(1);
                result.one_total_time_ns = result.one_total_time_ns.saturating_add(elapsed_ns);
            }
            Player::Two => {
                result.two_move_count = result.two_move_count.saturating_add(1);
                result.two_total_time_ns = result.two_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        let chosen = out.best_move.ok_or(TicTacErrors::NoLegalMoves)?;
        position.play(chosen)?;
        result.played_moves.push(chosen);
    }

    // The last move may have ended the game exactly at the ply cap.
    if result.outcome == MatchOutcome::DrawMaxPlies {
        result.outcome = match position.outcome() {
            Outcome::Win(player) => MatchOutcome::Win(player),
            Outcome::Draw => MatchOutcome::Draw,
            Outcome::InProgress => MatchOutcome::DrawMaxPlies,
        };
    }
    result.final_position = position;
    Ok(result)
}

/// Play a series of matches and aggregate win/loss/draw statistics.
///
/// Sides are randomized each game, deterministically from `base_seed`.
pub fn play_engine_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    variant: Variant,
    config: &MatchSeriesConfig,
) -> TicTacResult<MatchSeriesStats>
where
    F1: Fn() -> Box<dyn Engine>,
    F2: Fn() -> Box<dyn Engine>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut side_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);

    for i in 0..config.games {
        let player1_is_one = side_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));

        let mut player1 = player1_factory();
        let mut player2 = player2_factory();
        let result = if player1_is_one {
            play_engine_match(
                player1.as_mut(),
                player2.as_mut(),
                variant,
                seed,
                &config.per_game,
            )?
        } else {
            play_engine_match(
                player2.as_mut(),
                player1.as_mut(),
                variant,
                seed,
                &config.per_game,
            )?
        };

        let (p1_moves, p2_moves, p1_ns, p2_ns) = if player1_is_one {
            (
                result.one_move_count,
                result.two_move_count,
                result.one_total_time_ns,
                result.two_total_time_ns,
            )
        } else {
            (
                result.two_move_count,
                result.one_move_count,
                result.two_total_time_ns,
                result.one_total_time_ns,
            )
        };
        stats.player1_moves = stats.player1_moves.saturating_add(p1_moves);
        stats.player2_moves = stats.player2_moves.saturating_add(p2_moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(p1_ns);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(p2_ns);

        let mapped = match result.outcome {
            MatchOutcome::Win(side) => {
                let player1_won = (side == Player::One) == player1_is_one;
                if player1_won {
                    stats.player1_wins += 1;
                    SeriesOutcome::PlayerWin {
                        player: PlayerId::Player1,
                        side,
                    }
                } else {
                    stats.player2_wins += 1;
                    SeriesOutcome::PlayerWin {
                        player: PlayerId::Player2,
                        side,
                    }
                }
            }
            MatchOutcome::Draw => {
                stats.draws += 1;
                SeriesOutcome::Draw
            }
            MatchOutcome::DrawMaxPlies => {
                stats.draws += 1;
                SeriesOutcome::DrawMaxPlies
            }
        };
        stats.outcomes.push(mapped);
    }

    Ok(stats)
}
