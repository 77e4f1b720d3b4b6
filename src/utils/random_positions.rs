//! Seeded random play for opening prefixes, tests and benchmarks.

use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::errors::TicTacResult;
use crate::game_state::player::Player;
use crate::game_state::position::{Outcome, Position};
use crate::game_state::variant::Variant;

/// Play up to `plies` uniformly random moves from `position`, stopping early
/// if the game is decided. Returns the cells played.
pub fn play_random_moves<R: Rng + ?Sized>(
    position: &mut Position,
    plies: usize,
    rng: &mut R,
) -> TicTacResult<Vec<usize>> {
    let mut played = Vec::with_capacity(plies);
    for _ in 0..plies {
        if position.outcome() != Outcome::InProgress {
            break;
        }
        let moves = position.legal_moves();
        let Some(&cell) = moves.choose(rng) else {
            break;
        };
        position.play(cell)?;
        played.push(cell);
    }
    Ok(played)
}

/// Random position `plies` moves into a fresh game that is still undecided,
/// or `None` if `attempts` tries all ended early.
pub fn random_open_position<R: Rng + ?Sized>(
    variant: Variant,
    first: Player,
    plies: usize,
    attempts: usize,
    rng: &mut R,
) -> TicTacResult<Option<Position>> {
    for _ in 0..attempts {
        let mut position = Position::new_game(variant, first);
        let played = play_random_moves(&mut position, plies, rng)?;
        if played.len() == plies && position.outcome() == Outcome::InProgress {
            return Ok(Some(position));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::{play_random_moves, random_open_position};
    use crate::game_state::player::Player;
    use crate::game_state::position::{Outcome, Position};
    use crate::game_state::variant::Variant;

    #[test]
    fn same_seed_gives_same_moves() {
        let mut a = Position::new_game(Variant::Square4x4, Player::One);
        let mut b = a.clone();
        let moves_a = play_random_moves(&mut a, 6, &mut StdRng::seed_from_u64(5)).expect("legal");
        let moves_b = play_random_moves(&mut b, 6, &mut StdRng::seed_from_u64(5)).expect("legal");
        assert_eq!(moves_a, moves_b);
        assert_eq!(a, b);
    }

    #[test]
    fn open_positions_are_undecided_with_requested_ply() {
        let mut rng = StdRng::seed_from_u64(9);
        let pos = random_open_position(Variant::Classic3x3, Player::Two, 4, 50, &mut rng)
            .expect("legal")
            .expect("4-ply 3x3 positions are usually open");
        assert_eq!(pos.board.total_stones(), 4);
        assert_eq!(pos.outcome(), Outcome::InProgress);
        assert_eq!(pos.side_to_move, Player::Two);
    }
}
