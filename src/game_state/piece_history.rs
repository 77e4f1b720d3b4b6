//! Per-player placement queues for the moveable ruleset.
//!
//! Each player keeps at most [`MAX_LIVE_STONES`] stones. The queue lists the
//! cells a player occupies, oldest first; placing one more stone evicts the
//! front of the queue. Every placement yields a [`Placement`] record that
//! `undo_capped` uses to restore board and queue exactly.

use crate::errors::{TicTacErrors, TicTacResult};
use crate::game_state::board::Board;
use crate::game_state::player::Player;
use crate::game_state::variant::MAX_LIVE_STONES;

const SLOT_BITS: u32 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PieceHistory {
    // [player index][slot], oldest at slot 0
    queues: [[u8; MAX_LIVE_STONES]; 2],
    lens: [u8; 2],
}

/// Undo record for one capped placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub cell: usize,
    pub player: Player,
    pub evicted: Option<usize>,
}

impl PieceHistory {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from explicit oldest-first queues.
    pub fn from_queues(one: &[usize], two: &[usize]) -> TicTacResult<Self> {
        let mut history = Self::new();
        for (player, queue) in [(Player::One, one), (Player::Two, two)] {
            if queue.len() > MAX_LIVE_STONES {
                return Err(TicTacErrors::TooManyStones {
                    player,
                    count: queue.len(),
                });
            }
            for &cell in queue {
                history.push(player, cell);
            }
        }
        Ok(history)
    }

    #[inline]
    pub fn len(&self, player: Player) -> usize {
        usize::from(self.lens[player.index()])
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lens == [0, 0]
    }

    /// Cells owned by `player`, oldest first.
    pub fn queue(&self, player: Player) -> Vec<usize> {
        self.queues[player.index()][..self.len(player)]
            .iter()
            .map(|&c| usize::from(c))
            .collect()
    }

    #[inline]
    pub fn oldest(&self, player: Player) -> Option<usize> {
        (self.len(player) > 0).then(|| usize::from(self.queues[player.index()][0]))
    }

    /// Record `cell` as `player`'s newest stone, returning the evicted cell
    /// once the queue was already full.
    fn push(&mut self, player: Player, cell: usize) -> Option<usize> {
        let p = player.index();
        let len = self.len(player);
        if len == MAX_LIVE_STONES {
            let evicted = usize::from(self.queues[p][0]);
            self.queues[p].rotate_left(1);
            self.queues[p][MAX_LIVE_STONES - 1] = cell as u8;
            Some(evicted)
        } else {
            self.queues[p][len] = cell as u8;
            self.lens[p] += 1;
            None
        }
    }

    /// Reverse the most recent `push` for `player`.
    fn pop_newest(&mut self, player: Player, evicted: Option<usize>) {
        let p = player.index();
        match evicted {
            Some(cell) => {
                self.queues[p].rotate_right(1);
                self.queues[p][0] = cell as u8;
            }
            None => {
                debug_assert!(self.lens[p] > 0);
                self.lens[p] -= 1;
            }
        }
    }

    /// Order-sensitive encoding of both queues (5 bits per slot, 0 = empty).
    pub fn packed(&self) -> u64 {
        let mut key = 0u64;
        for player in [Player::One, Player::Two] {
            let p = player.index();
            for slot in 0..MAX_LIVE_STONES {
                let code = if slot < self.len(player) {
                    u64::from(self.queues[p][slot]) + 1
                } else {
                    0
                };
                key = (key << SLOT_BITS) | code;
            }
        }
        key
    }

    /// Check that the queues list exactly the stones on `board`.
    pub fn validate_against(&self, board: &Board) -> TicTacResult<()> {
        for player in [Player::One, Player::Two] {
            let count = board.stone_count(player);
            if count > MAX_LIVE_STONES {
                return Err(TicTacErrors::TooManyStones { player, count });
            }
            let mut mask = 0u32;
            for cell in self.queue(player) {
                if cell >= board.cells() || mask & (1 << cell) != 0 {
                    return Err(TicTacErrors::HistoryMismatch(format!(
                        "{player:?} queue repeats or overflows cell {cell}"
                    )));
                }
                mask |= 1 << cell;
            }
            if mask != board.stones(player) {
                return Err(TicTacErrors::HistoryMismatch(format!(
                    "{player:?} queue {:?} does not match the board",
                    self.queue(player)
                )));
            }
        }
        Ok(())
    }
}

/// Place a stone under the capped ruleset, evicting the oldest own stone when
/// this is the fourth.
pub fn place_capped(
    board: &mut Board,
    history: &mut PieceHistory,
    cell: usize,
    player: Player,
) -> TicTacResult<Placement> {
    board.apply(cell, player)?;
    let evicted = history.push(player, cell);
    if let Some(old) = evicted {
        board.clear(old);
    }
    Ok(Placement {
        cell,
        player,
        evicted,
    })
}

#[inline]
pub(crate) fn place_capped_unchecked(
    board: &mut Board,
    history: &mut PieceHistory,
    cell: usize,
    player: Player,
) -> Placement {
    board.place(cell, player);
    let evicted = history.push(player, cell);
    if let Some(old) = evicted {
        board.clear(old);
    }
    Placement {
        cell,
        player,
        evicted,
    }
}

/// Revert a placement made by [`place_capped`].
#[inline]
pub fn undo_capped(board: &mut Board, history: &mut PieceHistory, placement: Placement) {
    board.clear(placement.cell);
    history.pop_newest(placement.player, placement.evicted);
    if let Some(old) = placement.evicted {
        board.place(old, placement.player);
    }
}
