//! Fixed-size board stored as one occupancy mask per player.
//!
//! Cell `i` of the board is bit `i` of the masks, numbered row-major from the
//! top-left corner. The serialized form is the concatenation of each cell's
//! signed value (`1`, `0`, `-1`) in index order, which is also the format used
//! by opening-book rows.

use crate::errors::{TicTacErrors, TicTacResult};
use crate::game_state::player::Player;
use crate::game_state::variant::Variant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    variant: Variant,
    // [player index] -> occupancy mask
    stones: [u32; 2],
}

impl Board {
    #[inline]
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            stones: [0; 2],
        }
    }

    /// Build a board from signed cell values (`1`, `0`, `-1`).
    pub fn from_cells(variant: Variant, cells: &[i8]) -> TicTacResult<Self> {
        if cells.len() != variant.cells() {
            return Err(TicTacErrors::BoardLengthMismatch {
                expected: variant.cells(),
                found: cells.len(),
            });
        }

        let mut board = Self::new(variant);
        for (cell, &value) in cells.iter().enumerate() {
            if value != 0 {
                let player = Player::from_sign(value)
                    .map_err(|_| TicTacErrors::InvalidCellValue(value.to_string()))?;
                board.place(cell, player);
            }
        }
        Ok(board)
    }

    /// Parse the concatenated-digits form produced by [`Board::serialize`].
    pub fn from_serialized(variant: Variant, text: &str) -> TicTacResult<Self> {
        let mut cells = Vec::with_capacity(variant.cells());
        let mut chars = text.trim().chars();

        while let Some(c) = chars.next() {
            let value = match c {
                '0' => 0,
                '1' => 1,
                '-' => match chars.next() {
                    Some('1') => -1,
                    Some(other) => {
                        return Err(TicTacErrors::InvalidCellValue(format!("-{other}")))
                    }
                    None => return Err(TicTacErrors::InvalidCellValue("-".to_owned())),
                },
                other => return Err(TicTacErrors::InvalidCellValue(other.to_string())),
            };
            cells.push(value);
        }

        Self::from_cells(variant, &cells)
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[inline]
    pub fn cells(&self) -> usize {
        self.variant.cells()
    }

    /// Occupant of `cell`, `None` when empty or off the board.
    #[inline]
    pub fn get(&self, cell: usize) -> Option<Player> {
        if cell >= self.cells() {
            return None;
        }
        let bit = 1u32 << cell;
        if self.stones[Player::One.index()] & bit != 0 {
            Some(Player::One)
        } else if self.stones[Player::Two.index()] & bit != 0 {
            Some(Player::Two)
        } else {
            None
        }
    }

    /// Signed value of `cell`: `1`, `-1`, or `0` when empty.
    #[inline]
    pub fn cell_value(&self, cell: usize) -> i8 {
        self.get(cell).map_or(0, Player::sign)
    }

    #[inline]
    pub fn stones(&self, player: Player) -> u32 {
        self.stones[player.index()]
    }

    #[inline]
    pub fn stone_count(&self, player: Player) -> usize {
        self.stones[player.index()].count_ones() as usize
    }

    #[inline]
    pub fn total_stones(&self) -> usize {
        (self.stones[0] | self.stones[1]).count_ones() as usize
    }

    #[inline]
    pub fn empty_mask(&self) -> u32 {
        self.variant.full_mask() & !(self.stones[0] | self.stones[1])
    }

    #[inline]
    pub fn is_empty_cell(&self, cell: usize) -> bool {
        cell < self.cells() && self.empty_mask() & (1 << cell) != 0
    }

    /// Place `player`'s stone on `cell`.
    pub fn apply(&mut self, cell: usize, player: Player) -> TicTacResult<()> {
        if cell >= self.cells() {
            return Err(TicTacErrors::CellOutOfRange {
                cell,
                cells: self.cells(),
            });
        }
        if !self.is_empty_cell(cell) {
            return Err(TicTacErrors::InvalidMove(cell));
        }
        self.place(cell, player);
        Ok(())
    }

    /// Place without validation; callers enumerate `legal_moves` first.
    #[inline]
    pub(crate) fn place(&mut self, cell: usize, player: Player) {
        debug_assert!(self.is_empty_cell(cell));
        self.stones[player.index()] |= 1 << cell;
    }

    /// Empty `cell` regardless of its occupant.
    #[inline]
    pub(crate) fn clear(&mut self, cell: usize) {
        debug_assert!(cell < self.cells());
        let keep = !(1u32 << cell);
        self.stones[0] &= keep;
        self.stones[1] &= keep;
    }

    /// Empty cells in ascending index order.
    pub fn legal_moves(&self) -> Vec<usize> {
        let mut moves = Vec::with_capacity(self.cells());
        let mut empty = self.empty_mask();
        while empty != 0 {
            moves.push(empty.trailing_zeros() as usize);
            empty &= empty - 1;
        }
        moves
    }

    #[inline]
    pub fn is_win(&self, player: Player) -> bool {
        let own = self.stones[player.index()];
        self.variant
            .win_masks()
            .iter()
            .any(|&line| own & line == line)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.empty_mask() == 0
    }

    /// Fixed-width identity of the cell contents: player one's mask in the
    /// high half, player two's in the low half.
    #[inline]
    pub fn packed_key(&self) -> u64 {
        (u64::from(self.stones[Player::One.index()]) << 32)
            | u64::from(self.stones[Player::Two.index()])
    }

    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity(self.cells() * 2);
        for cell in 0..self.cells() {
            match self.cell_value(cell) {
                1 => out.push('1'),
                -1 => out.push_str("-1"),
                _ => out.push('0'),
            }
        }
        out
    }

    pub fn to_cells(&self) -> Vec<i8> {
        (0..self.cells()).map(|cell| self.cell_value(cell)).collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::Board;
    use crate::errors::TicTacErrors;
    use crate::game_state::player::Player;
    use crate::game_state::variant::Variant;

    #[test]
    fn apply_rejects_occupied_and_out_of_range_cells() {
        let mut board = Board::new(Variant::Classic3x3);
        board.apply(4, Player::One).expect("empty cell should accept");
        assert_eq!(board.apply(4, Player::Two), Err(TicTacErrors::InvalidMove(4)));
        assert_eq!(
            board.apply(9, Player::Two),
            Err(TicTacErrors::CellOutOfRange { cell: 9, cells: 9 })
        );
        assert_eq!(board.get(4), Some(Player::One));
        assert_eq!(board.total_stones(), 1);
    }

    #[test]
    fn cells_off_the_board_are_neither_owned_nor_empty() {
        let mut board = Board::new(Variant::Classic3x3);
        board.apply(8, Player::Two).expect("empty");
        for cell in [9usize, 24, 31, 32, 64, usize::MAX] {
            assert_eq!(board.get(cell), None);
            assert!(!board.is_empty_cell(cell));
            assert_eq!(board.cell_value(cell), 0);
        }
        assert_eq!(board.get(8), Some(Player::Two));
    }

    #[test]
    fn legal_moves_are_ascending_empty_cells() {
        let board =
            Board::from_cells(Variant::Classic3x3, &[1, 0, -1, 0, 1, 0, 0, 0, -1]).expect("valid");
        assert_eq!(board.legal_moves(), vec![1, 3, 5, 6, 7]);
        assert!(!board.is_full());
    }

    #[test]
    fn serialization_matches_signed_digit_format() {
        let board =
            Board::from_cells(Variant::Classic3x3, &[-1, 0, 0, 0, 1, 0, 0, 0, 0]).expect("valid");
        assert_eq!(board.serialize(), "-1000100000");
        let parsed =
            Board::from_serialized(Variant::Classic3x3, "-1000100000").expect("should parse");
        assert_eq!(parsed, board);
    }

    #[test]
    fn from_serialized_rejects_bad_input() {
        assert_eq!(
            Board::from_serialized(Variant::Classic3x3, "0000"),
            Err(TicTacErrors::BoardLengthMismatch {
                expected: 9,
                found: 4
            })
        );
        assert!(matches!(
            Board::from_serialized(Variant::Classic3x3, "00002000-"),
            Err(TicTacErrors::InvalidCellValue(_))
        ));
        assert!(matches!(
            Board::from_cells(Variant::Classic3x3, &[0, 0, 0, 0, 3, 0, 0, 0, 0]),
            Err(TicTacErrors::InvalidCellValue(_))
        ));
    }

    #[test]
    fn is_full_after_filling_every_cell() {
        let board = Board::from_cells(Variant::Classic3x3, &[1, -1, 1, 1, -1, -1, -1, 1, 1])
            .expect("valid");
        assert!(board.is_full());
        assert!(board.legal_moves().is_empty());
        assert!(!board.is_win(Player::One));
        assert!(!board.is_win(Player::Two));
    }

    #[test]
    fn four_by_four_corners_and_squares_win() {
        let corners = [0usize, 3, 12, 15];
        let mut board = Board::new(Variant::Square4x4);
        for cell in corners {
            board.apply(cell, Player::Two).expect("empty");
        }
        assert!(board.is_win(Player::Two));

        let mut square = Board::new(Variant::Square4x4);
        for cell in [5usize, 6, 9, 10] {
            square.apply(cell, Player::One).expect("empty");
        }
        assert!(square.is_win(Player::One));
        assert!(!square.is_win(Player::Two));
    }

    #[test]
    fn is_win_agrees_with_exhaustive_line_scan_on_random_boards() {
        let mut rng = StdRng::seed_from_u64(11);
        for variant in Variant::ALL {
            for _ in 0..300 {
                let cells: Vec<i8> = (0..variant.cells())
                    .map(|_| rng.random_range(-1i8..=1))
                    .collect();
                let board = Board::from_cells(variant, &cells).expect("valid cells");
                for player in [Player::One, Player::Two] {
                    let expected = variant
                        .win_conditions()
                        .iter()
                        .any(|line| line.iter().all(|&c| cells[c] == player.sign()));
                    assert_eq!(board.is_win(player), expected, "{variant:?} {cells:?}");
                }
            }
        }
    }

    #[test]
    fn packed_key_separates_owners() {
        let mut a = Board::new(Variant::Five5x5);
        let mut b = Board::new(Variant::Five5x5);
        a.apply(24, Player::One).expect("empty");
        b.apply(24, Player::Two).expect("empty");
        assert_ne!(a.packed_key(), b.packed_key());
        a.clear(24);
        assert_eq!(a.packed_key(), Board::new(Variant::Five5x5).packed_key());
    }
}
