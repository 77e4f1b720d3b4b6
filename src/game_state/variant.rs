//! Ruleset descriptions for the four supported board variants.
//!
//! Win-condition tables are kept as index tuples for readability and turned
//! into occupancy masks once, on first use, so `Board::is_win` is a handful of
//! mask comparisons.

use std::sync::OnceLock;

/// Largest board handled by the engine (5×5).
pub const MAX_CELLS: usize = 25;

/// Live stones a player may keep in the moveable ruleset.
pub const MAX_LIVE_STONES: usize = 3;

static LINES_3X3: &[&[usize]] = &[
    &[0, 1, 2],
    &[3, 4, 5],
    &[6, 7, 8],
    &[0, 3, 6],
    &[1, 4, 7],
    &[2, 5, 8],
    &[0, 4, 8],
    &[2, 4, 6],
];

// Rows, columns, diagonals, the four corners and every 2x2 square.
static LINES_4X4: &[&[usize]] = &[
    &[0, 1, 2, 3],
    &[4, 5, 6, 7],
    &[8, 9, 10, 11],
    &[12, 13, 14, 15],
    &[0, 4, 8, 12],
    &[1, 5, 9, 13],
    &[2, 6, 10, 14],
    &[3, 7, 11, 15],
    &[0, 5, 10, 15],
    &[3, 6, 9, 12],
    &[0, 3, 12, 15],
    &[0, 1, 4, 5],
    &[1, 2, 5, 6],
    &[2, 3, 6, 7],
    &[4, 5, 8, 9],
    &[5, 6, 9, 10],
    &[6, 7, 10, 11],
    &[8, 9, 12, 13],
    &[9, 10, 13, 14],
    &[10, 11, 14, 15],
];

// Every run of four in a row, column or diagonal.
static LINES_5X5: &[&[usize]] = &[
    &[0, 6, 12, 18],
    &[6, 12, 18, 24],
    &[4, 8, 12, 16],
    &[8, 12, 16, 20],
    &[9, 13, 17, 21],
    &[3, 7, 11, 15],
    &[1, 7, 13, 19],
    &[5, 11, 17, 23],
    &[0, 5, 10, 15],
    &[5, 10, 15, 20],
    &[1, 6, 11, 16],
    &[6, 11, 16, 21],
    &[2, 7, 12, 17],
    &[7, 12, 17, 22],
    &[3, 8, 13, 18],
    &[8, 13, 18, 23],
    &[4, 9, 14, 19],
    &[9, 14, 19, 24],
    &[0, 1, 2, 3],
    &[1, 2, 3, 4],
    &[5, 6, 7, 8],
    &[6, 7, 8, 9],
    &[10, 11, 12, 13],
    &[11, 12, 13, 14],
    &[15, 16, 17, 18],
    &[16, 17, 18, 19],
    &[20, 21, 22, 23],
    &[21, 22, 23, 24],
];

/// Positional weights for 5×5 cutoffs: rim 0, inner ring 3, centre 7.
#[rustfmt::skip]
static WEIGHTS_5X5: [i32; 25] = [
    0, 0, 0, 0, 0,
    0, 3, 3, 3, 0,
    0, 3, 7, 3, 0,
    0, 3, 3, 3, 0,
    0, 0, 0, 0, 0,
];

#[derive(Debug)]
struct LineTables {
    classic: Vec<u32>,
    square: Vec<u32>,
    five: Vec<u32>,
}

static TABLES: OnceLock<LineTables> = OnceLock::new();

#[inline]
fn tables() -> &'static LineTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> LineTables {
    LineTables {
        classic: LINES_3X3.iter().map(|line| line_mask(line)).collect(),
        square: LINES_4X4.iter().map(|line| line_mask(line)).collect(),
        five: LINES_5X5.iter().map(|line| line_mask(line)).collect(),
    }
}

#[inline]
fn line_mask(line: &[usize]) -> u32 {
    line.iter().fold(0u32, |mask, &cell| mask | (1 << cell))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Standard 3×3, three in a row.
    Classic3x3,
    /// 3×3 where each player keeps at most three stones; the oldest moves off.
    Moveable3x3,
    /// 4×4, four in a line, the corners or any 2×2 square.
    Square4x4,
    /// 5×5, four in a line.
    Five5x5,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Classic3x3,
        Variant::Moveable3x3,
        Variant::Square4x4,
        Variant::Five5x5,
    ];

    #[inline]
    pub const fn side(self) -> usize {
        match self {
            Variant::Classic3x3 | Variant::Moveable3x3 => 3,
            Variant::Square4x4 => 4,
            Variant::Five5x5 => 5,
        }
    }

    #[inline]
    pub const fn cells(self) -> usize {
        self.side() * self.side()
    }

    /// Mask with one bit set per cell of the board.
    #[inline]
    pub const fn full_mask(self) -> u32 {
        (1u32 << self.cells()) - 1
    }

    /// True for the ruleset that caps live stones and recycles the oldest.
    #[inline]
    pub const fn caps_stones(self) -> bool {
        matches!(self, Variant::Moveable3x3)
    }

    #[inline]
    pub const fn uses_opening_book(self) -> bool {
        matches!(self, Variant::Square4x4)
    }

    pub fn win_conditions(self) -> &'static [&'static [usize]] {
        match self {
            Variant::Classic3x3 | Variant::Moveable3x3 => LINES_3X3,
            Variant::Square4x4 => LINES_4X4,
            Variant::Five5x5 => LINES_5X5,
        }
    }

    #[inline]
    pub fn win_masks(self) -> &'static [u32] {
        let t = tables();
        match self {
            Variant::Classic3x3 | Variant::Moveable3x3 => &t.classic,
            Variant::Square4x4 => &t.square,
            Variant::Five5x5 => &t.five,
        }
    }

    /// Per-cell weights used at non-terminal cutoffs, if the variant has any.
    #[inline]
    pub fn position_weights(self) -> Option<&'static [i32; MAX_CELLS]> {
        match self {
            Variant::Five5x5 => Some(&WEIGHTS_5X5),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Variant, MAX_CELLS};

    #[test]
    fn line_tables_have_expected_shapes() {
        assert_eq!(Variant::Classic3x3.win_conditions().len(), 8);
        assert_eq!(Variant::Square4x4.win_conditions().len(), 20);
        assert_eq!(Variant::Five5x5.win_conditions().len(), 28);

        for variant in Variant::ALL {
            let len = if variant.side() == 3 { 3 } else { 4 };
            for line in variant.win_conditions() {
                assert_eq!(line.len(), len);
                assert!(line.iter().all(|&c| c < variant.cells()));
            }
            assert_eq!(
                variant.win_masks().len(),
                variant.win_conditions().len()
            );
        }
    }

    #[test]
    fn masks_match_index_tuples() {
        for variant in Variant::ALL {
            for (line, mask) in variant.win_conditions().iter().zip(variant.win_masks()) {
                assert_eq!(mask.count_ones() as usize, line.len());
                for &cell in line.iter() {
                    assert_ne!(mask & (1 << cell), 0);
                }
                assert_eq!(mask & !variant.full_mask(), 0);
            }
        }
    }

    #[test]
    fn only_five_by_five_has_weights_and_centre_is_heaviest() {
        let weights = Variant::Five5x5
            .position_weights()
            .expect("5x5 should carry weights");
        assert_eq!(weights.len(), MAX_CELLS);
        assert_eq!(weights.iter().copied().max(), Some(weights[12]));
        assert!(Variant::Square4x4.position_weights().is_none());
        assert!(Variant::Classic3x3.position_weights().is_none());
    }
}
