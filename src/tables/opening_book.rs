//! Precomputed opening replies for the 4×4 ruleset.
//!
//! A book is a set of rows `(serialized board, move, score)`. Rows are indexed
//! by the board's packed key, which is an exact match on the serialized board.
//! The text form is one row per line with the three fields separated by
//! whitespace:
//!
//! ```text
//! 0000000000000000 5 0
//! 0000010000000000 6 0
//! ```
//!
//! Within its coverage (boards with at most [`BOOK_MAX_STONES`] stones) a
//! missing row is a hard error; callers relying on the book must not paper
//! over it with a shallow search.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::errors::{TicTacErrors, TicTacResult};
use crate::game_state::board::Board;
use crate::game_state::variant::Variant;

/// Boards with this many stones or fewer are expected to be in the book.
pub const BOOK_MAX_STONES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookMove {
    pub cell: usize,
    pub score: i32,
}

#[derive(Debug, Clone)]
pub struct OpeningBook {
    variant: Variant,
    by_board: HashMap<u64, BookMove>,
}

impl OpeningBook {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            by_board: HashMap::new(),
        }
    }

    /// Build from parsed rows. The first row for a given board wins.
    pub fn from_rows<'r, I>(variant: Variant, rows: I) -> TicTacResult<Self>
    where
        I: IntoIterator<Item = (&'r str, usize, i32)>,
    {
        let mut book = Self::new(variant);
        for (line, (board, cell, score)) in rows.into_iter().enumerate() {
            book.add_row(line + 1, board, cell, score)?;
        }
        Ok(book)
    }

    pub fn from_text(variant: Variant, text: &str) -> TicTacResult<Self> {
        let mut book = Self::new(variant);

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            let [board, cell, score] = fields[..] else {
                return Err(TicTacErrors::BookParse {
                    line: line_no,
                    reason: format!("expected 3 fields, found {}", fields.len()),
                });
            };

            let cell = cell.parse::<usize>().map_err(|e| TicTacErrors::BookParse {
                line: line_no,
                reason: format!("bad move '{cell}': {e}"),
            })?;
            let score = score.parse::<i32>().map_err(|e| TicTacErrors::BookParse {
                line: line_no,
                reason: format!("bad score '{score}': {e}"),
            })?;

            book.add_row(line_no, board, cell, score)?;
        }

        Ok(book)
    }

    pub fn from_path<P: AsRef<Path>>(variant: Variant, path: P) -> TicTacResult<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .map_err(|e| TicTacErrors::BookIo(format!("{}: {e}", path.display())))?;
        Self::from_text(variant, &data)
    }

    fn add_row(&mut self, line: usize, board: &str, cell: usize, score: i32) -> TicTacResult<()> {
        let parsed = Board::from_serialized(self.variant, board).map_err(|e| {
            TicTacErrors::BookParse {
                line,
                reason: e.to_string(),
            }
        })?;
        if cell >= parsed.cells() || !parsed.is_empty_cell(cell) {
            return Err(TicTacErrors::BookParse {
                line,
                reason: format!("move {cell} is not playable on {board}"),
            });
        }

        self.by_board
            .entry(parsed.packed_key())
            .or_insert(BookMove { cell, score });
        Ok(())
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_board.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_board.is_empty()
    }

    /// True when `board` is early enough that the book must answer for it.
    #[inline]
    pub fn covers(&self, board: &Board) -> bool {
        board.variant() == self.variant && board.total_stones() <= BOOK_MAX_STONES
    }

    #[inline]
    pub fn get(&self, board: &Board) -> Option<BookMove> {
        if board.variant() != self.variant {
            return None;
        }
        self.by_board.get(&board.packed_key()).copied()
    }

    /// Book reply for `board`, or `BookMiss` naming the serialized board.
    pub fn lookup(&self, board: &Board) -> TicTacResult<BookMove> {
        self.get(board)
            .ok_or_else(|| TicTacErrors::BookMiss(board.serialize()))
    }
}
