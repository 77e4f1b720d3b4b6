//! Errors used throughout the search engine.
//!
//! `TicTacErrors` is the single error type returned by board manipulation,
//! opening-book handling, search and engine configuration. Variants carry the
//! offending value where that helps a caller report the problem.
//!
//! Usage guidelines:
//! - Input-shaped variants (`InvalidMove`, `CellOutOfRange`,
//!   `InvalidCellValue`, `BoardLengthMismatch`, `InvalidOption`) are
//!   recoverable and suitable for showing to a user.
//! - `BookMiss` is fatal for the caller that relies on book coverage: the
//!   engine refuses to guess with a shallow search instead.
//! - Cache pressure and an exhausted time budget are never errors.

use std::error::Error;
use std::fmt;

use crate::game_state::player::Player;
use crate::game_state::variant::Variant;

pub type TicTacResult<T> = Result<T, TicTacErrors>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicTacErrors {
    /// Tried to place a stone on an occupied cell.
    InvalidMove(usize),

    /// Cell index outside the board.
    ///
    /// Payload: (cell, number of cells on the board).
    CellOutOfRange { cell: usize, cells: usize },

    /// A player sign other than `+1` / `-1`.
    InvalidPlayerSign(i8),

    /// A serialized cell value other than `-1`, `0` or `1`.
    InvalidCellValue(String),

    /// Board input with the wrong number of cells for the variant.
    BoardLengthMismatch { expected: usize, found: usize },

    /// More live stones than the ruleset allows.
    TooManyStones { player: Player, count: usize },

    /// The move history does not describe the stones on the board.
    HistoryMismatch(String),

    /// A position from one ruleset was handed to an engine built for another.
    VariantMismatch { expected: Variant, found: Variant },

    /// The side to move has no empty cell to play.
    NoLegalMoves,

    /// A move was requested on a position that is already won or drawn.
    GameAlreadyDecided,

    /// No opening-book row matches a position the book is expected to cover.
    ///
    /// Payload: the serialized board that was looked up.
    BookMiss(String),

    /// A malformed opening-book row.
    ///
    /// Payload: 1-based line number and a short reason.
    BookParse { line: usize, reason: String },

    /// The opening-book source could not be read.
    BookIo(String),

    /// An engine option name or value was not understood.
    InvalidOption { name: String, value: String },
}

impl fmt::Display for TicTacErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicTacErrors::InvalidMove(cell) => write!(f, "cell {cell} is already occupied"),
            TicTacErrors::CellOutOfRange { cell, cells } => {
                write!(f, "cell {cell} is outside a board of {cells} cells")
            }
            TicTacErrors::InvalidPlayerSign(sign) => {
                write!(f, "player sign must be 1 or -1, got {sign}")
            }
            TicTacErrors::InvalidCellValue(token) => {
                write!(f, "cell value must be -1, 0 or 1, got '{token}'")
            }
            TicTacErrors::BoardLengthMismatch { expected, found } => {
                write!(f, "expected {expected} cells, found {found}")
            }
            TicTacErrors::TooManyStones { player, count } => {
                write!(f, "{player:?} has {count} live stones")
            }
            TicTacErrors::HistoryMismatch(msg) => write!(f, "move history mismatch: {msg}"),
            TicTacErrors::VariantMismatch { expected, found } => {
                write!(f, "engine plays {expected:?}, position is {found:?}")
            }
            TicTacErrors::NoLegalMoves => write!(f, "no legal moves available"),
            TicTacErrors::GameAlreadyDecided => write!(f, "game is already decided"),
            TicTacErrors::BookMiss(board) => {
                write!(f, "board state {board} not found in opening book")
            }
            TicTacErrors::BookParse { line, reason } => {
                write!(f, "opening book line {line}: {reason}")
            }
            TicTacErrors::BookIo(msg) => write!(f, "failed reading opening book: {msg}"),
            TicTacErrors::InvalidOption { name, value } => {
                write!(f, "invalid value '{value}' for option '{name}'")
            }
        }
    }
}

impl Error for TicTacErrors {}

#[cfg(test)]
mod tests {
    use super::TicTacErrors;
    use crate::game_state::player::Player;

    #[test]
    fn display_names_the_offending_value() {
        assert_eq!(
            TicTacErrors::InvalidMove(4).to_string(),
            "cell 4 is already occupied"
        );
        assert!(TicTacErrors::BookMiss("000".to_owned())
            .to_string()
            .contains("000"));
        assert!(TicTacErrors::TooManyStones {
            player: Player::Two,
            count: 4
        }
        .to_string()
        .contains("Two"));
    }
}
