use crate::errors::{TicTacErrors, TicTacResult};

/// Side to move. `One` carries sign `+1`, `Two` carries sign `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    #[inline]
    pub const fn sign(self) -> i8 {
        match self {
            Player::One => 1,
            Player::Two => -1,
        }
    }

    pub fn from_sign(sign: i8) -> TicTacResult<Self> {
        match sign {
            1 => Ok(Player::One),
            -1 => Ok(Player::Two),
            other => Err(TicTacErrors::InvalidPlayerSign(other)),
        }
    }
}
