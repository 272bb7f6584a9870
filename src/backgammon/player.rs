use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    White,
    Black,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::White, Player::Black];

    pub fn opposite(&self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Fixed slot used by per-player counters: White is 0, Black is 1.
    pub fn index(&self) -> usize {
        match self {
            Player::White => 0,
            Player::Black => 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Player::White => "White",
            Player::Black => "Black",
        }
    }

    /// Target point reached by moving `steps` from `point`, or `None` when the move
    /// leaves the track. White travels toward 23, Black toward 0.
    pub fn advance(&self, point: u8, steps: u8) -> Option<u8> {
        let target = match self {
            Player::White => point as i16 + steps as i16,
            Player::Black => point as i16 - steps as i16,
        };
        (0..24).contains(&target).then_some(target as u8)
    }

    /// Number of pips from `from` to `to` in this player's direction.
    /// Zero or negative for moves that do not go forward.
    pub fn distance(&self, from: u8, to: u8) -> i16 {
        match self {
            Player::White => to as i16 - from as i16,
            Player::Black => from as i16 - to as i16,
        }
    }

    /// Pips needed to carry a checker on `point` off the board.
    pub fn distance_to_edge(&self, point: u8) -> u8 {
        match self {
            Player::White => 24 - point,
            Player::Black => point + 1,
        }
    }

    /// Point where a checker coming off the bar lands for a die value.
    pub fn entry_point(&self, die: u8) -> u8 {
        match self {
            Player::White => die - 1,
            Player::Black => 24 - die,
        }
    }

    /// Die value that enters a checker from the bar onto `point`, if any.
    pub fn entry_die(&self, point: u8) -> Option<u8> {
        let die = match self {
            Player::White => point as i16 + 1,
            Player::Black => 24 - point as i16,
        };
        (1..=6).contains(&die).then_some(die as u8)
    }

    pub fn is_home(&self, point: u8) -> bool {
        match self {
            Player::White => (18..24).contains(&point),
            Player::Black => point < 6,
        }
    }
}
