use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::backgammon::Player;

/// Endpoint of a checker movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// One of the 24 points, `0..=23`.
    Point(u8),
    Bar,
    /// Borne off.
    Off,
}

impl Position {
    /// Integer the presentation layer uses to address the bar.
    pub const BAR_INDEX: i32 = 25;
    /// Integer addressing White's bear-off tray.
    pub const OFF_WHITE_INDEX: i32 = 24;
    /// Integer addressing Black's bear-off tray.
    pub const OFF_BLACK_INDEX: i32 = -1;

    /// Decodes the flat integer layout as seen by `player`: `0..=23` are points,
    /// `25` is the bar, and `player`'s own tray (`24` for White, `-1` for Black)
    /// is bear-off. The other player's tray decodes to `None`.
    pub fn from_index(index: i32, player: Player) -> Option<Self> {
        match index {
            0..=23 => Some(Position::Point(index as u8)),
            Self::BAR_INDEX => Some(Position::Bar),
            Self::OFF_WHITE_INDEX if player == Player::White => Some(Position::Off),
            Self::OFF_BLACK_INDEX if player == Player::Black => Some(Position::Off),
            _ => None,
        }
    }

    /// Encodes back to the flat integer layout. Bear-off maps to the tray at the
    /// end of `player`'s track.
    pub fn to_index(&self, player: Player) -> i32 {
        match self {
            Position::Point(n) => *n as i32,
            Position::Bar => Self::BAR_INDEX,
            Position::Off => match player {
                Player::White => Self::OFF_WHITE_INDEX,
                Player::Black => Self::OFF_BLACK_INDEX,
            },
        }
    }

    pub fn point(&self) -> Option<u8> {
        match self {
            Position::Point(n) => Some(*n),
            _ => None,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Point(n) => write!(f, "{}", n + 1),
            Position::Bar => write!(f, "B"),
            Position::Off => write!(f, "H"),
        }
    }
}
