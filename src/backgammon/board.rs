use std::{
    fmt::Display,
    ops::{Index, IndexMut},
};

use crate::backgammon::{Column, Player};

pub const POINTS: usize = 24;
pub const CHECKERS_PER_PLAYER: u8 = 15;

/// The 24 points of a single continuous track plus the bar and the bear-off
/// tray of each player.
///
/// White travels from point 0 toward point 23 and bears off past 23; Black travels
/// the other way and bears off past 0. Per-player counters are indexed with
/// [`Player::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    columns: [Column; POINTS],
    bar: [u8; 2],
    borne_off: [u8; 2],
}

impl Board {
    /// Creates a new board with the default starting position.
    pub fn new() -> Self {
        let mut board = Board::empty();
        board.place(0, Player::White, 2);
        board.place(11, Player::White, 5);
        board.place(16, Player::White, 3);
        board.place(18, Player::White, 5);

        board.place(23, Player::Black, 2);
        board.place(12, Player::Black, 5);
        board.place(7, Player::Black, 3);
        board.place(5, Player::Black, 5);
        board
    }

    /// Creates an empty board with no checkers on it.
    pub fn empty() -> Self {
        Board {
            columns: [Column::EMPTY; POINTS],
            bar: [0, 0],
            borne_off: [0, 0],
        }
    }

    pub fn get(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Column> {
        self.columns.get_mut(index)
    }

    pub fn columns(&self) -> &[Column; POINTS] {
        &self.columns
    }

    /// Puts `count` checkers of `player` on `point`, replacing whatever was there.
    /// A point off the board is ignored.
    pub fn place(&mut self, point: u8, player: Player, count: u8) {
        if let Some(column) = self.get_mut(point as usize) {
            *column = Column::with_checkers(player, count);
        }
    }

    pub fn clear(&mut self, point: u8) {
        if let Some(column) = self.get_mut(point as usize) {
            *column = Column::EMPTY;
        }
    }

    pub fn bar(&self, player: Player) -> u8 {
        self.bar[player.index()]
    }

    pub fn set_bar(&mut self, player: Player, count: u8) {
        self.bar[player.index()] = count;
    }

    pub fn increment_bar(&mut self, player: Player) {
        self.bar[player.index()] += 1;
    }

    pub fn decrement_bar(&mut self, player: Player) {
        let bar = &mut self.bar[player.index()];
        *bar = bar.saturating_sub(1);
    }

    pub fn borne_off(&self, player: Player) -> u8 {
        self.borne_off[player.index()]
    }

    pub fn set_borne_off(&mut self, player: Player, count: u8) {
        self.borne_off[player.index()] = count;
    }

    pub fn increment_borne_off(&mut self, player: Player) {
        self.borne_off[player.index()] += 1;
    }

    /// Checkers of `player` on the points.
    pub fn on_points(&self, player: Player) -> u8 {
        self.columns
            .iter()
            .filter(|c| c.is_owned_by(player))
            .map(Column::count)
            .sum()
    }

    /// Every checker of `player` accounted for: points, bar and tray.
    /// Equals [`CHECKERS_PER_PLAYER`] on any board reached through legal play.
    pub fn checkers(&self, player: Player) -> u8 {
        self.on_points(player) + self.bar(player) + self.borne_off(player)
    }

    /// True when no checker of `player` is on the bar or outside the home quadrant.
    pub fn all_home(&self, player: Player) -> bool {
        if self.bar(player) > 0 {
            return false;
        }
        self.columns
            .iter()
            .enumerate()
            .all(|(i, c)| !c.is_owned_by(player) || player.is_home(i as u8))
    }

    /// True when a checker of `player` sits in the home quadrant strictly further
    /// from the exit than `point`.
    pub fn has_checker_behind(&self, point: u8, player: Player) -> bool {
        let mut behind = match player {
            Player::White => 18..point,
            Player::Black => (point + 1)..6,
        };
        behind.any(|k| self.columns[k as usize].is_owned_by(player))
    }

    fn signed(&self, index: usize) -> i16 {
        let column = &self.columns[index];
        match column.owner() {
            Some(Player::White) => column.count() as i16,
            Some(Player::Black) => -(column.count() as i16),
            None => 0,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Index<usize> for Board {
    type Output = Column;

    fn index(&self, index: usize) -> &Self::Output {
        &self.columns[index]
    }
}

impl IndexMut<usize> for Board {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.columns[index]
    }
}

/// White checkers are positive, Black negative. Points are labelled 1 to 24.
impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let top: Vec<String> = (0..12).rev().map(|i| format!("{:3}", self.signed(i))).collect();
        let bottom: Vec<String> = (12..24).map(|i| format!("{:3}", self.signed(i))).collect();
        writeln!(f, " 12 11 10  9  8  7 | W |  6  5  4  3  2  1   off W: {}", self.borne_off(Player::White))?;
        writeln!(f, "{} | {:1} | {}", top[..6].concat(), self.bar(Player::White), top[6..].concat())?;
        writeln!(f, "====================================================")?;
        writeln!(f, "{} | {:1} | {}", bottom[..6].concat(), self.bar(Player::Black), bottom[6..].concat())?;
        write!(f, " 13 14 15 16 17 18 | B | 19 20 21 22 23 24   off B: {}", self.borne_off(Player::Black))
    }
}
