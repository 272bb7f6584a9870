use serde::{Deserialize, Serialize};

use crate::backgammon::{Board, Dice, GamePhase, POINTS, Player};

/// Immutable snapshot of everything a presentation layer needs to draw the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub piece_counts: [u8; POINTS],
    pub colors: [Option<Player>; POINTS],
    pub bar_white: u8,
    pub bar_black: u8,
    pub borne_off_white: u8,
    pub borne_off_black: u8,
    pub phase: GamePhase,
    pub current_player: Player,
    pub dice: Dice,
    pub dice_rolled: bool,
    /// Opening roll values, White first. `0` means not rolled.
    pub opening_dice: [u8; 2],
}

impl GameState {
    pub(crate) fn capture(
        board: &Board,
        phase: GamePhase,
        current_player: Player,
        dice: Dice,
        dice_rolled: bool,
        opening_dice: [u8; 2],
    ) -> Self {
        let columns = *board.columns();
        GameState {
            piece_counts: columns.map(|c| c.count()),
            colors: columns.map(|c| c.owner()),
            bar_white: board.bar(Player::White),
            bar_black: board.bar(Player::Black),
            borne_off_white: board.borne_off(Player::White),
            borne_off_black: board.borne_off(Player::Black),
            phase,
            current_player,
            dice,
            dice_rolled,
            opening_dice,
        }
    }

    pub fn bar(&self, player: Player) -> u8 {
        match player {
            Player::White => self.bar_white,
            Player::Black => self.bar_black,
        }
    }

    pub fn borne_off(&self, player: Player) -> u8 {
        match player {
            Player::White => self.borne_off_white,
            Player::Black => self.borne_off_black,
        }
    }
}
