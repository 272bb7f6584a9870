use crate::backgammon::{MoveResult, Player, Position};

/// Receives notifications from a [`crate::backgammon::Game`].
///
/// Every callback defaults to a no-op so an observer only implements what it
/// cares about. Callbacks run synchronously inside the command that raised them
/// and take `&self`; observers keep their own state behind `Cell`/`RefCell`.
pub trait GameObserver {
    fn on_game_started(&self) {}

    /// One die of the opening roll that decides who moves first.
    fn on_opening_dice_rolled(&self, _player: Player, _value: u8) {}

    fn on_dice_rolled(&self, _player: Player, _die1: u8, _die2: u8) {}

    /// Raised for every move attempt, rejected ones included.
    fn on_move_made(&self, _player: Player, _from: Position, _to: Position, _result: &MoveResult) {}

    fn on_turn_changed(&self, _current_player: Player) {}

    fn on_game_finished(&self, _winner: Player) {}
}
