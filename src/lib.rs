//! Rules engine for two-player backgammon.
//!
//! [`backgammon::Game`] owns the board, rolls the dice through an injectable
//! [`backgammon::DiceSource`], validates and plays single-checker moves
//! (hitting, bar re-entry, bearing off) and reports every step to registered
//! [`backgammon::GameObserver`]s. Drawing the board and mapping clicks to points
//! is left to the caller, which reads [`backgammon::GameState`] snapshots.

pub mod backgammon;
pub mod config;
pub mod error;

pub use crate::backgammon::{Board, Game, GameObserver, GamePhase, GameState, Player, Position};
pub use crate::config::{AppConfig, GameConfig};
pub use crate::error::GameError;
