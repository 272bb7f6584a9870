mod board;
pub use board::Board;
pub use board::{CHECKERS_PER_PLAYER, POINTS};

mod column;
pub use column::Column;

mod player;
pub use player::Player;

mod position;
pub use position::Position;

mod halfmove;
pub use halfmove::HalfMove;

mod dice;
pub use dice::{Dice, DiceSource, LoadedDice, RandomDice};

mod observer;
pub use observer::GameObserver;

mod state;
pub use state::GameState;

mod game;
pub use game::{Game, GamePhase, MoveOutcome, MoveResult};

