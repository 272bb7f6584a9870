use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::backgammon::Position;

/// A single checker movement played with one die.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HalfMove {
    from: Position,
    to: Position,
}

impl HalfMove {
    pub fn new(from: Position, to: Position) -> Self {
        HalfMove { from, to }
    }

    pub fn from(&self) -> Position {
        self.from
    }

    pub fn to(&self) -> Position {
        self.to
    }
}

impl Debug for HalfMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
