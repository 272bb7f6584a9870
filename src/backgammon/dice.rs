use std::fmt::Debug;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// The two dice of a turn. A slot holding `0` has not been rolled yet or was
/// already spent on a move.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dice {
    values: [u8; 2],
}

impl Dice {
    pub const EMPTY: Self = Dice { values: [0, 0] };

    pub const fn new(die1: u8, die2: u8) -> Self {
        Dice { values: [die1, die2] }
    }

    pub fn roll(source: &mut dyn DiceSource) -> Self {
        let die1 = source.roll_die();
        let die2 = source.roll_die();
        Dice::new(die1, die2)
    }

    pub fn die1(&self) -> u8 {
        self.values[0]
    }

    pub fn die2(&self) -> u8 {
        self.values[1]
    }

    pub fn values(&self) -> [u8; 2] {
        self.values
    }

    /// Unspent die values, in slot order. Equal dice are reported twice.
    pub fn available(&self) -> impl Iterator<Item = u8> + '_ {
        self.values.iter().copied().filter(|&v| v != 0)
    }

    pub fn all_used(&self) -> bool {
        self.values == [0, 0]
    }

    pub fn is_double(&self) -> bool {
        self.values[0] != 0 && self.values[0] == self.values[1]
    }

    /// Slot holding exactly `value`.
    pub fn find(&self, value: u8) -> Option<usize> {
        if value == 0 {
            return None;
        }
        self.values.iter().position(|&v| v == value)
    }

    /// Slot of the smallest die strictly larger than `value`.
    pub fn find_smallest_above(&self, value: u8) -> Option<usize> {
        (0..2)
            .filter(|&slot| self.values[slot] > value)
            .min_by_key(|&slot| self.values[slot])
    }

    pub fn consume(&mut self, slot: usize) {
        self.values[slot] = 0;
    }
}

impl Debug for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Dice({} | {})", self.values[0], self.values[1])
    }
}

impl std::fmt::Display for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.values[0], self.values[1])
    }
}

/// Where die values come from. The game draws every die through this seam so
/// tests and replays can fix the outcome.
pub trait DiceSource {
    /// A value in `1..=6`.
    fn roll_die(&mut self) -> u8;
}

/// Uniform dice backed by a seedable ChaCha stream.
#[derive(Clone, Debug)]
pub struct RandomDice {
    rng: ChaCha8Rng,
}

impl RandomDice {
    pub fn new(seed: u64) -> Self {
        RandomDice { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        RandomDice { rng: ChaCha8Rng::from_rng(&mut rand::rng()) }
    }
}

impl DiceSource for RandomDice {
    fn roll_die(&mut self) -> u8 {
        self.rng.random_range(1..=6)
    }
}

/// Replays a fixed sequence of die values, starting over once exhausted.
/// An empty sequence always rolls 1.
#[derive(Clone, Debug)]
pub struct LoadedDice {
    values: Vec<u8>,
    cursor: usize,
}

impl LoadedDice {
    pub fn new(values: impl IntoIterator<Item = u8>) -> Self {
        let values: Vec<u8> = values.into_iter().collect();
        debug_assert!(values.iter().all(|v| (1..=6).contains(v)), "die values must be in 1..=6");
        LoadedDice { values, cursor: 0 }
    }
}

impl DiceSource for LoadedDice {
    fn roll_die(&mut self) -> u8 {
        if self.values.is_empty() {
            return 1;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
