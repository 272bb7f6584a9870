use std::rc::{Rc, Weak};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    backgammon::{
        Board, CHECKERS_PER_PLAYER, Dice, DiceSource, GameObserver, GameState, HalfMove, POINTS,
        Player, Position, RandomDice,
    },
    config::GameConfig,
    error::GameError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    NotStarted,
    OpeningRollWhite,
    OpeningRollBlack,
    /// Both opening dice are in. Either a tie is waiting for a re-roll, or the
    /// first player is known and play starts with
    /// [`Game::start_game_after_opening`].
    OpeningRollCompare,
    InProgress,
    Finished,
}

/// What a successful move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveOutcome {
    /// Die value spent on the move.
    pub die: u8,
    /// An opposing blot was sent to the bar.
    pub hit: bool,
    pub borne_off: bool,
}

pub type MoveResult = Result<MoveOutcome, GameError>;

/// The rules engine: owns the board, runs the turn cycle and tells observers
/// what happened.
///
/// Every command validates completely before it touches any state, so a
/// rejected command leaves the game unchanged.
pub struct Game {
    board: Board,
    phase: GamePhase,
    current_player: Player,
    dice: Dice,
    dice_rolled: bool,
    opening_dice: [u8; 2],
    opening_roll: bool,
    dice_source: Box<dyn DiceSource>,
    observers: Vec<Weak<dyn GameObserver>>,
}

impl Game {
    /// Dice come from a ChaCha stream seeded with `config.seed`, or from OS
    /// entropy when no seed is set.
    pub fn new(config: &GameConfig) -> Self {
        match config.seed {
            Some(seed) => Self::with_dice(config, RandomDice::new(seed)),
            None => Self::with_dice(config, RandomDice::from_entropy()),
        }
    }

    pub fn with_dice(config: &GameConfig, dice_source: impl DiceSource + 'static) -> Self {
        Game {
            board: Board::new(),
            phase: GamePhase::NotStarted,
            current_player: Player::White,
            dice: Dice::EMPTY,
            dice_rolled: false,
            opening_dice: [0, 0],
            opening_roll: config.opening_roll,
            dice_source: Box::new(dice_source),
            observers: Vec::new(),
        }
    }

    /// A game already in progress on `board`, with `current_player` about to roll.
    /// The board is taken as is; keeping fifteen checkers per side is up to the
    /// caller.
    pub fn from_position(board: Board, current_player: Player, dice_source: impl DiceSource + 'static) -> Self {
        Game {
            board,
            phase: GamePhase::InProgress,
            current_player,
            dice: Dice::EMPTY,
            dice_rolled: false,
            opening_dice: [0, 0],
            opening_roll: false,
            dice_source: Box::new(dice_source),
            observers: Vec::new(),
        }
    }

    pub fn start(&mut self) {
        self.board = Board::new();
        self.current_player = Player::White;
        self.dice = Dice::EMPTY;
        self.dice_rolled = false;
        self.opening_dice = [0, 0];
        self.phase = if self.opening_roll {
            GamePhase::OpeningRollWhite
        } else {
            GamePhase::InProgress
        };
        info!("game started ({:?})", self.phase);
        self.notify(|o| o.on_game_started());
    }

    /// Rolls one opening die, White's first and then Black's.
    ///
    /// After Black's die the higher roller becomes the first player. A tie clears
    /// both values and the next call starts the opening over with White.
    pub fn roll_opening_dice(&mut self) -> Result<u8, GameError> {
        let roller = match self.phase {
            GamePhase::NotStarted => return Err(GameError::GameNotStarted),
            GamePhase::Finished => return Err(GameError::GameAlreadyOver),
            GamePhase::OpeningRollWhite => Player::White,
            GamePhase::OpeningRollBlack => Player::Black,
            GamePhase::OpeningRollCompare if self.opening_dice == [0, 0] => Player::White,
            GamePhase::OpeningRollCompare | GamePhase::InProgress => return Err(GameError::InvalidMove),
        };

        let value = self.dice_source.roll_die();
        self.opening_dice[roller.index()] = value;
        debug!("{} opening die: {}", roller.name(), value);
        self.notify(|o| o.on_opening_dice_rolled(roller, value));

        match roller {
            Player::White => self.phase = GamePhase::OpeningRollBlack,
            Player::Black => {
                self.phase = GamePhase::OpeningRollCompare;
                let [white, black] = self.opening_dice;
                if white == black {
                    debug!("opening roll tied at {}, rolling again", white);
                    self.opening_dice = [0, 0];
                } else {
                    self.current_player = if white > black { Player::White } else { Player::Black };
                    debug!("{} wins the opening roll {}-{}", self.current_player.name(), white, black);
                }
            }
        }
        Ok(value)
    }

    /// Leaves the opening once it has a winner. Returns the first player.
    pub fn start_game_after_opening(&mut self) -> Result<Player, GameError> {
        match self.phase {
            GamePhase::OpeningRollCompare if self.opening_dice != [0, 0] => {}
            GamePhase::NotStarted => return Err(GameError::GameNotStarted),
            GamePhase::Finished => return Err(GameError::GameAlreadyOver),
            _ => return Err(GameError::InvalidMove),
        }
        self.phase = GamePhase::InProgress;
        self.dice = Dice::EMPTY;
        self.dice_rolled = false;

        let first = self.current_player;
        info!("{} moves first", first.name());
        self.notify(|o| o.on_turn_changed(first));
        Ok(first)
    }

    pub fn roll_dice(&mut self) -> Result<Dice, GameError> {
        self.ensure_in_progress()?;
        if self.dice_rolled {
            return Err(GameError::InvalidMove);
        }
        self.dice = Dice::roll(self.dice_source.as_mut());
        self.dice_rolled = true;

        let (player, dice) = (self.current_player, self.dice);
        let double = if dice.is_double() { " (double)" } else { "" };
        debug!("{} rolled {}{}", player.name(), dice, double);
        self.notify(|o| o.on_dice_rolled(player, dice.die1(), dice.die2()));
        Ok(dice)
    }

    /// Moves one checker of the current player and spends the matching die.
    ///
    /// Observers hear about every attempt through
    /// [`GameObserver::on_move_made`], rejected ones included. The turn passes
    /// to the opponent once both dice are spent or nothing else can be played.
    pub fn make_move(&mut self, from: Position, to: Position) -> MoveResult {
        let player = self.current_player;
        let result = self.apply_move(player, from, to);
        match &result {
            Ok(outcome) => debug!("{} played {} -> {} with {}", player.name(), from, to, outcome.die),
            Err(err) => debug!("{} tried {} -> {}: {}", player.name(), from, to, err),
        }
        self.notify(|o| o.on_move_made(player, from, to, &result));

        if result.is_ok() {
            if self.board.borne_off(player) == CHECKERS_PER_PLAYER {
                self.phase = GamePhase::Finished;
                info!("{} wins", player.name());
                self.notify(|o| o.on_game_finished(player));
            } else if self.dice.all_used() || !self.has_moves_available() {
                self.end_turn();
            }
        }
        result
    }

    /// Gives up the rest of the roll. Only allowed when no legal move exists.
    pub fn pass_turn(&mut self) -> Result<(), GameError> {
        self.ensure_in_progress()?;
        if !self.dice_rolled {
            return Err(GameError::DiceNotRolled);
        }
        if self.has_moves_available() {
            return Err(GameError::InvalidMove);
        }
        debug!("{} has no move with {}", self.current_player.name(), self.dice);
        self.end_turn();
        Ok(())
    }

    pub fn has_moves_available(&self) -> bool {
        self.selectable_sources()
            .into_iter()
            .any(|from| !self.targets_from(from).is_empty())
    }

    /// Whether the current player may pick up a checker from `from`. While the
    /// player has checkers on the bar the bar is the only selectable source.
    pub fn can_select_point(&self, from: Position) -> bool {
        if self.phase != GamePhase::InProgress || !self.dice_rolled {
            return false;
        }
        let player = self.current_player;
        let on_bar = self.board.bar(player) > 0;
        match from {
            Position::Bar => on_bar,
            Position::Point(point) => {
                !on_bar && self.board.get(point as usize).is_some_and(|c| c.is_owned_by(player))
            }
            Position::Off => false,
        }
    }

    /// Destinations reachable from `from` with the unspent dice, without duplicates.
    pub fn legal_targets(&self, from: Position) -> Vec<Position> {
        if !self.can_select_point(from) {
            return Vec::new();
        }
        self.targets_from(from)
    }

    /// Every single-checker move the current player can make right now.
    pub fn legal_moves(&self) -> Vec<HalfMove> {
        self.selectable_sources()
            .into_iter()
            .flat_map(|from| {
                self.targets_from(from)
                    .into_iter()
                    .map(move |to| HalfMove::new(from, to))
            })
            .collect()
    }

    /// True when `point` holds two or more checkers of `player`'s opponent.
    pub fn is_move_blocked(&self, point: u8, player: Player) -> bool {
        self.board
            .get(point as usize)
            .is_some_and(|c| c.count() >= 2 && c.is_owned_by(player.opposite()))
    }

    /// True when `point` holds a single checker of `player`'s opponent.
    pub fn can_hit(&self, point: u8, player: Player) -> bool {
        self.board
            .get(point as usize)
            .is_some_and(|c| c.count() == 1 && c.is_owned_by(player.opposite()))
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn dice(&self) -> Dice {
        self.dice
    }

    pub fn dice_rolled(&self) -> bool {
        self.dice_rolled
    }

    /// Opening roll values, White first.
    pub fn opening_dice(&self) -> [u8; 2] {
        self.opening_dice
    }

    pub fn winner(&self) -> Option<Player> {
        if self.phase != GamePhase::Finished {
            return None;
        }
        Player::ALL
            .into_iter()
            .find(|&p| self.board.borne_off(p) == CHECKERS_PER_PLAYER)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Checkers on `index`, or 0 for an index off the board.
    pub fn column_count(&self, index: usize) -> u8 {
        self.board.get(index).map_or(0, |c| c.count())
    }

    pub fn column_color(&self, index: usize) -> Option<Player> {
        self.board.get(index).and_then(|c| c.owner())
    }

    pub fn bar_count(&self, player: Player) -> u8 {
        self.board.bar(player)
    }

    pub fn borne_off_count(&self, player: Player) -> u8 {
        self.board.borne_off(player)
    }

    pub fn state(&self) -> GameState {
        GameState::capture(
            &self.board,
            self.phase,
            self.current_player,
            self.dice,
            self.dice_rolled,
            self.opening_dice,
        )
    }

    /// Registers an observer without taking ownership of it. Once the last `Rc`
    /// to the observer is dropped it simply stops receiving events. Registering
    /// the same observer twice has no effect.
    pub fn add_observer<O: GameObserver + 'static>(&mut self, observer: &Rc<O>) {
        let weak: Weak<O> = Rc::downgrade(observer);
        self.register(weak);
    }

    /// Same as [`Game::add_observer`] for an observer that is already behind
    /// `dyn GameObserver`.
    pub fn add_shared_observer(&mut self, observer: &Rc<dyn GameObserver>) {
        self.register(Rc::downgrade(observer));
    }

    pub fn remove_observer<O: GameObserver + ?Sized>(&mut self, observer: &Rc<O>) {
        let target = Rc::as_ptr(observer).cast::<()>();
        self.observers
            .retain(|o| o.strong_count() > 0 && o.as_ptr().cast::<()>() != target);
    }

    /// Registered observers that are still alive.
    pub fn observer_count(&self) -> usize {
        self.observers.iter().filter(|o| o.strong_count() > 0).count()
    }

    fn register(&mut self, observer: Weak<dyn GameObserver>) {
        self.observers.retain(|o| o.strong_count() > 0);
        if !self.observers.iter().any(|o| o.ptr_eq(&observer)) {
            self.observers.push(observer);
        }
    }

    fn notify(&mut self, event: impl Fn(&dyn GameObserver)) {
        self.observers.retain(|o| o.strong_count() > 0);
        let live: Vec<Rc<dyn GameObserver>> = self.observers.iter().filter_map(Weak::upgrade).collect();
        for observer in live {
            event(observer.as_ref());
        }
    }

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        match self.phase {
            GamePhase::InProgress => Ok(()),
            GamePhase::Finished => Err(GameError::GameAlreadyOver),
            _ => Err(GameError::GameNotStarted),
        }
    }

    fn end_turn(&mut self) {
        self.dice = Dice::EMPTY;
        self.dice_rolled = false;
        self.current_player = self.current_player.opposite();

        let player = self.current_player;
        debug!("turn passes to {}", player.name());
        self.notify(|o| o.on_turn_changed(player));
    }

    fn selectable_sources(&self) -> Vec<Position> {
        if self.phase != GamePhase::InProgress || !self.dice_rolled {
            return Vec::new();
        }
        let player = self.current_player;
        if self.board.bar(player) > 0 {
            return vec![Position::Bar];
        }
        (0..POINTS as u8)
            .filter(|&p| self.board[p as usize].is_owned_by(player))
            .map(Position::Point)
            .collect()
    }

    /// Targets from a source the current player is allowed to select.
    fn targets_from(&self, from: Position) -> Vec<Position> {
        let player = self.current_player;
        let mut targets = Vec::new();
        for die in self.dice.available() {
            let target = match from {
                Position::Bar => {
                    let entry = player.entry_point(die);
                    (!self.is_move_blocked(entry, player)).then_some(Position::Point(entry))
                }
                Position::Point(point) => match player.advance(point, die) {
                    Some(to) => (!self.is_move_blocked(to, player)).then_some(Position::Point(to)),
                    None => self.can_bear_off_with(point, die).then_some(Position::Off),
                },
                Position::Off => None,
            };
            if let Some(target) = target {
                if !targets.contains(&target) {
                    targets.push(target);
                }
            }
        }
        targets
    }

    /// An exact die always bears off; a larger one only from the rearmost checker.
    fn can_bear_off_with(&self, point: u8, die: u8) -> bool {
        let player = self.current_player;
        if !self.board.all_home(player) {
            return false;
        }
        let distance = player.distance_to_edge(point);
        die == distance || (die > distance && !self.board.has_checker_behind(point, player))
    }

    fn apply_move(&mut self, player: Player, from: Position, to: Position) -> MoveResult {
        self.ensure_in_progress().map_err(|_| GameError::GameNotStarted)?;
        if !self.dice_rolled {
            return Err(GameError::DiceNotRolled);
        }
        match from {
            Position::Bar => self.enter_from_bar(player, to),
            Position::Point(point) if (point as usize) < POINTS => self.move_from_point(player, point, to),
            Position::Point(_) | Position::Off => Err(GameError::InvalidFromColumn),
        }
    }

    fn enter_from_bar(&mut self, player: Player, to: Position) -> MoveResult {
        if self.board.bar(player) == 0 {
            return Err(GameError::InvalidMove);
        }
        let target = to
            .point()
            .filter(|&p| (p as usize) < POINTS)
            .ok_or(GameError::InvalidMove)?;
        let slot = player
            .entry_die(target)
            .and_then(|die| self.dice.find(die))
            .ok_or(GameError::InvalidMove)?;
        if self.is_move_blocked(target, player) {
            return Err(GameError::BlockedByOpponent);
        }

        let die = self.dice.values()[slot];
        let hit = self.land(player, target);
        self.board.decrement_bar(player);
        self.dice.consume(slot);
        Ok(MoveOutcome { die, hit, borne_off: false })
    }

    fn move_from_point(&mut self, player: Player, point: u8, to: Position) -> MoveResult {
        if !self.board[point as usize].is_owned_by(player) {
            return Err(GameError::InvalidMove);
        }
        if to == Position::Off && !self.board.all_home(player) {
            return Err(GameError::CannotBearOff);
        }
        if self.board.bar(player) > 0 {
            return Err(GameError::InvalidMove);
        }

        match to {
            Position::Off => self.bear_off(player, point),
            Position::Point(target) if (target as usize) < POINTS => {
                let slot = u8::try_from(player.distance(point, target))
                    .ok()
                    .and_then(|distance| self.dice.find(distance))
                    .ok_or(GameError::InvalidMove)?;
                if self.is_move_blocked(target, player) {
                    return Err(GameError::BlockedByOpponent);
                }

                let die = self.dice.values()[slot];
                self.board[point as usize].remove_piece();
                let hit = self.land(player, target);
                self.dice.consume(slot);
                Ok(MoveOutcome { die, hit, borne_off: false })
            }
            Position::Point(_) | Position::Bar => Err(GameError::InvalidToColumn),
        }
    }

    fn bear_off(&mut self, player: Player, point: u8) -> MoveResult {
        let distance = player.distance_to_edge(point);
        let slot = self
            .dice
            .find(distance)
            .or_else(|| {
                if self.board.has_checker_behind(point, player) {
                    None
                } else {
                    self.dice.find_smallest_above(distance)
                }
            })
            .ok_or(GameError::InvalidMove)?;

        let die = self.dice.values()[slot];
        self.board[point as usize].remove_piece();
        self.board.increment_borne_off(player);
        self.dice.consume(slot);
        Ok(MoveOutcome { die, hit: false, borne_off: true })
    }

    /// Puts a checker of `player` on `point`, sending a lone opposing checker to
    /// the bar first. Returns whether something was hit.
    fn land(&mut self, player: Player, point: u8) -> bool {
        let hit = self.can_hit(point, player);
        if hit {
            self.board[point as usize].remove_piece();
            self.board.increment_bar(player.opposite());
        }
        self.board[point as usize].add_piece(player);
        hit
    }
}
