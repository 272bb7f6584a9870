use crate::backgammon::Player;

/// A single point of the board. Holds checkers of at most one colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Column {
    count: u8,
    owner: Option<Player>,
}

impl Column {
    pub const EMPTY: Self = Column { count: 0, owner: None };

    pub(crate) fn with_checkers(player: Player, count: u8) -> Self {
        match count {
            0 => Column::EMPTY,
            n => Column { count: n, owner: Some(player) },
        }
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn owner(&self) -> Option<Player> {
        self.owner
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_owned_by(&self, player: Player) -> bool {
        self.owner == Some(player)
    }

    /// Places a checker of `player` on this point.
    ///
    /// A lone checker of the other colour is overwritten, not captured: sending it
    /// to the bar is the caller's job and has to happen before this call. A point
    /// held by two or more opposing checkers is left untouched.
    pub fn add_piece(&mut self, player: Player) {
        match self.owner {
            None => {
                self.owner = Some(player);
                self.count = 1;
            }
            Some(owner) if owner == player => self.count += 1,
            Some(_) if self.count == 1 => {
                self.owner = Some(player);
                self.count = 1;
            }
            Some(_) => {}
        }
    }

    pub fn remove_piece(&mut self) {
        if self.count == 0 {
            return;
        }
        self.count -= 1;
        if self.count == 0 {
            self.owner = None;
        }
    }

    /// Overrides the owner without touching the count. Only meant for board setup;
    /// clearing the owner also clears the count so the point stays consistent.
    pub fn set_owner(&mut self, owner: Option<Player>) {
        self.owner = owner;
        if owner.is_none() {
            self.count = 0;
        }
    }
}
