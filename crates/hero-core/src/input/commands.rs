use crate::api::types::Facing;

/// What the player asked for this tick. Built fresh every tick from the
/// held buttons and never kept around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Commands {
    pub up: bool,
    pub left: bool,
    pub right: bool,
    pub attack: bool,
    pub melee_attack: bool,
}

impl Commands {
    /// Nothing pressed.
    pub const NONE: Commands = Commands {
        up: false,
        left: false,
        right: false,
        attack: false,
        melee_attack: false,
    };

    /// Requested horizontal direction. Left and right together cancel out.
    pub fn horizontal(&self) -> Option<Facing> {
        match (self.left, self.right) {
            (true, false) => Some(Facing::Left),
            (false, true) => Some(Facing::Right),
            _ => None,
        }
    }

    pub fn with_up(mut self) -> Self {
        self.up = true;
        self
    }

    pub fn with_left(mut self) -> Self {
        self.left = true;
        self
    }

    pub fn with_right(mut self) -> Self {
        self.right = true;
        self
    }

    pub fn with_attack(mut self) -> Self {
        self.attack = true;
        self
    }

    pub fn with_melee(mut self) -> Self {
        self.melee_attack = true;
        self
    }
}
