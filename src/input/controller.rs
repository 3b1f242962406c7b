use crate::game::Direction;

/// Holds the direction requested since the last tick
///
/// Key presses may arrive several times per tick. Each legal press replaces
/// the previous one, so only the latest survives until the tick takes it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputController {
    pending: Option<Direction>,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `direction` unless it reverses `current`, the direction the snake is moving in
    ///
    /// Returns whether the press was accepted.
    pub fn on_key(&mut self, direction: Direction, current: Direction) -> bool {
        if current.is_opposite(direction) {
            return false;
        }
        self.pending = Some(direction);
        true
    }

    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    /// Hand the pending direction to the tick and clear the slot
    pub fn take_pending(&mut self) -> Option<Direction> {
        self.pending.take()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}
