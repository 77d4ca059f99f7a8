//! Participant: a health counter plus the participant's current throw.

use crate::chance::{ChanceError, ChanceMode};
use crate::throw::Throw;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participant {
    /// Remaining health, floored at 0.
    pub health: u8,
    /// The participant's latest roll.
    pub current_throw: Throw,
}

impl Participant {
    /// New participant with a freshly rolled throw.
    pub fn new(health: u8, chance: &mut ChanceMode) -> Result<Self, ChanceError> {
        Ok(Participant {
            health,
            current_throw: Throw::roll(chance)?,
        })
    }

    /// Re-roll the whole throw (both dice together).
    pub fn reroll(&mut self, chance: &mut ChanceMode) -> Result<Throw, ChanceError> {
        self.current_throw = Throw::roll(chance)?;
        Ok(self.current_throw)
    }

    /// Apply one hit. Returns false when already defeated (no-op at 0).
    pub fn take_hit(&mut self) -> bool {
        if self.health == 0 {
            return false;
        }
        self.health -= 1;
        true
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }
}
