//! A single six-sided die.

use crate::chance::{ChanceError, ChanceMode};

pub const FACE_MIN: u8 = 1;
pub const FACE_MAX: u8 = 6;

/// Holds either nothing ("unrolled") or a face value in 1..=6.
///
/// Only `roll` mutates the face; everyone else reads it through `face()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Die {
    face: Option<u8>,
}

impl Die {
    pub const fn unrolled() -> Self {
        Die { face: None }
    }

    /// Read the face; `None` while unrolled.
    pub fn face(&self) -> Option<u8> {
        self.face
    }

    /// Overwrite the face with a uniform draw from 1..=6.
    pub fn roll(&mut self, chance: &mut ChanceMode) -> Result<u8, ChanceError> {
        let face = chance.roll_uniform(u32::from(FACE_MIN), u32::from(FACE_MAX))? as u8;
        self.face = Some(face);
        Ok(face)
    }
}
