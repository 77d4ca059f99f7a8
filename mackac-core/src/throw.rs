//! Throws: unordered pairs of die faces, their classification, and the
//! Mačkáč total order over all 21 distinct outcomes.
//!
//! Ranking rule, ascending: non-doubles by pair value (3-1 lowest, 6-5
//! highest), then doubles 1-1 through 6-6, then the {2,1} throw ("Mačkáč")
//! above everything.

use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;

use crate::chance::{ChanceError, ChanceMode};
use crate::die::{Die, FACE_MAX, FACE_MIN};

/// Pair value of the special throw.
pub const MACKAC_VALUE: u8 = 21;

/// Number of distinct unordered two-die outcomes.
pub const CATALOG_SIZE: usize = 21;

/// All 21 distinct outcomes as (high, low) face pairs, ascending by rank.
///
/// Built once, shared read-only; `rank_index` positions feed the suspicion
/// draw in the round engine.
pub const CATALOG: [(u8, u8); CATALOG_SIZE] = [
    (3, 1),
    (3, 2),
    (4, 1),
    (4, 2),
    (4, 3),
    (5, 1),
    (5, 2),
    (5, 3),
    (5, 4),
    (6, 1),
    (6, 2),
    (6, 3),
    (6, 4),
    (6, 5),
    (1, 1),
    (2, 2),
    (3, 3),
    (4, 4),
    (5, 5),
    (6, 6),
    (2, 1),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThrowError {
    #[error("die face {0} outside 1..=6")]
    FaceOutOfRange(u8),
    #[error("die is unrolled")]
    Unrolled,
}

/// An unordered pair of two rolled die faces.
///
/// Swapping the faces never changes identity or rank. A value is immutable
/// once built; a re-roll produces a fresh `Throw` with both faces replaced
/// together, never one alone.
#[derive(Debug, Clone, Copy)]
pub struct Throw {
    a: u8,
    b: u8,
}

impl Throw {
    pub fn from_faces(a: u8, b: u8) -> Result<Self, ThrowError> {
        for face in [a, b] {
            if !(FACE_MIN..=FACE_MAX).contains(&face) {
                return Err(ThrowError::FaceOutOfRange(face));
            }
        }
        Ok(Throw { a, b })
    }

    /// Build from two already-rolled dice.
    pub fn from_dice(d1: &Die, d2: &Die) -> Result<Self, ThrowError> {
        match (d1.face(), d2.face()) {
            (Some(a), Some(b)) => Throw::from_faces(a, b),
            _ => Err(ThrowError::Unrolled),
        }
    }

    /// Roll two fresh dice as one atomic throw.
    pub fn roll(chance: &mut ChanceMode) -> Result<Self, ChanceError> {
        let mut d1 = Die::unrolled();
        let mut d2 = Die::unrolled();
        let a = d1.roll(chance)?;
        let b = d2.roll(chance)?;
        Ok(Throw { a, b })
    }

    /// The lowest-ranking throw (3-1); the threshold after every reset.
    pub fn lowest() -> Self {
        let (a, b) = CATALOG[0];
        Throw { a, b }
    }

    fn hi(&self) -> u8 {
        self.a.max(self.b)
    }

    fn lo(&self) -> u8 {
        self.a.min(self.b)
    }

    /// Both dice show the same face.
    pub fn is_double(&self) -> bool {
        self.a == self.b
    }

    /// The common face when this is a double.
    pub fn double_value(&self) -> Option<u8> {
        if self.is_double() {
            Some(self.a)
        } else {
            None
        }
    }

    /// Two-digit reading: ten times the higher face plus the lower.
    pub fn pair_value(&self) -> u8 {
        self.hi() * 10 + self.lo()
    }

    /// The unordered pair {2,1}: the Mačkáč, highest-ranking outcome.
    pub fn is_special(&self) -> bool {
        !self.is_double() && self.pair_value() == MACKAC_VALUE
    }
}

impl PartialEq for Throw {
    fn eq(&self, other: &Self) -> bool {
        self.hi() == other.hi() && self.lo() == other.lo()
    }
}

impl Eq for Throw {}

impl fmt::Display for Throw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}] = ", self.a, self.b)?;
        if self.is_special() {
            write!(f, "MACKAC")
        } else if let Some(v) = self.double_value() {
            write!(f, "{} natives", v)
        } else {
            write!(f, "{}", self.pair_value())
        }
    }
}

/// Injectable ranking strategy: a strict total order over throws.
pub type Comparator = fn(&Throw, &Throw) -> Ordering;

/// The Mačkáč ranking.
///
/// Special throw above everything, doubles above non-doubles and ordered by
/// their common face, non-doubles by pair value. The special case is checked
/// on both arguments up front, so the order stays antisymmetric regardless of
/// which argument holds the Mačkáč.
pub fn mackac_order(t1: &Throw, t2: &Throw) -> Ordering {
    match (t1.is_special(), t2.is_special()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match (t1.double_value(), t2.double_value()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => t1.pair_value().cmp(&t2.pair_value()),
        },
    }
}

/// Position of `t` in the ascending catalog: 0 (lowest) to 20 (Mačkáč).
pub fn rank_index(t: &Throw) -> usize {
    let key = (t.hi(), t.lo());
    match CATALOG.iter().position(|&pair| pair == key) {
        Some(i) => i,
        None => unreachable!("every valid throw appears in the catalog"),
    }
}
