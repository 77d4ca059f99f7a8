//! Chance seam: how die faces and suspicion draws are generated.
//!
//! The engine never touches an RNG directly; every draw goes through
//! `ChanceMode::roll_uniform`, so a game can run on OS entropy, on a seeded
//! PRNG for reproducible play, or on a fixed script under test.

use std::collections::VecDeque;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::{OsRng, RngCore, SeedableRng};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChanceError {
    /// The OS entropy source failed. Unrecoverable: no dice, no game.
    #[error("entropy source failed: {0}")]
    Entropy(#[from] rand_core::Error),
    #[error("scripted chance ran out of values")]
    ScriptExhausted,
    #[error("scripted value {value} outside [{lo},{hi}]")]
    ScriptOutOfRange { value: u32, lo: u32, hi: u32 },
    #[error("empty draw range [{lo},{hi}]")]
    EmptyRange { lo: u32, hi: u32 },
}

/// How uniform draws are generated.
pub enum ChanceMode {
    /// OS entropy. The only mode whose draws can fail.
    Entropy,
    /// Pseudorandom stream backed by a small seeded PRNG (reproducible games).
    Seeded { rng: Box<ChaCha8Rng> },
    /// Fixed queue of draw values, consumed front to back (test substitute).
    Scripted { values: VecDeque<u32> },
}

impl ChanceMode {
    pub fn entropy() -> Self {
        ChanceMode::Entropy
    }

    pub fn seeded(seed: u64) -> Self {
        ChanceMode::Seeded {
            rng: Box::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn scripted(values: impl IntoIterator<Item = u32>) -> Self {
        ChanceMode::Scripted {
            values: values.into_iter().collect(),
        }
    }

    /// Uniform draw over the closed range `[lo, hi]`.
    pub fn roll_uniform(&mut self, lo: u32, hi: u32) -> Result<u32, ChanceError> {
        if lo > hi {
            return Err(ChanceError::EmptyRange { lo, hi });
        }
        let span = u64::from(hi - lo) + 1;
        match self {
            ChanceMode::Entropy => {
                let mut buf = [0u8; 8];
                OsRng.try_fill_bytes(&mut buf)?;
                let r = u64::from_le_bytes(buf);
                Ok(lo + (r % span) as u32)
            }
            ChanceMode::Seeded { rng } => Ok(rng.gen_range(lo..=hi)),
            ChanceMode::Scripted { values } => {
                let value = values.pop_front().ok_or(ChanceError::ScriptExhausted)?;
                if value < lo || value > hi {
                    return Err(ChanceError::ScriptOutOfRange { value, lo, hi });
                }
                Ok(value)
            }
        }
    }
}
