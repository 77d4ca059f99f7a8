//! mackac-core: Mačkáč game rules — dice, throw ranking, and the round state machine.

pub mod chance;
pub mod config;
pub mod die;
pub mod engine;
pub mod player;
pub mod throw;

pub use chance::{ChanceError, ChanceMode};
pub use config::{ConfigError, GameConfig};
pub use die::Die;
pub use engine::{
    advance_round, apply_action, initial_state, initial_state_with_health, is_terminal,
    terminal_winner, Action, ApplyError, ClaimDecl, Outcome, Phase, Resolution, Response,
    RoundState, STARTING_HEALTH,
};
pub use player::Participant;
pub use throw::{mackac_order, rank_index, Comparator, Throw, ThrowError, CATALOG, CATALOG_SIZE};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");



#[cfg(test)]
mod throw_tests;
