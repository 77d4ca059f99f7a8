//! Round engine: the turn-based claim/challenge state machine.
//!
//! This module is the single place that mutates `RoundState` via rules.
//! Seats are 0 and 1; the claim role flips with `1u8.saturating_sub(..)`
//! after every resolved claim.

use std::cmp::Ordering;

use thiserror::Error;

use crate::chance::{ChanceError, ChanceMode};
use crate::player::Participant;
use crate::throw::{mackac_order, rank_index, Comparator, Throw, ThrowError, CATALOG_SIZE};

/// Health both participants start with.
pub const STARTING_HEALTH: u8 = 4;

/// What the claimant announces after seeing their roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimDecl {
    /// Announce the actual roll.
    Truth,
    /// Announce this pair of faces instead, truthful or not.
    Declare(u8, u8),
}

/// The responder's decision on a pending claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Trust,
    Challenge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Claimant re-rolls their throw at the start of a claim turn.
    Roll,
    /// Claimant announces the pending claim.
    Announce(ClaimDecl),
    /// Responder trusts or challenges the pending claim.
    Respond(Response),
}

/// How a claim was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Challenge against a truthful claim; the challenger pays.
    ChallengeFailed,
    /// Challenge exposed a fabricated claim; the claimant pays.
    ChallengeSucceeded,
    /// Trusted claim ranked below the standing threshold; automatic penalty,
    /// no randomness consulted.
    BelowThreshold,
    /// Suspicion draw fired on a fabricated claim; the claimant pays.
    SuspicionConfirmed,
    /// Suspicion draw fired on a truthful claim; the doubter pays.
    SuspicionMisplaced,
    /// The claim stands; the threshold advances to it.
    Accepted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: Outcome,
    /// Seat that took the hit, if any.
    pub damaged: Option<u8>,
    /// Claimant's actual throw, when the resolution revealed it.
    pub revealed: Option<Throw>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Claimant to roll; the threshold starts from the lowest throw.
    AwaitingClaim,
    /// Claimant has rolled and must announce (truth or fabrication).
    Declaring,
    /// Responder must trust or challenge the pending claim.
    AwaitingChallenge,
    /// Claimant to roll against the threshold left by an accepted claim.
    AwaitingCounterClaim,
    /// A claim was just resolved; `advance_round` moves to the next round.
    Resolved(Resolution),
    GameOver { winner: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundState {
    pub players: [Participant; 2],
    /// Seat currently holding the claim role (0 or 1).
    pub claimant: u8,
    /// Rank every new claim is measured against.
    pub threshold: Throw,
    /// The claimant's unresolved claim, possibly fabricated.
    pub pending_claim: Option<Throw>,
    /// True iff the pending claim differs from the claimant's actual roll.
    pub fabricated: bool,
    pub phase: Phase,
    /// Ranking strategy; `mackac_order` is the only shipped rule set.
    pub comparator: Comparator,
}

#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("action {action:?} not allowed in phase {phase:?}")]
    PhaseMismatch { action: Action, phase: Phase },
    #[error("invalid declaration: {0}")]
    InvalidDeclaration(#[from] ThrowError),
    #[error(transparent)]
    Chance(#[from] ChanceError),
    #[error("invalid state: {msg}")]
    InvalidState { msg: &'static str },
}

/// Canonical initial state: both participants roll, seat 0 claims first.
pub fn initial_state(chance: &mut ChanceMode) -> Result<RoundState, ApplyError> {
    initial_state_with_health(STARTING_HEALTH, chance)
}

pub fn initial_state_with_health(
    health: u8,
    chance: &mut ChanceMode,
) -> Result<RoundState, ApplyError> {
    if health == 0 {
        return Err(ApplyError::InvalidState {
            msg: "starting health must be >= 1",
        });
    }
    let players = [
        Participant::new(health, chance)?,
        Participant::new(health, chance)?,
    ];
    Ok(RoundState {
        players,
        claimant: 0,
        threshold: Throw::lowest(),
        pending_claim: None,
        fabricated: false,
        phase: Phase::AwaitingClaim,
        comparator: mackac_order,
    })
}

/// Terminal when either participant is out of health.
pub fn is_terminal(s: &RoundState) -> bool {
    s.players[0].is_defeated() || s.players[1].is_defeated()
}

/// Winning seat once the state is terminal.
pub fn terminal_winner(s: &RoundState) -> Option<u8> {
    if s.players[0].is_defeated() {
        Some(1)
    } else if s.players[1].is_defeated() {
        Some(0)
    } else {
        None
    }
}

/// Apply an action to a state, producing the next state (or an error if the
/// action does not belong to the current phase).
pub fn apply_action(
    mut state: RoundState,
    action: Action,
    chance: &mut ChanceMode,
) -> Result<RoundState, ApplyError> {
    match (state.phase, action) {
        (Phase::AwaitingClaim | Phase::AwaitingCounterClaim, Action::Roll) => {
            let c = state.claimant as usize;
            let rolled = state.players[c].reroll(chance)?;
            state.pending_claim = Some(rolled);
            state.fabricated = false;
            state.phase = Phase::Declaring;
            Ok(state)
        }
        (Phase::Declaring, Action::Announce(decl)) => {
            let c = state.claimant as usize;
            let actual = state.players[c].current_throw;
            if let ClaimDecl::Declare(a, b) = decl {
                let declared = Throw::from_faces(a, b)?;
                state.pending_claim = Some(declared);
                state.fabricated = declared != actual;
            }
            state.phase = Phase::AwaitingChallenge;
            Ok(state)
        }
        (Phase::AwaitingChallenge, Action::Respond(response)) => resolve(state, response, chance),
        (phase, action) => Err(ApplyError::PhaseMismatch { action, phase }),
    }
}

fn resolve(
    mut state: RoundState,
    response: Response,
    chance: &mut ChanceMode,
) -> Result<RoundState, ApplyError> {
    let claimant = state.claimant;
    let responder = 1u8.saturating_sub(claimant);
    let pending = state.pending_claim.ok_or(ApplyError::InvalidState {
        msg: "no pending claim in challenge phase",
    })?;
    let actual = state.players[claimant as usize].current_throw;

    let resolution = match response {
        Response::Challenge => {
            if pending == actual {
                Resolution {
                    outcome: Outcome::ChallengeFailed,
                    damaged: Some(responder),
                    revealed: Some(actual),
                }
            } else {
                Resolution {
                    outcome: Outcome::ChallengeSucceeded,
                    damaged: Some(claimant),
                    revealed: Some(actual),
                }
            }
        }
        Response::Trust => {
            if (state.comparator)(&pending, &state.threshold) == Ordering::Less {
                // Out-of-order claim: penalized before any randomness.
                Resolution {
                    outcome: Outcome::BelowThreshold,
                    damaged: Some(claimant),
                    revealed: None,
                }
            } else {
                // Suspicion scales with how many catalog ranks sit below the claim.
                let below = rank_index(&pending) as u32;
                let draw = chance.roll_uniform(0, CATALOG_SIZE as u32)?;
                if draw < below {
                    if state.fabricated {
                        Resolution {
                            outcome: Outcome::SuspicionConfirmed,
                            damaged: Some(claimant),
                            revealed: Some(actual),
                        }
                    } else {
                        Resolution {
                            outcome: Outcome::SuspicionMisplaced,
                            damaged: Some(responder),
                            revealed: Some(actual),
                        }
                    }
                } else {
                    Resolution {
                        outcome: Outcome::Accepted,
                        damaged: None,
                        revealed: None,
                    }
                }
            }
        }
    };

    if let Some(seat) = resolution.damaged {
        state.players[seat as usize].take_hit();
        state.threshold = Throw::lowest();
    } else {
        state.threshold = pending;
    }
    // The claim role passes to the other participant either way.
    state.claimant = responder;
    state.phase = Phase::Resolved(resolution);
    Ok(state)
}

/// Move past a `Resolved` phase: game-over check first, then the next claim turn.
pub fn advance_round(mut state: RoundState) -> Result<RoundState, ApplyError> {
    let resolution = match state.phase {
        Phase::Resolved(r) => r,
        _ => {
            return Err(ApplyError::InvalidState {
                msg: "advance_round outside Resolved phase",
            })
        }
    };
    state.pending_claim = None;
    state.fabricated = false;
    state.phase = if let Some(winner) = terminal_winner(&state) {
        Phase::GameOver { winner }
    } else if resolution.damaged.is_none() {
        Phase::AwaitingCounterClaim
    } else {
        Phase::AwaitingClaim
    };
    Ok(state)
}
