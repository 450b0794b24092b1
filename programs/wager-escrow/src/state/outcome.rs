use anchor_lang::prelude::*;

use crate::constants::OUTCOME_COUNT;
use crate::error::EscrowError;

/// One of the three mutually exclusive results of the event.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    First,
    Second,
    Third,
}

impl Outcome {
    pub const ALL: [Outcome; OUTCOME_COUNT] = [Outcome::First, Outcome::Second, Outcome::Third];

    /// Position of this outcome in the per-outcome counters.
    pub fn index(self) -> usize {
        match self {
            Outcome::First => 0,
            Outcome::Second => 1,
            Outcome::Third => 2,
        }
    }
}

impl TryFrom<u8> for Outcome {
    type Error = EscrowError;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Outcome::ALL
            .get(value as usize)
            .copied()
            .ok_or(EscrowError::InvalidOutcome)
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> u8 {
        outcome.index() as u8
    }
}
