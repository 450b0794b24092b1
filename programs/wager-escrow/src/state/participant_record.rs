use anchor_lang::prelude::*;

use crate::state::Outcome;

/// Where a participant stands in the bet/payout lifecycle. Only moves forward.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Position {
    #[default]
    Open,
    Placed { outcome: Outcome },
    PaidOut { outcome: Outcome },
}

#[account]
#[derive(Debug, Default)]
pub struct ParticipantRecord {
    pub participant: Pubkey,
    pub event: Pubkey,
    pub position: Position,
    pub bump: u8,
}

impl ParticipantRecord {
    pub const LEN: usize = 32 + 32 + 1 + 1 + 1;

    pub fn has_bet(&self) -> bool {
        !matches!(self.position, Position::Open)
    }

    pub fn has_claimed_payout(&self) -> bool {
        matches!(self.position, Position::PaidOut { .. })
    }

    pub fn chosen_outcome(&self) -> Option<Outcome> {
        match self.position {
            Position::Open => None,
            Position::Placed { outcome } | Position::PaidOut { outcome } => Some(outcome),
        }
    }
}
