use anchor_lang::prelude::*;
use solana_program::clock::UnixTimestamp;

use crate::constants::OUTCOME_COUNT;
use crate::error::EscrowError;
use crate::state::Outcome;

/// Winning outcome together with the figures derived from it when the result is set.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub outcome: Outcome,
    pub winner_count: u64,
    pub payout_per_winner: u64,
}

/// Write-once result of the event. Winner count and payout only exist once the result does.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EventResult {
    #[default]
    Unset,
    Set(Settlement),
}

/// Event-scoped configuration and aggregate betting counters.
///
/// Participants are never enumerated: the per-outcome counters and the total stake are the only
/// view the event has of who bet on what.
#[account]
#[derive(Debug, Default)]
pub struct EventRecord {
    pub event_id: u64,
    pub manager: Pubkey,
    pub oracle: Pubkey,
    pub mint: Pubkey,
    /// Token account holding every deposit. Owned by this record's PDA.
    pub escrow: Pubkey,
    pub event_start_time: UnixTimestamp,
    pub event_end_time: UnixTimestamp,
    /// Seconds after `event_end_time` during which winners are guaranteed to be able to claim.
    pub payout_grace_period: u64,
    pub fixed_bet_amount: u64,
    pub outcome_counter: [u64; OUTCOME_COUNT],
    pub total_stake: u64,
    pub payouts_claimed: u64,
    pub result: EventResult,
    pub bump: u8,
    pub escrow_bump: u8,
}

impl EventRecord {
    pub const LEN: usize = 8 // event_id
        + 32 * 4 // manager, oracle, mint, escrow
        + 8 * 4 // timing window, grace period, fixed bet
        + 8 * OUTCOME_COUNT // outcome_counter
        + 8 // total_stake
        + 8 // payouts_claimed
        + 1 + 1 + 8 + 8 // result
        + 1 // bump
        + 1; // escrow_bump

    pub fn bets_placed(&self) -> u64 {
        self.outcome_counter.iter().sum()
    }

    pub fn bets_on(&self, outcome: Outcome) -> u64 {
        self.outcome_counter[outcome.index()]
    }

    pub fn settlement(&self) -> Option<&Settlement> {
        match &self.result {
            EventResult::Set(settlement) => Some(settlement),
            EventResult::Unset => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.settlement().is_some()
    }

    pub fn winning_outcome(&self) -> Option<Outcome> {
        self.settlement().map(|s| s.outcome)
    }

    pub fn winner_count(&self) -> Option<u64> {
        self.settlement().map(|s| s.winner_count)
    }

    pub fn payout_per_winner(&self) -> Option<u64> {
        self.settlement().map(|s| s.payout_per_winner)
    }

    /// First instant at which the manager may delete the event.
    pub fn deletion_unlocks_at(&self) -> Result<UnixTimestamp> {
        let grace = i64::try_from(self.payout_grace_period)
            .map_err(|_| error!(EscrowError::ArithmeticOverflow))?;
        self.event_end_time
            .checked_add(grace)
            .ok_or_else(|| error!(EscrowError::ArithmeticOverflow))
    }

    /// Stake must always equal the fixed bet times the number of bets placed.
    pub fn stake_matches_counters(&self) -> bool {
        self.bets_placed()
            .checked_mul(self.fixed_bet_amount)
            .map_or(false, |expected| expected == self.total_stake)
    }
}
