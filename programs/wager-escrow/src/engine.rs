//! Settlement engine.
//!
//! Every operation validates authorization first, then timing, then record state, and only mutates
//! the records once every check has passed. Fund movement is never performed here: operations that
//! pay out return a [`Disbursement`] which the calling instruction executes inside the same
//! transaction.

use anchor_lang::prelude::*;
use solana_program::clock::UnixTimestamp;

use crate::constants::{DEFAULT_FIXED_BET_AMOUNT, MINIMUM_NETWORK_FEE, OUTCOME_COUNT};
use crate::error::EscrowError;
use crate::guards;
use crate::state::{EventRecord, EventResult, Outcome, ParticipantRecord, Position, Settlement};

/// Creation parameters of an event. Unset roles default to the creator.
#[derive(Debug, Clone, Copy)]
pub struct EventSetup {
    pub event_id: u64,
    pub manager: Option<Pubkey>,
    pub oracle: Option<Pubkey>,
    pub mint: Pubkey,
    pub escrow: Pubkey,
    pub event_start_time: UnixTimestamp,
    pub event_end_time: UnixTimestamp,
    pub payout_grace_period: u64,
    pub bump: u8,
    pub escrow_bump: u8,
}

/// Payment attached to a bet, as seen before it is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deposit {
    pub destination: Pubkey,
    pub amount: u64,
}

/// Outbound fund movement requested by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disbursement {
    /// Move `amount` from escrow to `recipient`.
    Transfer { recipient: Pubkey, amount: u64 },
    /// Drain the escrow to `recipient` and close it.
    CloseAccount { recipient: Pubkey },
}

pub fn create(
    event: &mut EventRecord,
    creator: &Pubkey,
    setup: EventSetup,
    now: UnixTimestamp,
) -> Result<()> {
    guards::before(now, setup.event_end_time, EscrowError::EventEndInThePast)?;
    require!(
        setup.event_end_time > setup.event_start_time,
        EscrowError::InvalidEventWindow
    );

    let record = EventRecord {
        event_id: setup.event_id,
        manager: setup.manager.unwrap_or(*creator),
        oracle: setup.oracle.unwrap_or(*creator),
        mint: setup.mint,
        escrow: setup.escrow,
        event_start_time: setup.event_start_time,
        event_end_time: setup.event_end_time,
        payout_grace_period: setup.payout_grace_period,
        fixed_bet_amount: DEFAULT_FIXED_BET_AMOUNT,
        outcome_counter: [0; OUTCOME_COUNT],
        total_stake: 0,
        payouts_claimed: 0,
        result: EventResult::Unset,
        bump: setup.bump,
        escrow_bump: setup.escrow_bump,
    };
    // Deletion must stay computable for the whole lifetime of the event.
    record.deletion_unlocks_at()?;

    *event = record;
    Ok(())
}

pub fn opt_in(
    participant: &mut ParticipantRecord,
    owner: &Pubkey,
    event_key: &Pubkey,
    bump: u8,
) {
    *participant = ParticipantRecord {
        participant: *owner,
        event: *event_key,
        position: Position::Open,
        bump,
    };
}

pub fn place_bet(
    event: &mut EventRecord,
    participant: &mut ParticipantRecord,
    caller: &Pubkey,
    deposit: &Deposit,
    outcome: u8,
    now: UnixTimestamp,
) -> Result<Outcome> {
    guards::only(caller, &participant.participant, EscrowError::ParticipantMismatch)?;
    guards::before(now, event.event_start_time, EscrowError::BettingClosed)?;
    require!(
        deposit.amount == event.fixed_bet_amount,
        EscrowError::WrongBetAmount
    );
    require_keys_eq!(
        deposit.destination,
        event.escrow,
        EscrowError::WrongDepositDestination
    );
    require!(!participant.has_bet(), EscrowError::BetAlreadyPlaced);
    let outcome = Outcome::try_from(outcome)?;

    let counter = event.outcome_counter[outcome.index()]
        .checked_add(1)
        .ok_or(EscrowError::ArithmeticOverflow)?;
    let total_stake = event
        .total_stake
        .checked_add(event.fixed_bet_amount)
        .ok_or(EscrowError::ArithmeticOverflow)?;

    participant.position = Position::Placed { outcome };
    event.outcome_counter[outcome.index()] = counter;
    event.total_stake = total_stake;
    Ok(outcome)
}

/// Share of the pool owed to each winner, net of the network fee.
///
/// With no winners the whole stake stands in for the share; nobody can claim it, but the value
/// stays well-defined.
pub fn compute_payout(total_stake: u64, winner_count: u64) -> Result<u64> {
    let share = if winner_count == 0 {
        total_stake
    } else {
        total_stake
            .checked_div(winner_count)
            .ok_or(EscrowError::ArithmeticOverflow)?
    };
    share
        .checked_sub(MINIMUM_NETWORK_FEE)
        .ok_or_else(|| error!(EscrowError::PayoutUnderflow))
}

pub fn set_event_result(
    event: &mut EventRecord,
    caller: &Pubkey,
    outcome: u8,
    now: UnixTimestamp,
) -> Result<Settlement> {
    guards::only(caller, &event.oracle, EscrowError::NotOracle)?;
    guards::not_before(now, event.event_end_time, EscrowError::EventNotEnded)?;
    let outcome = Outcome::try_from(outcome)?;
    require!(!event.is_settled(), EscrowError::ResultAlreadySet);

    let winner_count = event.bets_on(outcome);
    let payout_per_winner = compute_payout(event.total_stake, winner_count)?;

    let settlement = Settlement {
        outcome,
        winner_count,
        payout_per_winner,
    };
    event.result = EventResult::Set(settlement);
    Ok(settlement)
}

pub fn claim_payout(
    event: &mut EventRecord,
    participant: &mut ParticipantRecord,
    caller: &Pubkey,
) -> Result<Disbursement> {
    guards::only(caller, &participant.participant, EscrowError::ParticipantMismatch)?;
    let Some(&Settlement {
        outcome: winning,
        payout_per_winner,
        ..
    }) = event.settlement()
    else {
        return err!(EscrowError::ResultNotSet);
    };

    let outcome = match participant.position {
        Position::Placed { outcome } if outcome == winning => outcome,
        Position::PaidOut { outcome } if outcome == winning => {
            return err!(EscrowError::PayoutAlreadyClaimed)
        }
        _ => return err!(EscrowError::NotAWinner),
    };
    let payouts_claimed = event
        .payouts_claimed
        .checked_add(1)
        .ok_or(EscrowError::ArithmeticOverflow)?;

    participant.position = Position::PaidOut { outcome };
    event.payouts_claimed = payouts_claimed;
    Ok(Disbursement::Transfer {
        recipient: *caller,
        amount: payout_per_winner,
    })
}

pub fn authorize_deletion(
    event: &EventRecord,
    caller: &Pubkey,
    now: UnixTimestamp,
) -> Result<Disbursement> {
    guards::only(caller, &event.manager, EscrowError::NotManager)?;
    guards::not_before(now, event.event_end_time, EscrowError::EventNotEnded)?;
    guards::not_before(
        now,
        event.deletion_unlocks_at()?,
        EscrowError::GracePeriodNotElapsed,
    )?;
    Ok(Disbursement::CloseAccount { recipient: *caller })
}
