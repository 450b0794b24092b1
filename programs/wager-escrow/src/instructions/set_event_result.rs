use anchor_lang::prelude::*;

use crate::constants::*;
use crate::engine;
use crate::state::{EventRecord, Settlement};

#[derive(Accounts)]
pub struct SetEventResult<'info> {
    pub oracle: Signer<'info>,

    #[account(mut, seeds = [EVENT_SEED, &event.event_id.to_le_bytes()], bump = event.bump)]
    pub event: Account<'info, EventRecord>,
}

pub fn set_event_result_handler(ctx: Context<SetEventResult>, outcome: u8) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let oracle = ctx.accounts.oracle.key();
    let event = &mut ctx.accounts.event;

    let Settlement {
        outcome,
        winner_count,
        payout_per_winner,
    } = engine::set_event_result(event, &oracle, outcome, now)?;

    msg!(
        "event {} settled on {:?}: {} winners, {} each",
        event.event_id,
        outcome,
        winner_count,
        payout_per_winner
    );
    emit!(EventResultSet {
        event_id: event.event_id,
        outcome: outcome.into(),
        winner_count,
        payout_per_winner,
        total_stake: event.total_stake,
    });
    Ok(())
}

#[event]
pub struct EventResultSet {
    pub event_id: u64,
    pub outcome: u8,
    pub winner_count: u64,
    pub payout_per_winner: u64,
    pub total_stake: u64,
}
