use anchor_lang::prelude::*;

use crate::constants::*;
use crate::engine;
use crate::state::{EventRecord, ParticipantRecord};

#[derive(Accounts)]
pub struct OptIn<'info> {
    #[account(mut)]
    pub participant: Signer<'info>,

    #[account(seeds = [EVENT_SEED, &event.event_id.to_le_bytes()], bump = event.bump)]
    pub event: Account<'info, EventRecord>,

    // A second opt-in fails here: the record address is already in use.
    #[account(
        init,
        payer = participant,
        space = DISCRIMINATOR_SIZE + ParticipantRecord::LEN,
        seeds = [PARTICIPANT_SEED, event.key().as_ref(), participant.key().as_ref()],
        bump
    )]
    pub participant_record: Account<'info, ParticipantRecord>,

    pub system_program: Program<'info, System>,
}

pub fn opt_in_handler(ctx: Context<OptIn>) -> Result<()> {
    let participant = ctx.accounts.participant.key();
    let event_key = ctx.accounts.event.key();
    engine::opt_in(
        &mut ctx.accounts.participant_record,
        &participant,
        &event_key,
        ctx.bumps.participant_record,
    );

    msg!("{} opted in to event {}", participant, ctx.accounts.event.event_id);
    emit!(ParticipantOptedIn {
        event_id: ctx.accounts.event.event_id,
        participant,
    });
    Ok(())
}

#[event]
pub struct ParticipantOptedIn {
    pub event_id: u64,
    pub participant: Pubkey,
}
