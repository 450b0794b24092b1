use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::engine::{self, Deposit};
use crate::state::{EventRecord, ParticipantRecord};

#[derive(Accounts)]
pub struct Bet<'info> {
    pub participant: Signer<'info>,

    #[account(mut, seeds = [EVENT_SEED, &event.event_id.to_le_bytes()], bump = event.bump)]
    pub event: Account<'info, EventRecord>,

    #[account(
        mut,
        seeds = [PARTICIPANT_SEED, event.key().as_ref(), participant.key().as_ref()],
        bump = participant_record.bump
    )]
    pub participant_record: Account<'info, ParticipantRecord>,

    #[account(mut, token::mint = event.mint, token::authority = participant)]
    pub participant_token_account: Account<'info, TokenAccount>,

    /// Deposit destination, validated against the event's escrow before any funds move.
    #[account(mut)]
    pub escrow: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn bet_handler(ctx: Context<Bet>, outcome: u8, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let participant = ctx.accounts.participant.key();
    let deposit = Deposit {
        destination: ctx.accounts.escrow.key(),
        amount,
    };

    let outcome = engine::place_bet(
        &mut ctx.accounts.event,
        &mut ctx.accounts.participant_record,
        &participant,
        &deposit,
        outcome,
        now,
    )?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.participant_token_account.to_account_info(),
                to: ctx.accounts.escrow.to_account_info(),
                authority: ctx.accounts.participant.to_account_info(),
            },
        ),
        deposit.amount,
    )?;

    let event = &ctx.accounts.event;
    msg!(
        "{} bet {} on outcome {:?}; stake now {}",
        participant,
        deposit.amount,
        outcome,
        event.total_stake
    );
    emit!(BetPlaced {
        event_id: event.event_id,
        participant,
        outcome: outcome.into(),
        outcome_counter: event.outcome_counter,
        total_stake: event.total_stake,
    });
    Ok(())
}

#[event]
pub struct BetPlaced {
    pub event_id: u64,
    pub participant: Pubkey,
    pub outcome: u8,
    pub outcome_counter: [u64; OUTCOME_COUNT],
    pub total_stake: u64,
}
