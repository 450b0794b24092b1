use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::engine::{self, EventSetup};
use crate::error::EscrowError;
use crate::state::EventRecord;

#[derive(Accounts)]
#[instruction(event_id: u64)]
pub struct Create<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        init,
        payer = creator,
        space = DISCRIMINATOR_SIZE + EventRecord::LEN,
        seeds = [EVENT_SEED, &event_id.to_le_bytes()],
        bump
    )]
    pub event: Account<'info, EventRecord>,

    #[account(
        init,
        payer = creator,
        seeds = [EVENT_SEED, &event_id.to_le_bytes(), ESCROW_SEED],
        bump,
        token::mint = mint,
        token::authority = event
    )]
    pub escrow: Account<'info, TokenAccount>,

    #[account(constraint = mint.decimals == BET_MINT_DECIMALS @ EscrowError::InvalidBetMint)]
    pub mint: Account<'info, Mint>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn create_handler(
    ctx: Context<Create>,
    event_id: u64,
    manager: Option<Pubkey>,
    oracle: Option<Pubkey>,
    event_start_time: i64,
    event_end_time: i64,
    payout_grace_period: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let creator = ctx.accounts.creator.key();
    let setup = EventSetup {
        event_id,
        manager,
        oracle,
        mint: ctx.accounts.mint.key(),
        escrow: ctx.accounts.escrow.key(),
        event_start_time,
        event_end_time,
        payout_grace_period,
        bump: ctx.bumps.event,
        escrow_bump: ctx.bumps.escrow,
    };

    let event = &mut ctx.accounts.event;
    engine::create(event, &creator, setup, now)?;

    msg!(
        "event {} created: bets close at {}, result after {}",
        event_id,
        event.event_start_time,
        event.event_end_time
    );
    emit!(EventCreated {
        event_id,
        manager: event.manager,
        oracle: event.oracle,
        escrow: event.escrow,
        event_start_time: event.event_start_time,
        event_end_time: event.event_end_time,
        payout_grace_period: event.payout_grace_period,
        fixed_bet_amount: event.fixed_bet_amount,
    });

    Ok(())
}

#[event]
pub struct EventCreated {
    pub event_id: u64,
    pub manager: Pubkey,
    pub oracle: Pubkey,
    pub escrow: Pubkey,
    pub event_start_time: i64,
    pub event_end_time: i64,
    pub payout_grace_period: u64,
    pub fixed_bet_amount: u64,
}
