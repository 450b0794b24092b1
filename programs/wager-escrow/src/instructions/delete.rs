use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::engine;
use crate::state::EventRecord;
use crate::utils::escrow::EscrowCpi;

#[derive(Accounts)]
pub struct Delete<'info> {
    #[account(mut)]
    pub manager: Signer<'info>,

    #[account(
        mut,
        seeds = [EVENT_SEED, &event.event_id.to_le_bytes()],
        bump = event.bump,
        close = manager
    )]
    pub event: Account<'info, EventRecord>,

    #[account(
        mut,
        seeds = [EVENT_SEED, &event.event_id.to_le_bytes(), ESCROW_SEED],
        bump = event.escrow_bump,
        token::authority = event
    )]
    pub escrow: Account<'info, TokenAccount>,

    #[account(mut, token::mint = event.mint)]
    pub manager_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn delete_handler(ctx: Context<Delete>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let manager = ctx.accounts.manager.key();
    let accounts = &ctx.accounts;

    let disbursement = engine::authorize_deletion(&accounts.event, &manager, now)?;
    let reclaimed = EscrowCpi {
        token_program: &accounts.token_program,
        event: &accounts.event,
        escrow: &accounts.escrow,
        recipient_token_account: &accounts.manager_token_account,
        rent_recipient: accounts.manager.to_account_info(),
    }
    .execute(disbursement)?;

    msg!(
        "event {} deleted; {} returned to manager {}",
        accounts.event.event_id,
        reclaimed,
        manager
    );
    emit!(EventDeleted {
        event_id: accounts.event.event_id,
        manager,
        reclaimed,
        payouts_claimed: accounts.event.payouts_claimed,
    });
    Ok(())
}

#[event]
pub struct EventDeleted {
    pub event_id: u64,
    pub manager: Pubkey,
    pub reclaimed: u64,
    pub payouts_claimed: u64,
}
