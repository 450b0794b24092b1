use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::engine;
use crate::state::{EventRecord, ParticipantRecord};
use crate::utils::escrow::EscrowCpi;

#[derive(Accounts)]
pub struct Payout<'info> {
    pub participant: Signer<'info>,

    #[account(mut, seeds = [EVENT_SEED, &event.event_id.to_le_bytes()], bump = event.bump)]
    pub event: Account<'info, EventRecord>,

    #[account(
        mut,
        seeds = [PARTICIPANT_SEED, event.key().as_ref(), participant.key().as_ref()],
        bump = participant_record.bump
    )]
    pub participant_record: Account<'info, ParticipantRecord>,

    #[account(
        mut,
        seeds = [EVENT_SEED, &event.event_id.to_le_bytes(), ESCROW_SEED],
        bump = event.escrow_bump,
        token::authority = event
    )]
    pub escrow: Account<'info, TokenAccount>,

    #[account(mut, token::mint = event.mint)]
    pub participant_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn payout_handler(ctx: Context<Payout>) -> Result<()> {
    let participant = ctx.accounts.participant.key();

    // The position flips to paid before the transfer is issued; both commit or neither does.
    let disbursement = engine::claim_payout(
        &mut ctx.accounts.event,
        &mut ctx.accounts.participant_record,
        &participant,
    )?;

    let accounts = &ctx.accounts;
    let amount = EscrowCpi {
        token_program: &accounts.token_program,
        event: &accounts.event,
        escrow: &accounts.escrow,
        recipient_token_account: &accounts.participant_token_account,
        rent_recipient: accounts.participant.to_account_info(),
    }
    .execute(disbursement)?;

    msg!(
        "paid {} to {} ({} of {} winners claimed)",
        amount,
        participant,
        accounts.event.payouts_claimed,
        accounts.event.winner_count().unwrap_or_default()
    );
    emit!(PayoutClaimed {
        event_id: accounts.event.event_id,
        participant,
        amount,
        payouts_claimed: accounts.event.payouts_claimed,
    });
    Ok(())
}

#[event]
pub struct PayoutClaimed {
    pub event_id: u64,
    pub participant: Pubkey,
    pub amount: u64,
    pub payouts_claimed: u64,
}
