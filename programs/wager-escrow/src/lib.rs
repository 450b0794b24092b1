use anchor_lang::prelude::*;

pub mod constants;
pub mod engine;
pub mod error;
pub mod guards;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;

declare_id!("9BAyAN87VJ8AUxHYPx2ifH2Fm8ACGCrrUodmrSB2iZgf");

#[program]
pub mod wager_escrow {
    use super::*;

    // --- ADMINISTRATION ---

    /// Opens an event and its escrow. `manager` and `oracle` default to the creator.
    pub fn create(
        ctx: Context<Create>,
        event_id: u64,
        manager: Option<Pubkey>,
        oracle: Option<Pubkey>,
        event_start_time: i64,
        event_end_time: i64,
        payout_grace_period: u64,
    ) -> Result<()> {
        create::create_handler(
            ctx,
            event_id,
            manager,
            oracle,
            event_start_time,
            event_end_time,
            payout_grace_period,
        )
    }

    // Oracle-only
    pub fn set_event_result(ctx: Context<SetEventResult>, outcome: u8) -> Result<()> {
        set_event_result::set_event_result_handler(ctx, outcome)
    }

    // Manager-only, once the payout grace period has elapsed
    pub fn delete(ctx: Context<Delete>) -> Result<()> {
        delete::delete_handler(ctx)
    }

    // --- PARTICIPANTS ---

    pub fn opt_in(ctx: Context<OptIn>) -> Result<()> {
        opt_in::opt_in_handler(ctx)
    }

    pub fn bet(ctx: Context<Bet>, outcome: u8, amount: u64) -> Result<()> {
        bet::bet_handler(ctx, outcome, amount)
    }

    pub fn payout(ctx: Context<Payout>) -> Result<()> {
        payout::payout_handler(ctx)
    }
}
