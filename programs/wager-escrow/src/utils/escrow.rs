use anchor_lang::prelude::*;
use anchor_spl::token::{self, CloseAccount, Token, TokenAccount, Transfer};

use crate::constants::EVENT_SEED;
use crate::engine::Disbursement;
use crate::error::EscrowError;
use crate::state::EventRecord;

/// One token-program call against the escrow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscrowStep {
    Transfer { amount: u64 },
    Close,
}

/// Resolves a disbursement into the calls that carry it out.
///
/// `token_owner` is the owner of the token account receiving funds and
/// `rent_recipient` the account credited with the escrow's rent on close.
/// Closing first drains whatever balance is left.
pub fn plan(
    disbursement: Disbursement,
    token_owner: &Pubkey,
    rent_recipient: &Pubkey,
    escrow_balance: u64,
) -> Result<Vec<EscrowStep>> {
    match disbursement {
        Disbursement::Transfer { recipient, amount } => {
            require_keys_eq!(*token_owner, recipient, EscrowError::ParticipantMismatch);
            Ok(vec![EscrowStep::Transfer { amount }])
        }
        Disbursement::CloseAccount { recipient } => {
            require_keys_eq!(*token_owner, recipient, EscrowError::ParticipantMismatch);
            require_keys_eq!(*rent_recipient, recipient, EscrowError::NotManager);
            let mut steps = Vec::with_capacity(2);
            if escrow_balance > 0 {
                steps.push(EscrowStep::Transfer {
                    amount: escrow_balance,
                });
            }
            steps.push(EscrowStep::Close);
            Ok(steps)
        }
    }
}

/// Total tokens a plan moves out of escrow.
pub fn amount_released(steps: &[EscrowStep]) -> u64 {
    steps
        .iter()
        .map(|step| match step {
            EscrowStep::Transfer { amount } => *amount,
            EscrowStep::Close => 0,
        })
        .sum()
}

/// Accounts needed to move funds out of an event's escrow. The event PDA signs every CPI.
pub struct EscrowCpi<'a, 'info> {
    pub token_program: &'a Program<'info, Token>,
    pub event: &'a Account<'info, EventRecord>,
    pub escrow: &'a Account<'info, TokenAccount>,
    pub recipient_token_account: &'a Account<'info, TokenAccount>,
    /// Receives the escrow's rent when it is closed.
    pub rent_recipient: AccountInfo<'info>,
}

impl<'a, 'info> EscrowCpi<'a, 'info> {
    /// Carries out `disbursement` and returns the token amount that left escrow.
    pub fn execute(&self, disbursement: Disbursement) -> Result<u64> {
        let steps = plan(
            disbursement,
            &self.recipient_token_account.owner,
            &self.rent_recipient.key(),
            self.escrow.amount,
        )?;
        for step in &steps {
            match *step {
                EscrowStep::Transfer { amount } => self.transfer(amount)?,
                EscrowStep::Close => self.close()?,
            }
        }
        Ok(amount_released(&steps))
    }

    fn transfer(&self, amount: u64) -> Result<()> {
        let event_id = self.event.event_id.to_le_bytes();
        let signer_seeds: &[&[&[u8]]] = &[&[EVENT_SEED, event_id.as_ref(), &[self.event.bump]]];
        token::transfer(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                Transfer {
                    from: self.escrow.to_account_info(),
                    to: self.recipient_token_account.to_account_info(),
                    authority: self.event.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        )
    }

    fn close(&self) -> Result<()> {
        let event_id = self.event.event_id.to_le_bytes();
        let signer_seeds: &[&[&[u8]]] = &[&[EVENT_SEED, event_id.as_ref(), &[self.event.bump]]];
        token::close_account(CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            CloseAccount {
                account: self.escrow.to_account_info(),
                destination: self.rent_recipient.clone(),
                authority: self.event.to_account_info(),
            },
            signer_seeds,
        ))
    }
}
