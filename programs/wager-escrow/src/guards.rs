//! Authorization and timing predicates shared by every engine operation.

use anchor_lang::prelude::*;
use solana_program::clock::UnixTimestamp;

use crate::error::EscrowError;

/// Rejects unless `caller` holds the role stored as `authorized`.
pub fn only(caller: &Pubkey, authorized: &Pubkey, err: EscrowError) -> Result<()> {
    require_keys_eq!(*caller, *authorized, err);
    Ok(())
}

/// Passes while `now` is strictly earlier than `deadline`.
pub fn before(now: UnixTimestamp, deadline: UnixTimestamp, err: EscrowError) -> Result<()> {
    if now >= deadline {
        return Err(error!(err));
    }
    Ok(())
}

/// Passes once `now` has reached `instant`.
pub fn not_before(now: UnixTimestamp, instant: UnixTimestamp, err: EscrowError) -> Result<()> {
    if now < instant {
        return Err(error!(err));
    }
    Ok(())
}
