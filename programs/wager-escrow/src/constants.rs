// Seeds
pub const EVENT_SEED: &[u8] = b"event";
pub const ESCROW_SEED: &[u8] = b"escrow";
pub const PARTICIPANT_SEED: &[u8] = b"participant";

pub const DISCRIMINATOR_SIZE: usize = 8;

/// Number of mutually exclusive outcomes an event can settle on.
pub const OUTCOME_COUNT: usize = 3;

/// Bets are denominated in a 6-decimal token, so a milli-unit is 1_000 base units.
pub const BET_MINT_DECIMALS: u8 = 6;
pub const MILLI_UNIT: u64 = 1_000;

/// 140 milli-units.
pub const DEFAULT_FIXED_BET_AMOUNT: u64 = 140 * MILLI_UNIT;

/// Flat fee withheld from every payout. It stays in escrow until the manager deletes the event.
pub const MINIMUM_NETWORK_FEE: u64 = MILLI_UNIT;
