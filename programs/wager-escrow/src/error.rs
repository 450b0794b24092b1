use anchor_lang::prelude::*;

#[error_code]
pub enum EscrowError {
    #[msg("Only the oracle may set the event result")]
    NotOracle,
    #[msg("Only the manager may delete the event")]
    NotManager,
    #[msg("Participant record belongs to another account")]
    ParticipantMismatch,
    #[msg("Event end time must be in the future")]
    EventEndInThePast,
    #[msg("Event has already started")]
    BettingClosed,
    #[msg("Event expiry time not reached, yet")]
    EventNotEnded,
    #[msg("Payout time not expired, yet")]
    GracePeriodNotElapsed,
    #[msg("Event end must occur after the event start")]
    InvalidEventWindow,
    #[msg("Valid options are: 0, 1, 2")]
    InvalidOutcome,
    #[msg("Bet amount is wrong")]
    WrongBetAmount,
    #[msg("Receiver must be the event escrow account")]
    WrongDepositDestination,
    #[msg("Bet token must have 6 decimals")]
    InvalidBetMint,
    #[msg("User has already placed a bet")]
    BetAlreadyPlaced,
    #[msg("Event result has already been set")]
    ResultAlreadySet,
    #[msg("Event result has not been set, yet")]
    ResultNotSet,
    #[msg("You did not choose the winning option")]
    NotAWinner,
    #[msg("You already requested your payout")]
    PayoutAlreadyClaimed,
    #[msg("Stake is smaller than the network fee")]
    PayoutUnderflow,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}

/// Coarse classification of every rejection reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong caller role.
    Authorization,
    /// Operation attempted outside its time window.
    Timing,
    /// A one-shot flag or the write-once result is in the wrong state.
    State,
    /// Malformed input or attachment.
    Validation,
    Arithmetic,
}

impl EscrowError {
    pub fn kind(&self) -> ErrorKind {
        use EscrowError::*;
        match self {
            NotOracle | NotManager | ParticipantMismatch => ErrorKind::Authorization,
            EventEndInThePast | BettingClosed | EventNotEnded | GracePeriodNotElapsed => {
                ErrorKind::Timing
            }
            BetAlreadyPlaced | ResultAlreadySet | ResultNotSet | NotAWinner
            | PayoutAlreadyClaimed => ErrorKind::State,
            InvalidEventWindow | InvalidOutcome | WrongBetAmount | WrongDepositDestination
            | InvalidBetMint => ErrorKind::Validation,
            PayoutUnderflow | ArithmeticOverflow => ErrorKind::Arithmetic,
        }
    }
}
