use std::collections::HashMap;

use anchor_lang::error::Error;
use anchor_lang::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wager_escrow::constants::{DEFAULT_FIXED_BET_AMOUNT, MINIMUM_NETWORK_FEE};
use wager_escrow::engine::{self, Deposit, Disbursement, EventSetup};
use wager_escrow::error::{ErrorKind, EscrowError};
use wager_escrow::state::{EventRecord, Outcome, ParticipantRecord};
use wager_escrow::utils::escrow::{self, EscrowStep};

const NOW: i64 = 1_700_000_000;
const START: i64 = NOW + 300;
const END: i64 = NOW + 900;
const GRACE: u64 = 900;
const BET: u64 = DEFAULT_FIXED_BET_AMOUNT;

/// Token balances plus the two records, with every call applied all-or-nothing.
struct Ledger {
    manager: Pubkey,
    oracle: Pubkey,
    escrow: Pubkey,
    event: EventRecord,
    participants: HashMap<Pubkey, ParticipantRecord>,
    balances: HashMap<Pubkey, u64>,
    closed: bool,
}

impl Ledger {
    fn new() -> Self {
        let manager = Pubkey::new_unique();
        let oracle = Pubkey::new_unique();
        let escrow = Pubkey::new_unique();
        let mut event = EventRecord::default();
        engine::create(
            &mut event,
            &manager,
            EventSetup {
                event_id: 1,
                manager: None,
                oracle: Some(oracle),
                mint: Pubkey::new_unique(),
                escrow,
                event_start_time: START,
                event_end_time: END,
                payout_grace_period: GRACE,
                bump: 255,
                escrow_bump: 254,
            },
            NOW,
        )
        .unwrap();

        Ledger {
            manager,
            oracle,
            escrow,
            event,
            participants: HashMap::new(),
            balances: HashMap::from([(escrow, 0)]),
            closed: false,
        }
    }

    fn balance(&self, account: &Pubkey) -> u64 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    fn escrow_balance(&self) -> u64 {
        self.balance(&self.escrow)
    }

    fn opt_in(&mut self) -> Pubkey {
        let account = Pubkey::new_unique();
        let mut record = ParticipantRecord::default();
        engine::opt_in(&mut record, &account, &Pubkey::new_unique(), 255);
        self.participants.insert(account, record);
        self.balances.insert(account, 10 * BET);
        account
    }

    fn bet(&mut self, account: &Pubkey, outcome: u8, now: i64) -> Result<()> {
        let mut event = self.event.clone();
        let mut record = self.participants[account].clone();
        let deposit = Deposit {
            destination: self.escrow,
            amount: BET,
        };
        engine::place_bet(&mut event, &mut record, account, &deposit, outcome, now)?;

        self.event = event;
        self.participants.insert(*account, record);
        *self.balances.get_mut(account).unwrap() -= BET;
        *self.balances.get_mut(&self.escrow).unwrap() += BET;
        Ok(())
    }

    fn set_result(&mut self, outcome: u8, now: i64) -> Result<()> {
        let mut event = self.event.clone();
        let oracle = self.oracle;
        engine::set_event_result(&mut event, &oracle, outcome, now)?;
        self.event = event;
        Ok(())
    }

    fn payout(&mut self, account: &Pubkey) -> Result<u64> {
        let mut event = self.event.clone();
        let mut record = self.participants[account].clone();
        let disbursement = engine::claim_payout(&mut event, &mut record, account)?;
        let amount = self.apply(disbursement, account, account)?;

        self.event = event;
        self.participants.insert(*account, record);
        Ok(amount)
    }

    fn delete(&mut self, caller: &Pubkey, now: i64) -> Result<u64> {
        let disbursement = engine::authorize_deletion(&self.event, caller, now)?;
        self.apply(disbursement, caller, caller)
    }

    /// Runs the same escrow plan the program executes, crediting `token_owner`.
    fn apply(
        &mut self,
        disbursement: Disbursement,
        token_owner: &Pubkey,
        rent_recipient: &Pubkey,
    ) -> Result<u64> {
        let steps = escrow::plan(
            disbursement,
            token_owner,
            rent_recipient,
            self.escrow_balance(),
        )?;
        for step in &steps {
            match *step {
                EscrowStep::Transfer { amount } => {
                    let escrow = self.balances.get_mut(&self.escrow).unwrap();
                    *escrow = escrow.checked_sub(amount).expect("escrow overdrawn");
                    *self.balances.entry(*token_owner).or_default() += amount;
                }
                EscrowStep::Close => self.closed = true,
            }
        }
        Ok(escrow::amount_released(&steps))
    }
}

fn rejection<T: std::fmt::Debug>(result: Result<T>) -> u32 {
    match result {
        Err(Error::AnchorError(e)) => e.error_code_number,
        other => panic!("expected an escrow rejection, got {other:?}"),
    }
}

fn assert_rejected<T: std::fmt::Debug>(result: Result<T>, expected: EscrowError, kind: ErrorKind) {
    assert_eq!(expected.kind(), kind);
    assert_eq!(rejection(result), u32::from(expected));
}

#[test]
fn two_winners_split_the_pool() {
    let mut ledger = Ledger::new();
    let alice = ledger.opt_in();
    let bob = ledger.opt_in();
    let carol = ledger.opt_in();

    ledger.bet(&alice, 0, NOW).unwrap();
    ledger.bet(&bob, 0, NOW + 10).unwrap();
    ledger.bet(&carol, 1, START - 1).unwrap();
    assert_eq!(ledger.event.outcome_counter, [2, 1, 0]);
    assert_eq!(ledger.event.total_stake, 420_000);
    assert_eq!(ledger.escrow_balance(), 420_000);

    ledger.set_result(0, END).unwrap();
    assert_eq!(ledger.event.winner_count(), Some(2));
    assert_eq!(ledger.event.payout_per_winner(), Some(209_000));

    assert_eq!(ledger.payout(&alice).unwrap(), 209_000);
    assert_eq!(ledger.payout(&bob).unwrap(), 209_000);
    assert_eq!(ledger.balance(&alice), 10 * BET - BET + 209_000);
    assert_rejected(ledger.payout(&carol), EscrowError::NotAWinner, ErrorKind::State);
    assert_rejected(
        ledger.payout(&alice),
        EscrowError::PayoutAlreadyClaimed,
        ErrorKind::State,
    );

    // Each paid winner leaves one fee behind.
    assert_eq!(ledger.escrow_balance(), 2 * MINIMUM_NETWORK_FEE);
    let manager = ledger.manager;
    assert_eq!(
        ledger.delete(&manager, END + GRACE as i64).unwrap(),
        2 * MINIMUM_NETWORK_FEE
    );
    assert_eq!(ledger.escrow_balance(), 0);
    assert!(ledger.closed);
}

#[test]
fn nobody_backed_the_result() {
    let mut ledger = Ledger::new();
    let alice = ledger.opt_in();
    let bob = ledger.opt_in();
    ledger.bet(&alice, 0, NOW).unwrap();
    ledger.bet(&bob, 1, NOW).unwrap();

    ledger.set_result(2, END + 5).unwrap();
    assert_eq!(ledger.event.winner_count(), Some(0));
    assert_eq!(
        ledger.event.payout_per_winner(),
        Some(2 * BET - MINIMUM_NETWORK_FEE)
    );

    for account in [alice, bob] {
        assert_rejected(ledger.payout(&account), EscrowError::NotAWinner, ErrorKind::State);
    }
    assert_eq!(ledger.escrow_balance(), 2 * BET);

    let manager = ledger.manager;
    assert_eq!(ledger.delete(&manager, END + GRACE as i64 + 60).unwrap(), 2 * BET);
    assert_eq!(ledger.balance(&manager), 2 * BET);
}

#[test]
fn late_bet_is_a_timing_error() {
    let mut ledger = Ledger::new();
    let alice = ledger.opt_in();
    for now in [START, START + 1, END, END + GRACE as i64] {
        assert_rejected(
            ledger.bet(&alice, 0, now),
            EscrowError::BettingClosed,
            ErrorKind::Timing,
        );
    }
    assert!(!ledger.participants[&alice].has_bet());
    assert_eq!(ledger.escrow_balance(), 0);
}

#[test]
fn second_bet_is_a_state_error() {
    let mut ledger = Ledger::new();
    let alice = ledger.opt_in();
    ledger.bet(&alice, 2, NOW).unwrap();
    for outcome in 0..3 {
        assert_rejected(
            ledger.bet(&alice, outcome, NOW + 1),
            EscrowError::BetAlreadyPlaced,
            ErrorKind::State,
        );
    }
    assert_eq!(ledger.escrow_balance(), BET);
    assert_eq!(ledger.participants[&alice].chosen_outcome(), Some(Outcome::Third));
}

#[test]
fn second_bet_checks_window_and_amount_first() {
    let mut ledger = Ledger::new();
    let alice = ledger.opt_in();
    ledger.bet(&alice, 0, NOW).unwrap();

    let mut event = ledger.event.clone();
    let mut record = ledger.participants[&alice].clone();
    let oversized = Deposit {
        destination: ledger.escrow,
        amount: BET + 1,
    };
    assert_rejected(
        engine::place_bet(&mut event, &mut record, &alice, &oversized, 0, NOW + 1),
        EscrowError::WrongBetAmount,
        ErrorKind::Validation,
    );
    assert_rejected(
        ledger.bet(&alice, 0, START),
        EscrowError::BettingClosed,
        ErrorKind::Timing,
    );
    assert_eq!(ledger.event.total_stake, BET);
}

#[test]
fn deleting_an_untouched_event_only_closes_the_escrow() {
    let mut ledger = Ledger::new();
    let manager = ledger.manager;
    assert_eq!(ledger.delete(&manager, END + GRACE as i64).unwrap(), 0);
    assert!(ledger.closed);
    assert_eq!(ledger.balance(&manager), 0);
}

#[test]
fn early_deletion_is_a_timing_error() {
    let mut ledger = Ledger::new();
    let alice = ledger.opt_in();
    ledger.bet(&alice, 0, NOW).unwrap();
    ledger.set_result(0, END).unwrap();

    let manager = ledger.manager;
    assert_rejected(
        ledger.delete(&manager, START),
        EscrowError::EventNotEnded,
        ErrorKind::Timing,
    );
    assert_rejected(
        ledger.delete(&manager, END + GRACE as i64 - 1),
        EscrowError::GracePeriodNotElapsed,
        ErrorKind::Timing,
    );
    let oracle = ledger.oracle;
    assert_rejected(
        ledger.delete(&oracle, END + GRACE as i64),
        EscrowError::NotManager,
        ErrorKind::Authorization,
    );
    assert!(!ledger.closed);

    // The winner can still claim throughout the grace period.
    assert_eq!(ledger.payout(&alice).unwrap(), BET - MINIMUM_NETWORK_FEE);
}

#[test]
fn result_is_oracle_only_and_write_once() {
    let mut ledger = Ledger::new();
    let alice = ledger.opt_in();
    ledger.bet(&alice, 1, NOW).unwrap();

    let manager = ledger.manager;
    let mut event = ledger.event.clone();
    assert_rejected(
        engine::set_event_result(&mut event, &manager, 1, END),
        EscrowError::NotOracle,
        ErrorKind::Authorization,
    );
    assert_rejected(
        ledger.set_result(1, END - 1),
        EscrowError::EventNotEnded,
        ErrorKind::Timing,
    );
    assert_rejected(
        ledger.set_result(7, END),
        EscrowError::InvalidOutcome,
        ErrorKind::Validation,
    );

    ledger.set_result(1, END).unwrap();
    assert_rejected(
        ledger.set_result(0, END + 1),
        EscrowError::ResultAlreadySet,
        ErrorKind::State,
    );
    assert_eq!(ledger.event.winning_outcome(), Some(Outcome::Second));
}

#[test]
fn counters_and_payouts_stay_consistent() {
    let mut ledger = Ledger::new();
    let mut rng = StdRng::seed_from_u64(0x2545_f491);
    let mut accounts = Vec::new();

    for _ in 0..50 {
        let account = ledger.opt_in();
        ledger.bet(&account, rng.gen_range(0..3), NOW).unwrap();
        accounts.push(account);

        assert!(ledger.event.stake_matches_counters());
        assert_eq!(
            ledger.event.bets_placed(),
            ledger.event.total_stake / ledger.event.fixed_bet_amount
        );
        assert_eq!(ledger.escrow_balance(), ledger.event.total_stake);
    }

    ledger.set_result(1, END).unwrap();
    let winners = ledger.event.winner_count().unwrap();
    let mut paid = 0;
    for account in &accounts {
        if let Ok(amount) = ledger.payout(account) {
            paid += amount;
        }
    }

    assert_eq!(ledger.event.payouts_claimed, winners);
    assert!(paid <= ledger.event.total_stake);
    assert_eq!(ledger.escrow_balance(), ledger.event.total_stake - paid);
}
