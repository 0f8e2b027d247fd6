use std::sync::Arc;

use proptest::prelude::*;

use tally_governance::{GovernanceEngine, GovernanceError};
use tally_nullables::{NullAccessGate, NullLedger};
use tally_types::params::DAY_SECS;
use tally_types::{AccountId, Timestamp, TokenAmount};

type Engine = GovernanceEngine<Arc<NullLedger>, NullAccessGate>;

const WINDOW: u64 = 7 * DAY_SECS;

fn voter(i: usize) -> AccountId {
    AccountId::new(format!("voter_{i}")).unwrap()
}

fn proposer() -> AccountId {
    AccountId::new("proposer").unwrap()
}

fn admin() -> AccountId {
    AccountId::new("admin").unwrap()
}

/// An engine with one proposal opened at `start`, and its ledger.
fn engine_with_proposal(supply: u128, start: u64) -> (Engine, Arc<NullLedger>) {
    let ledger = Arc::new(NullLedger::new());
    ledger.pin_total_supply(supply);
    ledger.set_balance(&proposer(), 1_000);
    let mut engine =
        GovernanceEngine::new(Arc::clone(&ledger), NullAccessGate::with_admin(&admin()));
    let id = engine
        .create_proposal(&proposer(), "Title", "Body", Timestamp::new(start))
        .unwrap();
    assert_eq!(id, 0);
    (engine, ledger)
}

proptest! {
    /// Tallies never decrease and always equal the sum of recorded weights
    /// per side; failed votes change nothing.
    #[test]
    fn tallies_match_receipts_and_never_decrease(
        ops in prop::collection::vec(
            (0usize..6, any::<bool>(), 0u128..1_000_000, 0u64..(WINDOW + DAY_SECS)),
            1..40,
        ),
    ) {
        let (mut engine, ledger) = engine_with_proposal(10_000_000, 0);
        let mut last_for = TokenAmount::ZERO;
        let mut last_against = TokenAmount::ZERO;

        for (who, support, balance, at) in ops {
            ledger.set_balance(&voter(who), balance);
            let before = engine.get_proposal(0).unwrap();
            let result = engine.vote(&voter(who), 0, support, Timestamp::new(at));
            let after = engine.get_proposal(0).unwrap();

            if result.is_err() {
                prop_assert_eq!(&before, &after);
            }
            prop_assert!(after.for_votes >= last_for);
            prop_assert!(after.against_votes >= last_against);
            last_for = after.for_votes;
            last_against = after.against_votes;

            let receipts = engine.votes(0).unwrap();
            let sum_for: u128 = receipts.iter().filter(|r| r.support).map(|r| r.weight.raw()).sum();
            let sum_against: u128 = receipts.iter().filter(|r| !r.support).map(|r| r.weight.raw()).sum();
            prop_assert_eq!(after.for_votes.raw(), sum_for);
            prop_assert_eq!(after.against_votes.raw(), sum_against);
        }
    }

    /// A second vote by the same account always fails with AlreadyVoted.
    #[test]
    fn second_vote_always_already_voted(
        first in 1u128..1_000_000,
        second in 0u128..1_000_000,
        s1 in any::<bool>(),
        s2 in any::<bool>(),
        t1 in 0u64..=WINDOW,
        t2 in 0u64..=WINDOW,
    ) {
        let (mut engine, ledger) = engine_with_proposal(10_000_000, 0);
        ledger.set_balance(&voter(0), first);
        engine.vote(&voter(0), 0, s1, Timestamp::new(t1)).unwrap();
        ledger.set_balance(&voter(0), second);
        let err = engine.vote(&voter(0), 0, s2, Timestamp::new(t2)).unwrap_err();
        let already = matches!(err, GovernanceError::AlreadyVoted(_));
        prop_assert!(already, "expected AlreadyVoted, got {:?}", err);
        prop_assert!(engine.get_vote_choice(0, &voter(0)).unwrap() == s1);
    }

    /// Votes are accepted exactly inside [start, end].
    #[test]
    fn vote_window_enforced(start in 0u64..1_000_000, offset in 0u64..(3 * WINDOW)) {
        let (mut engine, ledger) = engine_with_proposal(10_000_000, start);
        ledger.set_balance(&voter(0), 5);
        // Cover times before the start as well as after it.
        let at = (start + offset).saturating_sub(WINDOW);
        let result = engine.vote(&voter(0), 0, true, Timestamp::new(at));
        if at < start {
            let not_started = matches!(result, Err(GovernanceError::VotingNotStarted { .. }));
            prop_assert!(not_started, "expected VotingNotStarted, got {:?}", result);
        } else if at > start + WINDOW {
            let ended = matches!(result, Err(GovernanceError::VotingEnded { .. }));
            prop_assert!(ended, "expected VotingEnded, got {:?}", result);
        } else {
            prop_assert!(result.is_ok());
        }
    }

    /// Execution succeeds at most once, whatever the votes and timing.
    #[test]
    fn execution_at_most_once(
        votes in prop::collection::vec((any::<bool>(), 1u128..500_000), 0..8),
        attempts in prop::collection::vec(0u64..(3 * WINDOW), 1..10),
    ) {
        let (mut engine, ledger) = engine_with_proposal(1_000_000, 0);
        for (i, (support, balance)) in votes.into_iter().enumerate() {
            ledger.set_balance(&voter(i), balance);
            engine.vote(&voter(i), 0, support, Timestamp::new(1)).unwrap();
        }
        let mut successes = 0;
        for at in attempts {
            let already = engine.get_proposal(0).unwrap().executed;
            match engine.execute_proposal(0, Timestamp::new(at)) {
                Ok(()) => successes += 1,
                Err(GovernanceError::AlreadyExecuted(_)) => {
                    prop_assert!(already);
                }
                Err(_) => {}
            }
        }
        prop_assert!(successes <= 1);
        prop_assert_eq!(engine.get_proposal(0).unwrap().executed, successes == 1);
    }

    /// Execution outcome follows floor(supply * pct / 100) and strict majority.
    #[test]
    fn quorum_arithmetic(
        supply in 1u128..10_000_000_000,
        pct in 1u8..=100,
        for_weight in 0u128..5_000_000_000,
        against_weight in 0u128..5_000_000_000,
    ) {
        let (mut engine, ledger) = engine_with_proposal(supply, 0);
        engine.update_quorum_threshold(&admin(), pct).unwrap();
        if for_weight > 0 {
            ledger.set_balance(&voter(0), for_weight);
            engine.vote(&voter(0), 0, true, Timestamp::new(1)).unwrap();
        }
        if against_weight > 0 {
            ledger.set_balance(&voter(1), against_weight);
            engine.vote(&voter(1), 0, false, Timestamp::new(1)).unwrap();
        }

        let required = supply * pct as u128 / 100;
        let total = for_weight + against_weight;
        let passed = engine.proposal_passed(0).unwrap();
        prop_assert_eq!(passed, total >= required && for_weight > against_weight);
        // Pure: asking again gives the same answer.
        prop_assert_eq!(engine.proposal_passed(0).unwrap(), passed);
        prop_assert_eq!(engine.proposal_passed(0).unwrap(), passed);

        let result = engine.execute_proposal(0, Timestamp::new(WINDOW + 1));
        if total < required {
            let short = matches!(result, Err(GovernanceError::QuorumNotReached { .. }));
            prop_assert!(short, "expected QuorumNotReached, got {:?}", result);
        } else if for_weight <= against_weight {
            let rejected = matches!(result, Err(GovernanceError::ProposalRejected { .. }));
            prop_assert!(rejected, "expected ProposalRejected, got {:?}", result);
        } else {
            prop_assert!(result.is_ok());
        }
    }
}
