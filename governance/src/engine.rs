//! Core governance engine: proposal creation, voting, tallying, execution.
//!
//! Every operation validates all of its preconditions before touching state,
//! so a failed call leaves tallies, receipts and flags exactly as they were.
//! Notifications are emitted only after the state change they describe.

use serde::{Deserialize, Serialize};
use tally_types::{AccountId, ProposalId, Timestamp, TokenAmount};

use crate::config::GovernanceConfig;
use crate::error::GovernanceError;
use crate::event::{EventBus, GovernanceEvent};
use crate::oracle::{AccessGate, BalanceOracle, Mintable};
use crate::params::{authorize, GovernanceParams, ParameterRegistry};
use crate::proposal::{ProposalState, ProposalSummary, Tally, VoteReceipt};
use crate::snapshot::GovernanceState;
use crate::store::ProposalStore;

/// Parameter block plus the number of proposals created so far.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceOverview {
    pub voting_duration_secs: u64,
    pub proposal_threshold: TokenAmount,
    pub quorum_percent: u8,
    pub proposal_count: u64,
}

/// The governance engine.
///
/// Holds the proposal store and the parameter registry, and consults the
/// balance oracle `B` for voting weight and the access gate `G` for
/// administrative calls. The host serializes calls; the engine needs no
/// locking of its own.
pub struct GovernanceEngine<B, G> {
    store: ProposalStore,
    registry: ParameterRegistry,
    oracle: B,
    gate: G,
    events: EventBus,
}

impl<B: BalanceOracle, G: AccessGate> GovernanceEngine<B, G> {
    /// Create an engine with default parameters and no proposals.
    pub fn new(oracle: B, gate: G) -> Self {
        Self {
            store: ProposalStore::new(),
            registry: ParameterRegistry::new(),
            oracle,
            gate,
            events: EventBus::new(),
        }
    }

    /// Create an engine with explicit starting parameters.
    pub fn with_params(
        params: GovernanceParams,
        oracle: B,
        gate: G,
    ) -> Result<Self, GovernanceError> {
        Ok(Self {
            registry: ParameterRegistry::with_params(params)?,
            ..Self::new(oracle, gate)
        })
    }

    /// Create an engine with starting parameters taken from a config file.
    pub fn with_config(
        config: &GovernanceConfig,
        oracle: B,
        gate: G,
    ) -> Result<Self, GovernanceError> {
        Self::with_params(config.governance_params(), oracle, gate)
    }

    /// Rebuild an engine from a persisted [`GovernanceState`].
    pub fn restore(state: GovernanceState, oracle: B, gate: G) -> Result<Self, GovernanceError> {
        let registry = ParameterRegistry::with_params(state.params)?;
        let store = ProposalStore::from_records(state.proposals)?;
        tracing::info!(proposals = store.count(), "governance state restored");
        Ok(Self {
            store,
            registry,
            oracle,
            gate,
            events: EventBus::new(),
        })
    }

    /// Capture parameters and every proposal record for the host to persist.
    pub fn snapshot(&self) -> GovernanceState {
        GovernanceState {
            params: self.registry.params().clone(),
            proposals: self.store.records().to_vec(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&GovernanceEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    pub fn oracle(&self) -> &B {
        &self.oracle
    }

    pub fn gate(&self) -> &G {
        &self.gate
    }

    pub fn store(&self) -> &ProposalStore {
        &self.store
    }

    pub fn registry(&self) -> &ParameterRegistry {
        &self.registry
    }

    // ── Proposals ──────────────────────────────────────────────────────

    /// Open a new proposal whose voting window runs from `now` for the
    /// current voting duration.
    pub fn create_proposal(
        &mut self,
        caller: &AccountId,
        title: impl Into<String>,
        description: impl Into<String>,
        now: Timestamp,
    ) -> Result<ProposalId, GovernanceError> {
        let title = title.into();
        let description = description.into();
        let end_time = self
            .check_create(caller, &title, &description, now)
            .inspect_err(|e| {
                tracing::debug!(proposer = %caller, error = %e, "proposal creation rejected")
            })?;

        let id = self
            .store
            .allocate(caller.clone(), title.clone(), description, now, end_time);
        tracing::info!(
            proposal = id,
            proposer = %caller,
            start = %now,
            end = %end_time,
            "proposal created"
        );
        self.events.emit(&GovernanceEvent::ProposalCreated {
            id,
            proposer: caller.clone(),
            title,
            start_time: now,
            end_time,
        });
        Ok(id)
    }

    fn check_create(
        &self,
        caller: &AccountId,
        title: &str,
        description: &str,
        now: Timestamp,
    ) -> Result<Timestamp, GovernanceError> {
        let balance = self.oracle.balance_of(caller);
        let threshold = self.registry.proposal_threshold();
        if balance < threshold {
            return Err(GovernanceError::InsufficientBalance {
                have: balance,
                need: threshold,
            });
        }
        if title.is_empty() {
            return Err(GovernanceError::EmptyTitle);
        }
        if description.is_empty() {
            return Err(GovernanceError::EmptyDescription);
        }
        now.checked_add_secs(self.registry.voting_duration_secs())
            .ok_or(GovernanceError::Overflow)
    }

    /// Cast `caller`'s vote, weighted by their balance right now.
    ///
    /// Returns the weight that was recorded. Votes cannot be changed or
    /// withdrawn.
    pub fn vote(
        &mut self,
        caller: &AccountId,
        id: ProposalId,
        support: bool,
        now: Timestamp,
    ) -> Result<TokenAmount, GovernanceError> {
        let weight = self.check_vote(caller, id, now).inspect_err(|e| {
            tracing::debug!(proposal = id, voter = %caller, error = %e, "vote rejected")
        })?;

        self.store.get_mut(id)?.record_vote(caller, support, weight)?;
        tracing::info!(proposal = id, voter = %caller, support, weight = %weight, "vote cast");
        self.events.emit(&GovernanceEvent::VoteCast {
            id,
            voter: caller.clone(),
            support,
            weight,
        });
        Ok(weight)
    }

    fn check_vote(
        &self,
        caller: &AccountId,
        id: ProposalId,
        now: Timestamp,
    ) -> Result<TokenAmount, GovernanceError> {
        let proposal = self.store.get(id)?;
        if now < proposal.start_time {
            return Err(GovernanceError::VotingNotStarted {
                starts_at: proposal.start_time,
            });
        }
        if now > proposal.end_time {
            return Err(GovernanceError::VotingEnded {
                ended_at: proposal.end_time,
            });
        }
        if proposal.has_voted(caller) {
            return Err(GovernanceError::AlreadyVoted(caller.clone()));
        }
        let weight = self.oracle.balance_of(caller);
        if weight.is_zero() {
            return Err(GovernanceError::NoVotingPower(caller.clone()));
        }
        Ok(weight)
    }

    /// Weigh a proposal's votes against the current supply and quorum.
    pub fn tally(&self, id: ProposalId) -> Result<Tally, GovernanceError> {
        let proposal = self.store.get(id)?;
        Ok(proposal.tally(self.oracle.total_supply(), self.registry.quorum_percent()))
    }

    /// Whether the proposal meets quorum and has a strict majority for,
    /// evaluated against the live supply and quorum percentage.
    pub fn proposal_passed(&self, id: ProposalId) -> Result<bool, GovernanceError> {
        Ok(self.tally(id)?.passed())
    }

    /// Mark a closed, passing proposal as executed. Succeeds at most once.
    pub fn execute_proposal(&mut self, id: ProposalId, now: Timestamp) -> Result<(), GovernanceError> {
        self.check_execute(id, now).inspect_err(|e| {
            tracing::debug!(proposal = id, error = %e, "execution rejected")
        })?;

        // Flag first, then notify.
        self.store.get_mut(id)?.executed = true;
        tracing::info!(proposal = id, at = %now, "proposal executed");
        self.events.emit(&GovernanceEvent::ProposalExecuted { id });
        Ok(())
    }

    fn check_execute(&self, id: ProposalId, now: Timestamp) -> Result<(), GovernanceError> {
        let proposal = self.store.get(id)?;
        if now <= proposal.end_time {
            return Err(GovernanceError::VotingStillActive {
                ends_at: proposal.end_time,
            });
        }
        if proposal.executed {
            return Err(GovernanceError::AlreadyExecuted(id));
        }
        let tally = self.tally(id)?;
        if !tally.quorum_reached() {
            return Err(GovernanceError::QuorumNotReached {
                have: tally.total_votes,
                need: tally.required_quorum,
            });
        }
        if !tally.majority_for() {
            return Err(GovernanceError::ProposalRejected {
                for_votes: tally.for_votes,
                against_votes: tally.against_votes,
            });
        }
        Ok(())
    }

    // ── Parameters ─────────────────────────────────────────────────────

    pub fn update_voting_duration(
        &mut self,
        caller: &AccountId,
        secs: u64,
    ) -> Result<(), GovernanceError> {
        self.registry
            .update_voting_duration(&self.gate, caller, secs)?;
        tracing::info!(by = %caller, secs, "voting duration updated");
        self.events
            .emit(&GovernanceEvent::VotingDurationUpdated { value: secs });
        Ok(())
    }

    pub fn update_proposal_threshold(
        &mut self,
        caller: &AccountId,
        value: TokenAmount,
    ) -> Result<(), GovernanceError> {
        self.registry
            .update_proposal_threshold(&self.gate, caller, value)?;
        tracing::info!(by = %caller, threshold = %value, "proposal threshold updated");
        self.events
            .emit(&GovernanceEvent::ProposalThresholdUpdated { value });
        Ok(())
    }

    pub fn update_quorum_threshold(
        &mut self,
        caller: &AccountId,
        percent: u8,
    ) -> Result<(), GovernanceError> {
        self.registry
            .update_quorum_percent(&self.gate, caller, percent)?;
        tracing::info!(by = %caller, percent, "quorum threshold updated");
        self.events
            .emit(&GovernanceEvent::QuorumThresholdUpdated { value: percent });
        Ok(())
    }

    // ── Queries ────────────────────────────────────────────────────────

    pub fn get_proposal(&self, id: ProposalId) -> Result<ProposalSummary, GovernanceError> {
        Ok(self.store.get(id)?.summary())
    }

    pub fn has_voted(&self, id: ProposalId, voter: &AccountId) -> Result<bool, GovernanceError> {
        Ok(self.store.get(id)?.has_voted(voter))
    }

    /// The side `voter` took, or `NotVoted` if they have not voted.
    pub fn get_vote_choice(
        &self,
        id: ProposalId,
        voter: &AccountId,
    ) -> Result<bool, GovernanceError> {
        self.store
            .get(id)?
            .receipt(voter)
            .map(|r| r.support)
            .ok_or_else(|| GovernanceError::NotVoted(voter.clone()))
    }

    /// Every receipt on a proposal, ordered by voter.
    pub fn votes(&self, id: ProposalId) -> Result<Vec<VoteReceipt>, GovernanceError> {
        Ok(self.store.get(id)?.receipts().cloned().collect())
    }

    pub fn governance_params(&self) -> GovernanceOverview {
        let params = self.registry.params();
        GovernanceOverview {
            voting_duration_secs: params.voting_duration_secs,
            proposal_threshold: params.proposal_threshold,
            quorum_percent: params.quorum_percent,
            proposal_count: self.store.count(),
        }
    }

    /// Votes needed for quorum at the current supply and percentage.
    pub fn required_quorum(&self) -> TokenAmount {
        self.oracle
            .total_supply()
            .percent_floor(self.registry.quorum_percent())
    }

    pub fn proposal_state(
        &self,
        id: ProposalId,
        now: Timestamp,
    ) -> Result<ProposalState, GovernanceError> {
        let proposal = self.store.get(id)?;
        let state = if proposal.executed {
            ProposalState::Executed
        } else if now < proposal.start_time {
            ProposalState::Pending
        } else if now <= proposal.end_time {
            ProposalState::Active
        } else if self.tally(id)?.passed() {
            ProposalState::Succeeded
        } else {
            ProposalState::Defeated
        };
        Ok(state)
    }

    /// Up to `count` proposal summaries starting at id `from`.
    pub fn proposals(&self, from: ProposalId, count: usize) -> Vec<ProposalSummary> {
        self.store.range(from, count).map(|p| p.summary()).collect()
    }

    /// Summaries of proposals whose voting window contains `now`.
    pub fn active_proposals(&self, now: Timestamp) -> Vec<ProposalSummary> {
        self.store
            .iter()
            .filter(|p| p.is_open(now))
            .map(|p| p.summary())
            .collect()
    }
}

impl<B: Mintable, G: AccessGate> GovernanceEngine<B, G> {
    /// Forward an admin-approved mint to the ledger.
    pub fn mint(
        &mut self,
        caller: &AccountId,
        to: &AccountId,
        amount: TokenAmount,
    ) -> Result<(), GovernanceError> {
        authorize(&self.gate, caller)?;
        self.oracle
            .mint(to, amount)
            .map_err(GovernanceError::Ledger)?;
        tracing::info!(by = %caller, to = %to, amount = %amount, "mint forwarded to ledger");
        self.events.emit(&GovernanceEvent::TokensMinted {
            to: to.clone(),
            amount,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tally_types::params::DAY_SECS;

    #[derive(Default)]
    struct FixedLedger {
        balances: Mutex<HashMap<AccountId, TokenAmount>>,
        supply: Mutex<TokenAmount>,
    }

    impl FixedLedger {
        fn set(&self, who: &AccountId, amount: u128) {
            self.balances
                .lock()
                .unwrap()
                .insert(who.clone(), TokenAmount::new(amount));
        }
    }

    impl BalanceOracle for FixedLedger {
        fn balance_of(&self, account: &AccountId) -> TokenAmount {
            self.balances
                .lock()
                .unwrap()
                .get(account)
                .copied()
                .unwrap_or(TokenAmount::ZERO)
        }

        fn total_supply(&self) -> TokenAmount {
            *self.supply.lock().unwrap()
        }
    }

    impl Mintable for FixedLedger {
        fn mint(&self, to: &AccountId, amount: TokenAmount) -> Result<(), String> {
            let current = self.balance_of(to);
            let next = current.checked_add(amount).ok_or("balance overflow")?;
            self.balances.lock().unwrap().insert(to.clone(), next);
            let mut supply = self.supply.lock().unwrap();
            *supply = supply.checked_add(amount).ok_or("supply overflow")?;
            Ok(())
        }
    }

    struct SingleAdmin(AccountId);

    impl AccessGate for SingleAdmin {
        fn is_admin(&self, caller: &AccountId) -> bool {
            *caller == self.0
        }
    }

    fn account(name: &str) -> AccountId {
        AccountId::new(name).unwrap()
    }

    fn t(secs: u64) -> Timestamp {
        Timestamp::new(secs)
    }

    type TestEngine = GovernanceEngine<Arc<FixedLedger>, SingleAdmin>;

    fn setup() -> (TestEngine, Arc<FixedLedger>) {
        let ledger = Arc::new(FixedLedger::default());
        *ledger.supply.lock().unwrap() = TokenAmount::new(1_000_000);
        ledger.set(&account("alice"), 1_000);
        ledger.set(&account("bob"), 150_000);
        ledger.set(&account("carol"), 90_000);
        let engine = GovernanceEngine::new(Arc::clone(&ledger), SingleAdmin(account("admin")));
        (engine, ledger)
    }

    fn events_of(engine: &mut TestEngine) -> Arc<Mutex<Vec<GovernanceEvent>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        engine.subscribe(Box::new(move |e| sink.lock().unwrap().push(e.clone())));
        seen
    }

    #[test]
    fn create_freezes_end_time() {
        let (mut engine, _) = setup();
        let id = engine
            .create_proposal(&account("alice"), "Title", "Body", t(100))
            .unwrap();
        engine
            .update_voting_duration(&account("admin"), DAY_SECS)
            .unwrap();
        let p = engine.get_proposal(id).unwrap();
        assert_eq!(p.start_time, t(100));
        assert_eq!(p.end_time, t(100 + 7 * DAY_SECS));

        let next = engine
            .create_proposal(&account("alice"), "Title", "Body", t(100))
            .unwrap();
        assert_eq!(engine.get_proposal(next).unwrap().end_time, t(100 + DAY_SECS));
    }

    #[test]
    fn create_checks_balance_before_text() {
        let (mut engine, ledger) = setup();
        ledger.set(&account("dave"), 500);
        assert!(matches!(
            engine.create_proposal(&account("dave"), "", "", t(0)),
            Err(GovernanceError::InsufficientBalance { .. })
        ));
        assert!(matches!(
            engine.create_proposal(&account("alice"), "", "Body", t(0)),
            Err(GovernanceError::EmptyTitle)
        ));
        assert!(matches!(
            engine.create_proposal(&account("alice"), "Title", "", t(0)),
            Err(GovernanceError::EmptyDescription)
        ));
        assert_eq!(engine.governance_params().proposal_count, 0);
    }

    #[test]
    fn whitespace_text_is_not_empty() {
        let (mut engine, _) = setup();
        let id = engine
            .create_proposal(&account("alice"), " ", "\n", t(0))
            .unwrap();
        let p = engine.get_proposal(id).unwrap();
        assert_eq!(p.title, " ");
        assert_eq!(p.description, "\n");
    }

    #[test]
    fn create_rejects_overflowing_window() {
        let (mut engine, _) = setup();
        assert!(matches!(
            engine.create_proposal(&account("alice"), "Title", "Body", t(u64::MAX)),
            Err(GovernanceError::Overflow)
        ));
        assert_eq!(engine.store().count(), 0);
    }

    #[test]
    fn vote_error_order() {
        let (mut engine, ledger) = setup();
        assert!(matches!(
            engine.vote(&account("bob"), 0, true, t(0)),
            Err(GovernanceError::ProposalNotFound(0))
        ));
        let id = engine
            .create_proposal(&account("alice"), "Title", "Body", t(1_000))
            .unwrap();
        assert!(matches!(
            engine.vote(&account("bob"), id, true, t(999)),
            Err(GovernanceError::VotingNotStarted { .. })
        ));
        assert!(matches!(
            engine.vote(&account("bob"), id, true, t(1_000 + 7 * DAY_SECS + 1)),
            Err(GovernanceError::VotingEnded { .. })
        ));
        assert!(matches!(
            engine.vote(&account("nobody"), id, true, t(1_000)),
            Err(GovernanceError::NoVotingPower(_))
        ));
        engine.vote(&account("bob"), id, true, t(1_000)).unwrap();
        ledger.set(&account("bob"), 0);
        // Already voted wins over no voting power.
        assert!(matches!(
            engine.vote(&account("bob"), id, true, t(1_001)),
            Err(GovernanceError::AlreadyVoted(_))
        ));
    }

    #[test]
    fn vote_at_window_edges_is_accepted() {
        let (mut engine, _) = setup();
        let id = engine
            .create_proposal(&account("alice"), "Title", "Body", t(0))
            .unwrap();
        engine.vote(&account("bob"), id, true, t(0)).unwrap();
        engine
            .vote(&account("carol"), id, false, t(7 * DAY_SECS))
            .unwrap();
        let p = engine.get_proposal(id).unwrap();
        assert_eq!(p.for_votes, TokenAmount::new(150_000));
        assert_eq!(p.against_votes, TokenAmount::new(90_000));
    }

    #[test]
    fn weight_is_balance_at_cast_time() {
        let (mut engine, ledger) = setup();
        let id = engine
            .create_proposal(&account("alice"), "Title", "Body", t(0))
            .unwrap();
        ledger.set(&account("bob"), 42);
        assert_eq!(
            engine.vote(&account("bob"), id, true, t(10)).unwrap(),
            TokenAmount::new(42)
        );
        ledger.set(&account("bob"), 1_000_000);
        assert_eq!(engine.get_proposal(id).unwrap().for_votes, TokenAmount::new(42));
        assert_eq!(engine.votes(id).unwrap()[0].weight, TokenAmount::new(42));
    }

    #[test]
    fn execution_runs_once_and_notifies_after_flag() {
        let (mut engine, _) = setup();
        let seen = events_of(&mut engine);
        let id = engine
            .create_proposal(&account("alice"), "Title", "Body", t(0))
            .unwrap();
        engine.vote(&account("bob"), id, true, t(DAY_SECS)).unwrap();

        assert!(matches!(
            engine.execute_proposal(id, t(7 * DAY_SECS)),
            Err(GovernanceError::VotingStillActive { .. })
        ));
        engine.execute_proposal(id, t(8 * DAY_SECS)).unwrap();
        assert!(engine.get_proposal(id).unwrap().executed);
        assert!(matches!(
            engine.execute_proposal(id, t(9 * DAY_SECS)),
            Err(GovernanceError::AlreadyExecuted(_))
        ));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[2], GovernanceEvent::ProposalExecuted { id });
    }

    #[test]
    fn quorum_uses_live_supply_and_percent() {
        let (mut engine, ledger) = setup();
        let id = engine
            .create_proposal(&account("alice"), "Title", "Body", t(0))
            .unwrap();
        engine.vote(&account("bob"), id, true, t(1)).unwrap();
        assert!(engine.proposal_passed(id).unwrap());

        engine
            .update_quorum_threshold(&account("admin"), 20)
            .unwrap();
        assert!(!engine.proposal_passed(id).unwrap());
        assert_eq!(engine.required_quorum(), TokenAmount::new(200_000));

        engine
            .update_quorum_threshold(&account("admin"), 10)
            .unwrap();
        *ledger.supply.lock().unwrap() = TokenAmount::new(2_000_000);
        assert!(matches!(
            engine.execute_proposal(id, t(8 * DAY_SECS)),
            Err(GovernanceError::QuorumNotReached { .. })
        ));
        assert!(!engine.get_proposal(id).unwrap().executed);
    }

    #[test]
    fn vote_choice_queries() {
        let (mut engine, _) = setup();
        let id = engine
            .create_proposal(&account("alice"), "Title", "Body", t(0))
            .unwrap();
        engine.vote(&account("carol"), id, false, t(1)).unwrap();
        assert!(engine.has_voted(id, &account("carol")).unwrap());
        assert!(!engine.has_voted(id, &account("bob")).unwrap());
        assert!(!engine.get_vote_choice(id, &account("carol")).unwrap());
        assert!(matches!(
            engine.get_vote_choice(id, &account("bob")),
            Err(GovernanceError::NotVoted(_))
        ));
        assert!(matches!(
            engine.has_voted(9, &account("bob")),
            Err(GovernanceError::ProposalNotFound(9))
        ));
    }

    #[test]
    fn proposal_state_transitions() {
        let (mut engine, _) = setup();
        let id = engine
            .create_proposal(&account("alice"), "Title", "Body", t(10))
            .unwrap();
        assert_eq!(engine.proposal_state(id, t(5)).unwrap(), ProposalState::Pending);
        assert_eq!(engine.proposal_state(id, t(10)).unwrap(), ProposalState::Active);
        let after = t(10 + 7 * DAY_SECS + 1);
        assert_eq!(engine.proposal_state(id, after).unwrap(), ProposalState::Defeated);

        let passing = engine
            .create_proposal(&account("alice"), "Other", "Body", t(10))
            .unwrap();
        engine.vote(&account("bob"), passing, true, t(11)).unwrap();
        assert_eq!(
            engine.proposal_state(passing, after).unwrap(),
            ProposalState::Succeeded
        );
        engine.execute_proposal(passing, after).unwrap();
        assert_eq!(
            engine.proposal_state(passing, after).unwrap(),
            ProposalState::Executed
        );
    }

    #[test]
    fn listings() {
        let (mut engine, _) = setup();
        engine
            .create_proposal(&account("alice"), "A", "Body", t(0))
            .unwrap();
        engine
            .create_proposal(&account("alice"), "B", "Body", t(5 * DAY_SECS))
            .unwrap();
        let active: Vec<_> = engine
            .active_proposals(t(8 * DAY_SECS))
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(active, vec!["B".to_string()]);
        assert_eq!(engine.proposals(0, 10).len(), 2);
        assert_eq!(engine.proposals(1, 10)[0].title, "B");
    }

    #[test]
    fn parameter_updates_are_gated_and_announced() {
        let (mut engine, _) = setup();
        let seen = events_of(&mut engine);
        assert!(matches!(
            engine.update_proposal_threshold(&account("bob"), TokenAmount::new(5)),
            Err(GovernanceError::Unauthorized(_))
        ));
        engine
            .update_proposal_threshold(&account("admin"), TokenAmount::new(5))
            .unwrap();
        engine
            .update_voting_duration(&account("admin"), 2 * DAY_SECS)
            .unwrap();
        let overview = engine.governance_params();
        assert_eq!(overview.proposal_threshold, TokenAmount::new(5));
        assert_eq!(overview.voting_duration_secs, 2 * DAY_SECS);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                GovernanceEvent::ProposalThresholdUpdated {
                    value: TokenAmount::new(5)
                },
                GovernanceEvent::VotingDurationUpdated {
                    value: 2 * DAY_SECS
                },
            ]
        );
    }

    #[test]
    fn mint_requires_admin() {
        let (mut engine, ledger) = setup();
        assert!(matches!(
            engine.mint(&account("bob"), &account("bob"), TokenAmount::new(1)),
            Err(GovernanceError::Unauthorized(_))
        ));
        engine
            .mint(&account("admin"), &account("dave"), TokenAmount::new(2_500))
            .unwrap();
        assert_eq!(ledger.balance_of(&account("dave")), TokenAmount::new(2_500));
        assert_eq!(ledger.total_supply(), TokenAmount::new(1_002_500));
    }

    #[test]
    fn ledger_failure_surfaces_as_ledger_error() {
        let (mut engine, ledger) = setup();
        ledger.set(&account("dave"), u128::MAX);
        assert!(matches!(
            engine.mint(&account("admin"), &account("dave"), TokenAmount::new(1)),
            Err(GovernanceError::Ledger(_))
        ));
    }
}
