//! Proposal records and their tallies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tally_types::{AccountId, ProposalId, Timestamp, TokenAmount};

use crate::error::GovernanceError;

/// A single account's vote on a proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    pub voter: AccountId,
    /// `true` for, `false` against.
    pub support: bool,
    /// Balance of the voter when the vote was cast.
    pub weight: TokenAmount,
}

/// A governance proposal.
///
/// Records are never deleted. Tallies only grow and `executed` only goes
/// from `false` to `true`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub proposer: AccountId,
    pub title: String,
    pub description: String,
    pub for_votes: TokenAmount,
    pub against_votes: TokenAmount,
    pub start_time: Timestamp,
    /// Fixed at creation from the voting duration in force at the time.
    pub end_time: Timestamp,
    pub executed: bool,
    votes: BTreeMap<AccountId, VoteReceipt>,
}

impl Proposal {
    pub(crate) fn new(
        id: ProposalId,
        proposer: AccountId,
        title: String,
        description: String,
        start_time: Timestamp,
        end_time: Timestamp,
    ) -> Self {
        Self {
            id,
            proposer,
            title,
            description,
            for_votes: TokenAmount::ZERO,
            against_votes: TokenAmount::ZERO,
            start_time,
            end_time,
            executed: false,
            votes: BTreeMap::new(),
        }
    }

    /// Whether `now` lies inside the closed window `[start_time, end_time]`.
    pub fn is_open(&self, now: Timestamp) -> bool {
        self.start_time <= now && now <= self.end_time
    }

    pub fn has_voted(&self, voter: &AccountId) -> bool {
        self.votes.contains_key(voter)
    }

    pub fn receipt(&self, voter: &AccountId) -> Option<&VoteReceipt> {
        self.votes.get(voter)
    }

    /// Receipts ordered by voter identity.
    pub fn receipts(&self) -> impl Iterator<Item = &VoteReceipt> {
        self.votes.values()
    }

    pub fn voter_count(&self) -> usize {
        self.votes.len()
    }

    /// Add a vote to the tally and remember the voter.
    ///
    /// Nothing changes unless the call succeeds.
    pub(crate) fn record_vote(
        &mut self,
        voter: &AccountId,
        support: bool,
        weight: TokenAmount,
    ) -> Result<(), GovernanceError> {
        if self.has_voted(voter) {
            return Err(GovernanceError::AlreadyVoted(voter.clone()));
        }
        let side = if support {
            &mut self.for_votes
        } else {
            &mut self.against_votes
        };
        *side = side.checked_add(weight).ok_or(GovernanceError::Overflow)?;
        self.votes.insert(
            voter.clone(),
            VoteReceipt {
                voter: voter.clone(),
                support,
                weight,
            },
        );
        Ok(())
    }

    /// Check a record that did not come from this engine: the window must
    /// be non-empty, each receipt filed under its own voter, and the
    /// tallies equal to the receipt weights per side.
    pub(crate) fn check_consistency(&self) -> Result<(), String> {
        if self.end_time <= self.start_time {
            return Err(format!(
                "proposal {} ends at {} but starts at {}",
                self.id, self.end_time, self.start_time
            ));
        }
        let mut for_votes = TokenAmount::ZERO;
        let mut against_votes = TokenAmount::ZERO;
        for (voter, receipt) in &self.votes {
            if *voter != receipt.voter {
                return Err(format!(
                    "proposal {} files the vote of {} under {voter}",
                    self.id, receipt.voter
                ));
            }
            let side = if receipt.support {
                &mut for_votes
            } else {
                &mut against_votes
            };
            *side = side
                .checked_add(receipt.weight)
                .ok_or_else(|| format!("proposal {} receipt weights overflow", self.id))?;
        }
        if for_votes != self.for_votes || against_votes != self.against_votes {
            return Err(format!(
                "proposal {} tallies {}/{} but its receipts sum to {for_votes}/{against_votes}",
                self.id, self.for_votes, self.against_votes
            ));
        }
        Ok(())
    }

    /// Evaluate the tally against a supply and quorum percentage.
    pub fn tally(&self, total_supply: TokenAmount, quorum_percent: u8) -> Tally {
        Tally {
            for_votes: self.for_votes,
            against_votes: self.against_votes,
            total_votes: self.for_votes.saturating_add(self.against_votes),
            required_quorum: total_supply.percent_floor(quorum_percent),
        }
    }

    /// Copy of the record without the per-voter receipts.
    pub fn summary(&self) -> ProposalSummary {
        ProposalSummary {
            id: self.id,
            proposer: self.proposer.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            for_votes: self.for_votes,
            against_votes: self.against_votes,
            start_time: self.start_time,
            end_time: self.end_time,
            executed: self.executed,
        }
    }
}

/// A proposal record without its per-voter receipts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalSummary {
    pub id: ProposalId,
    pub proposer: AccountId,
    pub title: String,
    pub description: String,
    pub for_votes: TokenAmount,
    pub against_votes: TokenAmount,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub executed: bool,
}

/// Outcome of weighing a proposal's votes against the live quorum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tally {
    pub for_votes: TokenAmount,
    pub against_votes: TokenAmount,
    pub total_votes: TokenAmount,
    /// `floor(total_supply * quorum_percent / 100)`.
    pub required_quorum: TokenAmount,
}

impl Tally {
    pub fn quorum_reached(&self) -> bool {
        self.total_votes >= self.required_quorum
    }

    /// Strict majority: a tie does not pass.
    pub fn majority_for(&self) -> bool {
        self.for_votes > self.against_votes
    }

    pub fn passed(&self) -> bool {
        self.quorum_reached() && self.majority_for()
    }
}

/// Where a proposal stands at a given moment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalState {
    /// Voting window has not opened.
    Pending,
    /// Voting window is open.
    Active,
    /// Window closed and the proposal would pass if executed now.
    Succeeded,
    /// Window closed and the proposal would not pass now.
    Defeated,
    Executed,
}
