//! Proposal store: dense, append-only proposal records.

use tally_types::{AccountId, ProposalId, Timestamp};

use crate::error::GovernanceError;
use crate::proposal::Proposal;

/// Owns every proposal record. Ids start at 0 and are never skipped or reused.
#[derive(Clone, Debug, Default)]
pub struct ProposalStore {
    proposals: Vec<Proposal>,
}

impl ProposalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from records, which must be ordered by dense id and
    /// internally consistent.
    pub fn from_records(proposals: Vec<Proposal>) -> Result<Self, GovernanceError> {
        if let Some((index, p)) = proposals
            .iter()
            .enumerate()
            .find(|(index, p)| p.id != *index as ProposalId)
        {
            return Err(GovernanceError::Snapshot(format!(
                "proposal at position {index} has id {}",
                p.id
            )));
        }
        for p in &proposals {
            p.check_consistency().map_err(GovernanceError::Snapshot)?;
        }
        Ok(Self { proposals })
    }

    /// Store a new record with empty tallies and return its id.
    ///
    /// Inputs are assumed to be validated by the caller.
    pub fn allocate(
        &mut self,
        proposer: AccountId,
        title: String,
        description: String,
        start_time: Timestamp,
        end_time: Timestamp,
    ) -> ProposalId {
        let id = self.count();
        self.proposals.push(Proposal::new(
            id,
            proposer,
            title,
            description,
            start_time,
            end_time,
        ));
        id
    }

    pub fn get(&self, id: ProposalId) -> Result<&Proposal, GovernanceError> {
        usize::try_from(id)
            .ok()
            .and_then(|i| self.proposals.get(i))
            .ok_or(GovernanceError::ProposalNotFound(id))
    }

    pub fn get_mut(&mut self, id: ProposalId) -> Result<&mut Proposal, GovernanceError> {
        usize::try_from(id)
            .ok()
            .and_then(|i| self.proposals.get_mut(i))
            .ok_or(GovernanceError::ProposalNotFound(id))
    }

    /// Number of proposals ever created, which is also the next id.
    pub fn count(&self) -> ProposalId {
        self.proposals.len() as ProposalId
    }

    pub fn iter(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.iter()
    }

    /// Up to `count` records starting at id `from`.
    pub fn range(&self, from: ProposalId, count: usize) -> impl Iterator<Item = &Proposal> {
        let start = usize::try_from(from).unwrap_or(usize::MAX);
        self.proposals.iter().skip(start).take(count)
    }

    pub(crate) fn records(&self) -> &[Proposal] {
        &self.proposals
    }
}
