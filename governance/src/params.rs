//! Governance parameters and the registry that guards them.
//!
//! Every change goes through the [`AccessGate`] and the range rules below.
//! A change applies to proposals created afterwards (voting duration) and to
//! every later quorum evaluation, including proposals already closed.

use serde::{Deserialize, Serialize};
use tally_types::params::{
    DEFAULT_PROPOSAL_THRESHOLD, DEFAULT_QUORUM_PERCENT, DEFAULT_VOTING_DURATION_SECS,
    MAX_QUORUM_PERCENT, MAX_VOTING_DURATION_SECS, MIN_QUORUM_PERCENT, MIN_VOTING_DURATION_SECS,
};
use tally_types::{AccountId, TokenAmount};

use crate::error::GovernanceError;
use crate::oracle::AccessGate;

/// The live governance parameter block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceParams {
    /// Length of the voting window given to new proposals, in seconds.
    pub voting_duration_secs: u64,
    /// Minimum balance needed to create a proposal.
    pub proposal_threshold: TokenAmount,
    /// Percentage of total supply that must vote for a proposal to pass.
    pub quorum_percent: u8,
}

impl Default for GovernanceParams {
    fn default() -> Self {
        Self {
            voting_duration_secs: DEFAULT_VOTING_DURATION_SECS,
            proposal_threshold: TokenAmount::new(DEFAULT_PROPOSAL_THRESHOLD),
            quorum_percent: DEFAULT_QUORUM_PERCENT,
        }
    }
}

impl GovernanceParams {
    /// Check every field against the registry's range rules.
    pub fn validate(&self) -> Result<(), GovernanceError> {
        check_voting_duration(self.voting_duration_secs)?;
        check_proposal_threshold(self.proposal_threshold)?;
        check_quorum_percent(self.quorum_percent)
    }
}

fn check_voting_duration(secs: u64) -> Result<(), GovernanceError> {
    if (MIN_VOTING_DURATION_SECS..=MAX_VOTING_DURATION_SECS).contains(&secs) {
        Ok(())
    } else {
        Err(GovernanceError::InvalidDuration(secs))
    }
}

fn check_proposal_threshold(value: TokenAmount) -> Result<(), GovernanceError> {
    if value.is_zero() {
        Err(GovernanceError::InvalidThreshold)
    } else {
        Ok(())
    }
}

fn check_quorum_percent(value: u8) -> Result<(), GovernanceError> {
    if (MIN_QUORUM_PERCENT..=MAX_QUORUM_PERCENT).contains(&value) {
        Ok(())
    } else {
        Err(GovernanceError::InvalidPercentage(value))
    }
}

/// Owner of the single [`GovernanceParams`] block.
#[derive(Clone, Debug, Default)]
pub struct ParameterRegistry {
    params: GovernanceParams,
}

impl ParameterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an explicit parameter block, rejecting out-of-range values.
    pub fn with_params(params: GovernanceParams) -> Result<Self, GovernanceError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &GovernanceParams {
        &self.params
    }

    pub fn voting_duration_secs(&self) -> u64 {
        self.params.voting_duration_secs
    }

    pub fn proposal_threshold(&self) -> TokenAmount {
        self.params.proposal_threshold
    }

    pub fn quorum_percent(&self) -> u8 {
        self.params.quorum_percent
    }

    /// Set the voting window for future proposals. Must be 1 to 30 days.
    pub fn update_voting_duration(
        &mut self,
        gate: &impl AccessGate,
        caller: &AccountId,
        secs: u64,
    ) -> Result<(), GovernanceError> {
        authorize(gate, caller)?;
        check_voting_duration(secs)?;
        self.params.voting_duration_secs = secs;
        Ok(())
    }

    /// Set the minimum balance needed to propose. Must be non-zero.
    pub fn update_proposal_threshold(
        &mut self,
        gate: &impl AccessGate,
        caller: &AccountId,
        value: TokenAmount,
    ) -> Result<(), GovernanceError> {
        authorize(gate, caller)?;
        check_proposal_threshold(value)?;
        self.params.proposal_threshold = value;
        Ok(())
    }

    /// Set the quorum percentage. Must be within 1..=100.
    pub fn update_quorum_percent(
        &mut self,
        gate: &impl AccessGate,
        caller: &AccountId,
        value: u8,
    ) -> Result<(), GovernanceError> {
        authorize(gate, caller)?;
        check_quorum_percent(value)?;
        self.params.quorum_percent = value;
        Ok(())
    }
}

/// Fail with `Unauthorized` unless the gate recognises `caller` as admin.
pub(crate) fn authorize(gate: &impl AccessGate, caller: &AccountId) -> Result<(), GovernanceError> {
    if gate.is_admin(caller) {
        Ok(())
    } else {
        tracing::warn!(caller = %caller, "access gate denied governance admin call");
        Err(GovernanceError::Unauthorized(caller.clone()))
    }
}
