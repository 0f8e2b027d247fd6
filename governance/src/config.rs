//! Governance configuration with TOML file support.
//!
//! Only the starting parameter block is configurable. Later changes go
//! through the parameter registry and its access gate.

use serde::{Deserialize, Serialize};
use tally_types::params::{
    DEFAULT_PROPOSAL_THRESHOLD, DEFAULT_QUORUM_PERCENT, DEFAULT_VOTING_DURATION_SECS,
};
use tally_types::TokenAmount;

use crate::error::GovernanceError;
use crate::params::GovernanceParams;

/// Top-level governance configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    #[serde(default)]
    pub params: ParamsConfig,
}

/// The `[params]` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamsConfig {
    /// Voting window for new proposals, in seconds.
    #[serde(default = "default_voting_duration_secs")]
    pub voting_duration_secs: u64,

    /// Minimum balance needed to create a proposal. TOML integers are
    /// 64-bit, so larger thresholds must be set through the registry.
    #[serde(default = "default_proposal_threshold")]
    pub proposal_threshold: u64,

    /// Quorum as a percentage of total supply.
    #[serde(default = "default_quorum_percent")]
    pub quorum_percent: u8,
}

fn default_voting_duration_secs() -> u64 {
    DEFAULT_VOTING_DURATION_SECS
}

fn default_proposal_threshold() -> u64 {
    DEFAULT_PROPOSAL_THRESHOLD as u64
}

fn default_quorum_percent() -> u8 {
    DEFAULT_QUORUM_PERCENT
}

impl Default for ParamsConfig {
    fn default() -> Self {
        Self {
            voting_duration_secs: default_voting_duration_secs(),
            proposal_threshold: default_proposal_threshold(),
            quorum_percent: default_quorum_percent(),
        }
    }
}

impl GovernanceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, GovernanceError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| GovernanceError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, GovernanceError> {
        let config: Self = toml::from_str(s).map_err(|e| GovernanceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, GovernanceError> {
        toml::to_string_pretty(self).map_err(|e| GovernanceError::Config(e.to_string()))
    }

    /// Apply the parameter registry's range rules.
    pub fn validate(&self) -> Result<(), GovernanceError> {
        self.governance_params().validate()
    }

    pub fn governance_params(&self) -> GovernanceParams {
        GovernanceParams {
            voting_duration_secs: self.params.voting_duration_secs,
            proposal_threshold: TokenAmount::new(u128::from(self.params.proposal_threshold)),
            quorum_percent: self.params.quorum_percent,
        }
    }
}
