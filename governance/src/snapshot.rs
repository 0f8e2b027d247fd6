//! Serializable governance state for hosts that persist it.
//!
//! The engine itself keeps everything in memory; durability belongs to the
//! host, which stores the bytes produced here and hands them back on restart.

use serde::{Deserialize, Serialize};

use crate::error::GovernanceError;
use crate::params::GovernanceParams;
use crate::proposal::Proposal;

/// Parameters plus every proposal record, receipts included.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GovernanceState {
    pub params: GovernanceParams,
    /// Ordered by id; position `i` holds proposal `i`.
    pub proposals: Vec<Proposal>,
}

impl GovernanceState {
    pub fn to_bytes(&self) -> Result<Vec<u8>, GovernanceError> {
        bincode::serialize(self).map_err(|e| GovernanceError::Snapshot(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GovernanceError> {
        bincode::deserialize(bytes).map_err(|e| GovernanceError::Snapshot(e.to_string()))
    }
}
