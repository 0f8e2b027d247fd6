//! Balance-weighted governance for tally.
//!
//! Holders of the governance token create proposals and cast one vote each,
//! weighted by their balance at the moment of casting. Once the voting window
//! closes, anyone may execute a proposal that meets quorum and has a strict
//! majority in favour. Execution only flips a flag and notifies subscribers;
//! reacting to it is up to the host.
//!
//! The token ledger and the administrator check are external collaborators,
//! reached through [`BalanceOracle`] and [`AccessGate`].

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod oracle;
pub mod params;
pub mod proposal;
pub mod snapshot;
pub mod store;

pub use config::GovernanceConfig;
pub use engine::{GovernanceEngine, GovernanceOverview};
pub use error::{ErrorKind, GovernanceError};
pub use event::{EventBus, GovernanceEvent};
pub use oracle::{AccessGate, BalanceOracle, Mintable};
pub use params::{GovernanceParams, ParameterRegistry};
pub use proposal::{Proposal, ProposalState, ProposalSummary, Tally, VoteReceipt};
pub use snapshot::GovernanceState;
pub use store::ProposalStore;
