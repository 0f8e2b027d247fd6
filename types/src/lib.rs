//! Fundamental types for tally.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account identities, timestamps, token amounts, proposal ids and the
//! governance defaults and bounds.

pub mod address;
pub mod amount;
pub mod error;
pub mod params;
pub mod time;

pub use address::AccountId;
pub use amount::TokenAmount;
pub use error::TypesError;
pub use time::Timestamp;

/// Sequential proposal identifier. Dense, starts at 0, never reused.
pub type ProposalId = u64;
