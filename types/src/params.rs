//! Governance defaults and bounds.
//!
//! Durations are seconds. Thresholds are whole token units. The quorum is a
//! percentage of total supply.

/// One day in seconds.
pub const DAY_SECS: u64 = 86_400;

/// Shortest voting window the parameter registry accepts.
pub const MIN_VOTING_DURATION_SECS: u64 = DAY_SECS;

/// Longest voting window the parameter registry accepts.
pub const MAX_VOTING_DURATION_SECS: u64 = 30 * DAY_SECS;

/// Voting window applied to new proposals until changed: 7 days.
pub const DEFAULT_VOTING_DURATION_SECS: u64 = 7 * DAY_SECS;

/// Minimum balance needed to create a proposal until changed.
pub const DEFAULT_PROPOSAL_THRESHOLD: u128 = 1_000;

/// Share of total supply that must vote, in percent, until changed.
pub const DEFAULT_QUORUM_PERCENT: u8 = 10;

/// Lowest accepted quorum percentage.
pub const MIN_QUORUM_PERCENT: u8 = 1;

/// Highest accepted quorum percentage.
pub const MAX_QUORUM_PERCENT: u8 = 100;
