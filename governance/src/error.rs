use tally_types::{AccountId, ProposalId, Timestamp, TokenAmount};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    #[error("proposal title must not be empty")]
    EmptyTitle,

    #[error("proposal description must not be empty")]
    EmptyDescription,

    #[error("insufficient balance to propose: have {have}, need {need}")]
    InsufficientBalance { have: TokenAmount, need: TokenAmount },

    #[error("voting has not started yet (opens at {starts_at})")]
    VotingNotStarted { starts_at: Timestamp },

    #[error("voting window closed at {ended_at}")]
    VotingEnded { ended_at: Timestamp },

    #[error("account {0} has already voted on this proposal")]
    AlreadyVoted(AccountId),

    #[error("account {0} has no voting power")]
    NoVotingPower(AccountId),

    #[error("voting is still active until {ends_at}")]
    VotingStillActive { ends_at: Timestamp },

    #[error("proposal {0} has already been executed")]
    AlreadyExecuted(ProposalId),

    #[error("quorum not reached: {have} < {need}")]
    QuorumNotReached { have: TokenAmount, need: TokenAmount },

    #[error("proposal rejected: {for_votes} for, {against_votes} against")]
    ProposalRejected {
        for_votes: TokenAmount,
        against_votes: TokenAmount,
    },

    #[error("account {0} has not voted on this proposal")]
    NotVoted(AccountId),

    #[error("account {0} is not authorized to administer governance")]
    Unauthorized(AccountId),

    #[error("voting duration {0}s is outside the allowed range")]
    InvalidDuration(u64),

    #[error("proposal threshold must be greater than zero")]
    InvalidThreshold,

    #[error("quorum percentage {0} is outside 1..=100")]
    InvalidPercentage(u8),

    #[error("ledger error: {0}")]
    Ledger(String),

    #[error("arithmetic overflow in governance computation")]
    Overflow,

    #[error("config error: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

/// Coarse classification of a [`GovernanceError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown proposal, or a query about a vote that was never cast.
    NotFound,
    /// Malformed input: empty text, out-of-range parameter, bad config.
    Validation,
    /// Caller failed the access gate.
    Unauthorized,
    /// The request conflicts with the proposal's current state.
    StateConflict,
    /// Caller lacks the balance the operation requires.
    InsufficientStake,
    /// Failure reported by an external collaborator or the host.
    External,
}

impl GovernanceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ProposalNotFound(_) | Self::NotVoted(_) => ErrorKind::NotFound,
            Self::EmptyTitle
            | Self::EmptyDescription
            | Self::InvalidDuration(_)
            | Self::InvalidThreshold
            | Self::InvalidPercentage(_)
            | Self::Config(_) => ErrorKind::Validation,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::VotingNotStarted { .. }
            | Self::VotingEnded { .. }
            | Self::AlreadyVoted(_)
            | Self::VotingStillActive { .. }
            | Self::AlreadyExecuted(_)
            | Self::QuorumNotReached { .. }
            | Self::ProposalRejected { .. } => ErrorKind::StateConflict,
            Self::InsufficientBalance { .. } | Self::NoVotingPower(_) => {
                ErrorKind::InsufficientStake
            }
            Self::Ledger(_) | Self::Overflow | Self::Snapshot(_) => ErrorKind::External,
        }
    }
}
