//! Token amounts.
//!
//! Balances, vote weights and tallies are whole token units held as `u128`.
//! The balance oracle is the authority on what a unit is; the governance core
//! only adds and compares.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount of the governance token, in whole units.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// `floor(self * percent / 100)` without intermediate overflow.
    ///
    /// Splitting the amount into hundreds and a remainder keeps every
    /// partial product within `u128` for any `percent <= 100`.
    pub fn percent_floor(self, percent: u8) -> Self {
        let pct = percent as u128;
        Self((self.0 / 100) * pct + (self.0 % 100) * pct / 100)
    }
}

impl From<u128> for TokenAmount {
    fn from(raw: u128) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
