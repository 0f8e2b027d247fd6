//! External collaborators consumed by the governance engine.
//!
//! The token ledger and the administrator check live outside this crate.
//! Both are read synchronously and must reflect state as of the call.

use std::sync::Arc;

use tally_types::{AccountId, TokenAmount};

/// Read access to the governance token's ledger.
pub trait BalanceOracle {
    /// Current balance of `account`.
    fn balance_of(&self, account: &AccountId) -> TokenAmount;

    /// Current total supply.
    fn total_supply(&self) -> TokenAmount;
}

/// Ledgers that can issue new supply.
///
/// Governance only forwards mint requests after the access check; issuance
/// rules belong to the ledger.
pub trait Mintable: BalanceOracle {
    fn mint(&self, to: &AccountId, amount: TokenAmount) -> Result<(), String>;
}

/// Decides who may change governance parameters and mint.
pub trait AccessGate {
    fn is_admin(&self, caller: &AccountId) -> bool;
}

impl<T: BalanceOracle + ?Sized> BalanceOracle for Arc<T> {
    fn balance_of(&self, account: &AccountId) -> TokenAmount {
        (**self).balance_of(account)
    }

    fn total_supply(&self) -> TokenAmount {
        (**self).total_supply()
    }
}

impl<T: Mintable + ?Sized> Mintable for Arc<T> {
    fn mint(&self, to: &AccountId, amount: TokenAmount) -> Result<(), String> {
        (**self).mint(to, amount)
    }
}

impl<T: AccessGate + ?Sized> AccessGate for Arc<T> {
    fn is_admin(&self, caller: &AccountId) -> bool {
        (**self).is_admin(caller)
    }
}
