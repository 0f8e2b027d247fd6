//! Nullable ledger: an in-memory balance oracle.

use std::collections::HashMap;
use std::sync::Mutex;

use tally_governance::{BalanceOracle, Mintable};
use tally_types::{AccountId, TokenAmount};

/// An in-memory token ledger for testing.
///
/// Balances can be set directly; total supply is tracked as the sum of all
/// balances unless pinned with [`NullLedger::pin_total_supply`].
pub struct NullLedger {
    balances: Mutex<HashMap<AccountId, TokenAmount>>,
    pinned_supply: Mutex<Option<TokenAmount>>,
    fail_mints: Mutex<Option<String>>,
}

impl NullLedger {
    pub fn new() -> Self {
        Self {
            balances: Mutex::new(HashMap::new()),
            pinned_supply: Mutex::new(None),
            fail_mints: Mutex::new(None),
        }
    }

    /// Build a ledger from `(account, balance)` pairs.
    pub fn with_balances<'a>(entries: impl IntoIterator<Item = (&'a AccountId, u128)>) -> Self {
        let ledger = Self::new();
        for (account, amount) in entries {
            ledger.set_balance(account, amount);
        }
        ledger
    }

    pub fn set_balance(&self, account: &AccountId, amount: u128) {
        self.balances
            .lock()
            .unwrap()
            .insert(account.clone(), TokenAmount::new(amount));
    }

    /// Move `amount` between accounts. Panics if `from` cannot cover it.
    pub fn transfer(&self, from: &AccountId, to: &AccountId, amount: u128) {
        let mut balances = self.balances.lock().unwrap();
        let from_balance = balances.get(from).map(|b| b.raw()).unwrap_or(0);
        assert!(from_balance >= amount, "NullLedger: transfer exceeds balance");
        balances.insert(from.clone(), TokenAmount::new(from_balance - amount));
        let to_balance = balances.get(to).map(|b| b.raw()).unwrap_or(0);
        balances.insert(to.clone(), TokenAmount::new(to_balance + amount));
    }

    /// Report a fixed total supply regardless of balances.
    pub fn pin_total_supply(&self, supply: u128) {
        *self.pinned_supply.lock().unwrap() = Some(TokenAmount::new(supply));
    }

    /// Make every subsequent mint fail with `reason`.
    pub fn fail_mints_with(&self, reason: impl Into<String>) {
        *self.fail_mints.lock().unwrap() = Some(reason.into());
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl BalanceOracle for NullLedger {
    fn balance_of(&self, account: &AccountId) -> TokenAmount {
        self.balances
            .lock()
            .unwrap()
            .get(account)
            .copied()
            .unwrap_or(TokenAmount::ZERO)
    }

    fn total_supply(&self) -> TokenAmount {
        if let Some(pinned) = *self.pinned_supply.lock().unwrap() {
            return pinned;
        }
        self.balances
            .lock()
            .unwrap()
            .values()
            .fold(TokenAmount::ZERO, |acc, b| acc.saturating_add(*b))
    }
}

impl Mintable for NullLedger {
    fn mint(&self, to: &AccountId, amount: TokenAmount) -> Result<(), String> {
        if let Some(reason) = self.fail_mints.lock().unwrap().clone() {
            return Err(reason);
        }
        let mut balances = self.balances.lock().unwrap();
        let current = balances.get(to).copied().unwrap_or(TokenAmount::ZERO);
        let next = current
            .checked_add(amount)
            .ok_or_else(|| format!("balance of {to} would overflow"))?;
        balances.insert(to.clone(), next);
        drop(balances);
        if let Some(pinned) = self.pinned_supply.lock().unwrap().as_mut() {
            *pinned = pinned.saturating_add(amount);
        }
        Ok(())
    }
}
