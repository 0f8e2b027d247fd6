//! In-memory token ledger and admin list backing daemon runs.
//!
//! These stand in for the real ledger and access control so scripted
//! scenarios can be replayed without any external system.

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use tally_governance::{AccessGate, BalanceOracle, Mintable};
use tally_types::{AccountId, TokenAmount};

use crate::config::DaemonConfig;

/// Balances held in memory. Total supply is the sum of all balances.
#[derive(Default)]
pub struct MemoryLedger {
    balances: Mutex<HashMap<AccountId, TokenAmount>>,
}

impl MemoryLedger {
    pub fn from_config(config: &DaemonConfig) -> anyhow::Result<Self> {
        let ledger = Self::default();
        {
            let mut balances = ledger.lock();
            for (name, amount) in &config.ledger.balances {
                let account = AccountId::new(name.as_str())?;
                balances.insert(account, TokenAmount::new(u128::from(*amount)));
            }
        }
        Ok(ledger)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<AccountId, TokenAmount>> {
        // A poisoned lock only means a panic elsewhere; the map itself is intact.
        self.balances.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Move tokens between accounts.
    pub fn transfer(
        &self,
        from: &AccountId,
        to: &AccountId,
        amount: TokenAmount,
    ) -> Result<(), String> {
        let mut balances = self.lock();
        let from_balance = balances.get(from).copied().unwrap_or_default();
        if from_balance < amount {
            return Err(format!("{from} holds {from_balance}, cannot transfer {amount}"));
        }
        let to_balance = balances.get(to).copied().unwrap_or_default();
        let credited = to_balance
            .checked_add(amount)
            .ok_or_else(|| format!("balance of {to} would overflow"))?;
        balances.insert(from.clone(), TokenAmount::new(from_balance.raw() - amount.raw()));
        balances.insert(to.clone(), credited);
        Ok(())
    }
}

impl BalanceOracle for MemoryLedger {
    fn balance_of(&self, account: &AccountId) -> TokenAmount {
        self.lock().get(account).copied().unwrap_or_default()
    }

    fn total_supply(&self) -> TokenAmount {
        self.lock()
            .values()
            .fold(TokenAmount::ZERO, |acc, b| acc.saturating_add(*b))
    }
}

impl Mintable for MemoryLedger {
    fn mint(&self, to: &AccountId, amount: TokenAmount) -> Result<(), String> {
        let mut balances = self.lock();
        let current = balances.get(to).copied().unwrap_or_default();
        let next = current
            .checked_add(amount)
            .ok_or_else(|| format!("balance of {to} would overflow"))?;
        balances.insert(to.clone(), next);
        Ok(())
    }
}

/// Fixed set of administrator accounts.
pub struct AdminList {
    admins: BTreeSet<AccountId>,
}

impl AdminList {
    pub fn from_config(config: &DaemonConfig) -> anyhow::Result<Self> {
        let admins = config
            .admins
            .iter()
            .map(|name| AccountId::new(name.as_str()))
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self { admins })
    }
}

impl AccessGate for AdminList {
    fn is_admin(&self, caller: &AccountId) -> bool {
        self.admins.contains(caller)
    }
}
