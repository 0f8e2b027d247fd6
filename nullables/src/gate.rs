//! Nullable access gate.

use std::collections::HashSet;
use std::sync::Mutex;

use tally_governance::AccessGate;
use tally_types::AccountId;

/// An access gate backed by an editable admin set.
pub struct NullAccessGate {
    admins: Mutex<HashSet<AccountId>>,
}

impl NullAccessGate {
    /// A gate that admits nobody.
    pub fn new() -> Self {
        Self {
            admins: Mutex::new(HashSet::new()),
        }
    }

    /// A gate that admits exactly `admin`.
    pub fn with_admin(admin: &AccountId) -> Self {
        let gate = Self::new();
        gate.grant(admin);
        gate
    }

    pub fn grant(&self, account: &AccountId) {
        self.admins.lock().unwrap().insert(account.clone());
    }

    pub fn revoke(&self, account: &AccountId) {
        self.admins.lock().unwrap().remove(account);
    }
}

impl Default for NullAccessGate {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessGate for NullAccessGate {
    fn is_admin(&self, caller: &AccountId) -> bool {
        self.admins.lock().unwrap().contains(caller)
    }
}
