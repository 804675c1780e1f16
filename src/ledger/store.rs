//! Account Repository
//!
//! The store the ledger is built on: a mapping from email to account.
//! Loading hands out clones; changes only land through `save`.

use std::collections::BTreeMap;

use crate::aggregate::Account;

/// Storage seam for accounts, keyed by email
pub trait AccountRepository {
    /// Load an account by email
    fn find(&self, email: &str) -> Option<&Account>;

    /// Check whether an email is registered
    fn contains(&self, email: &str) -> bool {
        self.find(email).is_some()
    }

    /// Insert or replace the account under its email
    fn save(&mut self, account: Account);

    /// Number of stored accounts
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All accounts, ordered by email
    fn accounts(&self) -> Vec<&Account>;
}

/// In-memory repository backed by an ordered map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryAccountRepository {
    accounts: BTreeMap<String, Account>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountRepository for InMemoryAccountRepository {
    fn find(&self, email: &str) -> Option<&Account> {
        self.accounts.get(email)
    }

    fn save(&mut self, account: Account) {
        self.accounts
            .insert(account.email().as_str().to_string(), account);
    }

    fn len(&self) -> usize {
        self.accounts.len()
    }

    fn accounts(&self) -> Vec<&Account> {
        self.accounts.values().collect()
    }
}
