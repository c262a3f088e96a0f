//! Account storage module
//!
//! This module provides the `AccountStore` struct which holds every account
//! registered in the current process.
//!
//! Accounts live in an arena (`Vec<Account>`) addressed through an
//! id-to-index map, so lookups and in-place replacement are O(1) and the
//! snapshot keeps registration order for persistence and listing.

use crate::core::traits::AccountRepository;
use crate::types::{Account, AccountId};
use std::collections::HashMap;

/// Single-owner in-memory account collection
#[derive(Debug, Default, Clone)]
pub struct AccountStore {
    /// Accounts in registration order
    accounts: Vec<Account>,

    /// Position of each account in `accounts`
    index: HashMap<AccountId, usize>,
}

impl AccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        AccountStore {
            accounts: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a store from previously persisted accounts
    ///
    /// Later duplicates of the same id replace earlier ones, matching
    /// what successive `upsert` calls would do.
    pub fn from_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let mut store = Self::new();
        for account in accounts {
            store.upsert(account);
        }
        store
    }
}

impl AccountRepository for AccountStore {
    fn find_by_id(&self, id: &str) -> Option<Account> {
        self.index.get(id).map(|&slot| self.accounts[slot].clone())
    }

    fn upsert(&mut self, account: Account) {
        match self.index.get(&account.id) {
            Some(&slot) => self.accounts[slot] = account,
            None => {
                self.index.insert(account.id.clone(), self.accounts.len());
                self.accounts.push(account);
            }
        }
    }

    fn snapshot(&self) -> Vec<Account> {
        self.accounts.clone()
    }

    fn len(&self) -> usize {
        self.accounts.len()
    }

    fn update<T, F>(&mut self, id: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut Account) -> T,
    {
        let slot = *self.index.get(id)?;
        Some(f(&mut self.accounts[slot]))
    }

    fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }
}
