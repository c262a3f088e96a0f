//! Thread-safe account storage for hosts that share the engine
//!
//! This module provides the `SharedAccountStore` struct, which keeps accounts
//! in a `DashMap` so one store can be used from several threads at once.
//!
//! # Thread Safety
//!
//! `update` holds the entry's shard lock for the whole closure, which gives
//! every `find_by_id` + `upsert` pair the read-modify-write atomicity a single
//! threaded owner gets for free. Operations on different accounts do not
//! block each other.

use crate::core::traits::AccountRepository;
use crate::types::{Account, AccountId};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Account record tagged with its registration sequence number
#[derive(Debug, Clone)]
struct Slot {
    seq: u64,
    account: Account,
}

/// Concurrent account collection
#[derive(Debug, Default)]
pub struct SharedAccountStore {
    accounts: DashMap<AccountId, Slot>,
    next_seq: AtomicU64,
}

impl SharedAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<Account> {
        self.accounts.get(id).map(|slot| slot.account.clone())
    }

    /// Replace or append a record; an existing record keeps its registration position
    pub fn upsert(&self, account: Account) {
        let mut entry = self.accounts.entry(account.id.clone()).or_insert_with(|| Slot {
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            account: account.clone(),
        });
        entry.value_mut().account = account;
    }

    /// Clones of all accounts, in registration order
    ///
    /// The result is a point-in-time copy; other threads may change accounts
    /// immediately after it is taken.
    pub fn snapshot(&self) -> Vec<Account> {
        let mut slots: Vec<Slot> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        slots.sort_by_key(|slot| slot.seq);
        slots.into_iter().map(|slot| slot.account).collect()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Run `f` against the record while holding its entry lock
    pub fn update<T, F>(&self, id: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut Account) -> T,
    {
        let mut slot = self.accounts.get_mut(id)?;
        Some(f(&mut slot.account))
    }
}

impl AccountRepository for SharedAccountStore {
    fn find_by_id(&self, id: &str) -> Option<Account> {
        SharedAccountStore::find_by_id(self, id)
    }

    fn upsert(&mut self, account: Account) {
        SharedAccountStore::upsert(self, account)
    }

    fn snapshot(&self) -> Vec<Account> {
        SharedAccountStore::snapshot(self)
    }

    fn len(&self) -> usize {
        SharedAccountStore::len(self)
    }

    fn update<T, F>(&mut self, id: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut Account) -> T,
    {
        SharedAccountStore::update(self, id, f)
    }
}

// Lets several services hold handles onto the same accounts.
impl AccountRepository for Arc<SharedAccountStore> {
    fn find_by_id(&self, id: &str) -> Option<Account> {
        self.as_ref().find_by_id(id)
    }

    fn upsert(&mut self, account: Account) {
        self.as_ref().upsert(account)
    }

    fn snapshot(&self) -> Vec<Account> {
        self.as_ref().snapshot()
    }

    fn len(&self) -> usize {
        self.as_ref().len()
    }

    fn update<T, F>(&mut self, id: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut Account) -> T,
    {
        self.as_ref().update(id, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountStatus;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use std::thread;

    fn account(id: &str) -> Account {
        Account {
            id: id.to_string(),
            full_name: "Holder".to_string(),
            email: "holder@example.com".to_string(),
            phone_number: "555-0100".to_string(),
            pin: "1234".to_string(),
            balance: Decimal::ZERO,
            status: AccountStatus::Active,
            failed_login_attempts: 0,
            transactions: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_snapshot_keeps_registration_order() {
        let store = SharedAccountStore::new();
        for id in ["1000000005", "1000000001", "1000000003"] {
            store.upsert(account(id));
        }
        // Replacing a record must not move it to the end.
        store.upsert(account("1000000005"));

        let ids: Vec<String> = store.snapshot().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["1000000005", "1000000001", "1000000003"]);
    }

    #[test]
    fn test_update_missing_account_returns_none() {
        let store = SharedAccountStore::new();
        assert!(store.update("nope", |_| ()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let mut store = Arc::new(SharedAccountStore::new());
        store.upsert(account("1000000001"));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let mut store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..100 {
                        store.update("1000000001", |acc| {
                            acc.balance += Decimal::ONE;
                        });
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let account = store.find_by_id("1000000001").unwrap();
        assert_eq!(account.balance, Decimal::new(800, 0));
    }

    #[test]
    fn test_arc_handle_implements_repository() {
        let shared = Arc::new(SharedAccountStore::new());
        let mut handle = Arc::clone(&shared);

        AccountRepository::upsert(&mut handle, account("1000000001"));

        assert_eq!(AccountRepository::len(&shared), 1);
        assert!(shared.find_by_id("1000000001").is_some());
    }
}
