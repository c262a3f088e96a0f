//! Core traits for account storage
//!
//! The policy engine and the bank service only see accounts through
//! [`AccountRepository`], so the single-owner arena store and the
//! thread-safe shared store can be used interchangeably.

use crate::types::Account;

/// Authoritative collection of accounts for the current process
///
/// Absence is a normal outcome: lookups return `Option` and never fail.
/// Writes are last-writer-wins with no conflict detection.
pub trait AccountRepository {
    /// Resolve an account by identifier
    fn find_by_id(&self, id: &str) -> Option<Account>;

    /// Replace the record sharing `account.id`, or append it if absent
    fn upsert(&mut self, account: Account);

    /// All accounts, in insertion order
    fn snapshot(&self) -> Vec<Account>;

    /// Number of accounts held
    fn len(&self) -> usize;

    /// Run `f` against the stored record for `id`
    ///
    /// Returns `None` when no such account exists. Whatever `f` leaves in
    /// the record is kept, so implementations that guard against concurrent
    /// writers hold their lock for the whole read-modify-write.
    fn update<T, F>(&mut self, id: &str, f: F) -> Option<T>
    where
        F: FnOnce(&mut Account) -> T;

    fn contains(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
