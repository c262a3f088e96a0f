//! Core business logic module
//!
//! This module contains the account ledger and policy components:
//! - `traits` - The `AccountRepository` abstraction shared by both stores
//! - `account_store` - Single-owner arena store
//! - `shared_store` - Thread-safe store with per-account locking
//! - `policy` - Login, deposit, withdrawal, PIN, freeze, and registration rules
//! - `ids` - Account and transaction identifier generation

pub mod account_store;
pub mod ids;
pub mod policy;
pub mod shared_store;
pub mod traits;

pub use account_store::AccountStore;
pub use policy::{PolicyConfig, PolicyEngine};
pub use shared_store::SharedAccountStore;
pub use traits::AccountRepository;
