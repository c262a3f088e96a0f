//! Demo Bank Engine Library
//! # Overview
//!
//! A single-user demo banking ledger: account registration, PIN login with
//! lockout, deposits, PIN-confirmed withdrawals under a daily limit, PIN
//! changes, self-service freezing, and an optional AI-generated financial
//! tip. State is persisted as one JSON document.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Account, Transaction, BankError)
//! - [`core`] - Business logic:
//!   - [`core::policy`] - Pure policy rules that turn an account into its next version
//!   - [`core::account_store`] - Keyed account storage for a single session
//!   - [`core::shared_store`] - Concurrent account storage for multi-threaded hosts
//!   - [`core::ids`] - Account number and transaction id generation
//! - [`service`] - Session handling and persistence around the policy engine
//! - [`io`] - JSON state persistence and CSV export
//! - [`advisory`] - Financial tip providers with fixed fallbacks
//! - [`cli`] - Command-line parsing and dispatch
//! - [`config`] / [`logging`] - Runtime configuration and tracing setup
//!
//! # Account States
//!
//! - `ACTIVE`: normal operation
//! - `LOCKED`: too many consecutive failed logins
//! - `FROZEN`: frozen by its owner
//!
//! Locked and frozen accounts cannot log in; nothing in this crate unlocks them.

pub mod advisory;
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod logging;
pub mod service;
pub mod types;

pub use core::{AccountRepository, AccountStore, PolicyConfig, PolicyEngine, SharedAccountStore};
pub use io::{AppState, JsonFileStore, PersistenceAdapter};
pub use service::BankService;
pub use types::{
    Account, AccountId, AccountStatus, BankError, Registration, Transaction, TransactionId,
    TransactionStatus, TransactionType,
};
