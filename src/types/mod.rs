//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account record, status, and registration fields
//! - `transaction`: Transaction record, type, and status
//! - `error`: Error types for the bank engine

pub mod account;
pub mod error;
pub mod transaction;

pub use account::{Account, AccountId, AccountStatus, Registration};
pub use error::BankError;
pub use transaction::{Transaction, TransactionId, TransactionStatus, TransactionType};
