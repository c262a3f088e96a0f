//! Service layer
//!
//! - `bank`: session handling and persistence around the policy engine

pub mod bank;

pub use bank::{BankService, Clock};
