//! Account-related types for the demo bank engine
//!
//! This module defines the Account record, its status, and the
//! registration fields used to open one.

use super::transaction::{Transaction, TransactionType};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account identifier
///
/// `"1000"` followed by a random six-digit suffix.
pub type AccountId = String;

/// Lifecycle status of an account
///
/// `Active` is the only status from which the account owner can act.
/// `Locked` follows repeated failed PIN checks and `Frozen` follows an
/// explicit freeze; neither has a self-service way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountStatus {
    #[default]
    Active,
    Frozen,
    Locked,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Frozen => "FROZEN",
            AccountStatus::Locked => "LOCKED",
        };
        f.pad(label)
    }
}

/// A single user's banking profile
///
/// Records are replaced wholesale in the store after every successful
/// operation, so a rejected operation never leaves a partially updated
/// account behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Immutable after creation
    pub id: AccountId,

    pub full_name: String,
    pub email: String,
    pub phone_number: String,

    /// Four-character credential, stored as entered
    ///
    /// Kept in plaintext to stay compatible with existing saved state.
    /// A hardened deployment would store a salted hash instead.
    pub pin: String,

    /// Never negative
    pub balance: Decimal,

    #[serde(default)]
    pub status: AccountStatus,

    /// Consecutive failed PIN checks since the last successful login
    #[serde(default)]
    pub failed_login_attempts: u32,

    /// Most recent first
    #[serde(default)]
    pub transactions: Vec<Transaction>,

    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    /// Sum of withdrawal amounts dated on `day`
    pub fn withdrawn_on(&self, day: NaiveDate) -> Decimal {
        self.transactions
            .iter()
            .filter(|tx| tx.is_withdrawal_on(day))
            .map(|tx| tx.amount)
            .sum()
    }

    /// Transactions of one type, keeping history order
    pub fn transactions_of(&self, tx_type: TransactionType) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(move |tx| tx.tx_type == tx_type)
    }

    /// Prepend a transaction so the history stays most-recent-first
    pub(crate) fn record(&mut self, transaction: Transaction) {
        self.transactions.insert(0, transaction);
    }
}

/// Fields supplied when opening an account
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub pin: String,
}

impl Registration {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
        pin: impl Into<String>,
    ) -> Self {
        Registration {
            full_name: full_name.into(),
            email: email.into(),
            phone_number: phone_number.into(),
            pin: pin.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_account() -> Account {
        Account {
            id: "1000123456".to_string(),
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: "555-0100".to_string(),
            pin: "1234".to_string(),
            balance: Decimal::new(200, 0),
            status: AccountStatus::Active,
            failed_login_attempts: 0,
            transactions: Vec::new(),
            created_at: Utc.with_ymd_and_hms(2026, 10, 1, 8, 0, 0).unwrap(),
        }
    }

    fn tx(tx_type: TransactionType, amount: i64, day: u32, hour: u32) -> Transaction {
        Transaction::completed(
            format!("T{day}{hour}"),
            tx_type,
            Decimal::new(amount, 0),
            "",
            Utc.with_ymd_and_hms(2026, 10, day, hour, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_withdrawn_on_sums_only_same_day_withdrawals() {
        let mut account = sample_account();
        account.record(tx(TransactionType::Withdrawal, 100, 17, 23));
        account.record(tx(TransactionType::Withdrawal, 250, 18, 1));
        account.record(tx(TransactionType::Deposit, 900, 18, 2));
        account.record(tx(TransactionType::Withdrawal, 50, 18, 22));

        let day = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap().date_naive();
        assert_eq!(account.withdrawn_on(day), Decimal::new(300, 0));
    }

    #[test]
    fn test_record_prepends() {
        let mut account = sample_account();
        account.record(tx(TransactionType::Deposit, 1, 18, 1));
        account.record(tx(TransactionType::Withdrawal, 1, 18, 2));

        assert_eq!(account.transactions[0].tx_type, TransactionType::Withdrawal);
        assert_eq!(account.transactions[1].tx_type, TransactionType::Deposit);
    }

    #[test]
    fn test_status_defaults_when_absent_from_stored_json() {
        let json = r#"{
            "id": "1000000001",
            "fullName": "A",
            "email": "a@b.c",
            "phoneNumber": "1",
            "pin": "0000",
            "balance": "10",
            "createdAt": "2026-10-18T00:00:00Z"
        }"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.status, AccountStatus::Active);
        assert_eq!(account.failed_login_attempts, 0);
        assert!(account.transactions.is_empty());
    }
}
