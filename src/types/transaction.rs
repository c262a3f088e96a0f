//! Transaction-related types for the demo bank engine
//!
//! This module defines the transaction record appended to an account's
//! history by every completed deposit or withdrawal.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction identifier
///
/// Nine uppercase base-36 characters, generated at creation.
pub type TransactionId = String;

/// Kinds of ledger movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Credit funds to an account
    Deposit,

    /// Debit funds from an account
    Withdrawal,

    /// Reserved. Declared by the stored format but never produced by the engine.
    Transfer,
}

impl TransactionType {
    /// Upper-case label used in persisted state and statements
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "DEPOSIT",
            TransactionType::Withdrawal => "WITHDRAWAL",
            TransactionType::Transfer => "TRANSFER",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Settlement state of a transaction
///
/// Every locally created transaction is `Completed`; the other states exist
/// only so that persisted data from other writers still deserializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    #[default]
    Completed,
    Pending,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Completed => "COMPLETED",
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Failed => "FAILED",
        }
    }
}

/// A completed deposit or withdrawal
///
/// Transactions are immutable once created; an account only ever prepends
/// new ones to its history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,

    #[serde(rename = "type")]
    pub tx_type: TransactionType,

    /// Always strictly positive
    pub amount: Decimal,

    /// Creation time, serialized as ISO-8601
    pub date: DateTime<Utc>,

    pub description: String,

    #[serde(default)]
    pub status: TransactionStatus,
}

impl Transaction {
    /// Create a completed transaction dated `now`
    pub fn completed(
        id: TransactionId,
        tx_type: TransactionType,
        amount: Decimal,
        description: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Transaction {
            id,
            tx_type,
            amount,
            date: now,
            description: description.into(),
            status: TransactionStatus::Completed,
        }
    }

    /// Calendar day of the ISO-8601 timestamp
    ///
    /// Equivalent to taking the `YYYY-MM-DD` prefix of the stored string; no
    /// timezone normalization is applied beyond the UTC representation.
    pub fn calendar_day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    /// Whether this is a withdrawal dated on `day`
    pub fn is_withdrawal_on(&self, day: NaiveDate) -> bool {
        self.tx_type == TransactionType::Withdrawal && self.calendar_day() == day
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[rstest]
    #[case::deposit(TransactionType::Deposit, "\"DEPOSIT\"")]
    #[case::withdrawal(TransactionType::Withdrawal, "\"WITHDRAWAL\"")]
    #[case::transfer(TransactionType::Transfer, "\"TRANSFER\"")]
    fn test_type_serializes_upper_case(#[case] tx_type: TransactionType, #[case] json: &str) {
        assert_eq!(serde_json::to_string(&tx_type).unwrap(), json);
        assert_eq!(tx_type.to_string(), json.trim_matches('"'));
    }

    #[test]
    fn test_transaction_uses_camel_case_wire_names() {
        let tx = Transaction::completed(
            "ABC123XYZ".to_string(),
            TransactionType::Deposit,
            Decimal::new(1000, 0),
            "Tier 1 Enrollment Bonus",
            at(2026, 10, 18, 9),
        );

        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["type"], "DEPOSIT");
        assert_eq!(value["status"], "COMPLETED");
        assert_eq!(value["amount"], "1000");
        assert!(value["date"].as_str().unwrap().starts_with("2026-10-18T09:00:00"));
    }

    #[test]
    fn test_missing_status_defaults_to_completed() {
        let json = r#"{"id":"A","type":"WITHDRAWAL","amount":"5","date":"2026-10-18T09:00:00Z","description":"x"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.status, TransactionStatus::Completed);
    }

    #[rstest]
    #[case::same_day_withdrawal(TransactionType::Withdrawal, at(2026, 10, 18, 23), true)]
    #[case::previous_day(TransactionType::Withdrawal, at(2026, 10, 17, 23), false)]
    #[case::deposit_same_day(TransactionType::Deposit, at(2026, 10, 18, 1), false)]
    fn test_is_withdrawal_on(
        #[case] tx_type: TransactionType,
        #[case] date: DateTime<Utc>,
        #[case] expected: bool,
    ) {
        let tx = Transaction::completed("T".into(), tx_type, Decimal::ONE, "", date);
        let day = at(2026, 10, 18, 0).date_naive();
        assert_eq!(tx.is_withdrawal_on(day), expected);
    }
}
