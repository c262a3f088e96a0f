//! CSV output for statements and account listings
//!
//! This module centralizes all CSV format concerns:
//! - Transaction statements (one row per history entry, most recent first)
//! - Account listings for admin-style overviews
//!
//! Amounts are written with two decimal places.

use crate::types::{Account, BankError, Transaction};
use std::io::Write;

/// Write a transaction statement as CSV
///
/// Columns: `id,type,amount,date,description,status`. Rows keep the order of
/// `transactions`, so passing an account's history yields a most-recent-first
/// statement. Dates are written as RFC 3339.
///
/// # Errors
///
/// Returns `BankError::Storage` if writing to `output` fails.
pub fn write_statement_csv(
    transactions: &[Transaction],
    output: &mut dyn Write,
) -> Result<(), BankError> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["id", "type", "amount", "date", "description", "status"])
        .map_err(|e| BankError::storage(format!("Failed to write CSV header: {}", e)))?;

    for tx in transactions {
        writer
            .write_record(&[
                tx.id.clone(),
                tx.tx_type.to_string(),
                format!("{:.2}", tx.amount),
                tx.date.to_rfc3339(),
                tx.description.clone(),
                tx.status.as_str().to_string(),
            ])
            .map_err(|e| BankError::storage(format!("Failed to write transaction record: {}", e)))?;
    }

    writer
        .flush()
        .map_err(|e| BankError::storage(format!("Failed to flush output: {}", e)))?;

    Ok(())
}

/// Write an account overview as CSV
///
/// Columns: `id,full_name,status,balance,failed_login_attempts,transactions`.
/// PINs are never written.
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), BankError> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record([
            "id",
            "full_name",
            "status",
            "balance",
            "failed_login_attempts",
            "transactions",
        ])
        .map_err(|e| BankError::storage(format!("Failed to write CSV header: {}", e)))?;

    for account in accounts {
        writer
            .write_record(&[
                account.id.clone(),
                account.full_name.clone(),
                account.status.to_string(),
                format!("{:.2}", account.balance),
                account.failed_login_attempts.to_string(),
                account.transactions.len().to_string(),
            ])
            .map_err(|e| BankError::storage(format!("Failed to write account record: {}", e)))?;
    }

    writer
        .flush()
        .map_err(|e| BankError::storage(format!("Failed to flush output: {}", e)))?;

    Ok(())
}
