//! Error types for the demo bank engine
//!
//! Every variant is an expected, recoverable outcome: policy operations
//! return them to the caller, which decides how to present them. None of
//! them is process-fatal.
//!
//! # Error Categories
//!
//! - **Login**: unknown id, locked, restricted, wrong PIN
//! - **Funds**: invalid amount, insufficient funds, daily limit, overflow
//! - **Credentials**: PIN mismatch on withdrawal or PIN change, malformed PIN
//! - **Session / input**: no active session, missing registration field
//! - **Registration**: account number space exhausted
//! - **Adapters**: storage and advisory failures, converted to safe defaults
//!   before they reach a user

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the bank engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// No account is registered under the supplied id
    #[error("Identity verification failed: ID not found")]
    IdentityNotFound {
        /// The id that was looked up
        account: String,
    },

    /// Account was locked after repeated failed PIN checks
    #[error("Security Protocol: Account locked after multiple failed attempts.")]
    AccountLocked {
        account: String,
    },

    /// Account was frozen by its owner
    #[error("Account is currently restricted. Please contact support.")]
    AccountRestricted {
        account: String,
    },

    /// Wrong PIN at login
    ///
    /// The failed-attempt counter has already been bumped when this is returned.
    #[error("Invalid credential combination. Authorization denied.")]
    InvalidCredentials {
        account: String,
        /// Counter value after this failure
        attempts: u32,
    },

    /// Amount is zero or negative
    #[error("Invalid amount '{amount}'")]
    InvalidAmount {
        amount: Decimal,
    },

    /// Withdrawal larger than the balance
    #[error("Insufficient funds for requested operation.")]
    InsufficientFunds {
        account: String,
        available: Decimal,
        requested: Decimal,
    },

    /// Withdrawal would take today's total over the daily limit
    #[error("Daily liquidity limit exceeded.")]
    DailyLimitExceeded {
        account: String,
        /// Amount already withdrawn today
        withdrawn_today: Decimal,
        requested: Decimal,
        limit: Decimal,
    },

    /// Wrong PIN on withdrawal
    #[error("Identity verification failed.")]
    IdentityNotVerified {
        account: String,
    },

    /// Wrong current PIN on PIN change
    #[error("Authentication failed.")]
    AuthenticationFailed {
        account: String,
    },

    /// PIN does not have the required length
    #[error("PIN must be {expected} digits.")]
    InvalidPin {
        expected: usize,
    },

    /// New PIN and its confirmation differ
    #[error("New PINs do not match.")]
    PinMismatch,

    /// A registration field was left empty
    #[error("{field} is required")]
    MissingField {
        field: &'static str,
    },

    /// An operation needing a logged-in user was called without one
    #[error("Authorization required.")]
    NotAuthenticated,

    /// Balance arithmetic would overflow
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        operation: String,
        account: String,
    },

    /// Every drawn account number was already taken
    #[error("Unable to allocate an account number after {attempts} attempts.")]
    AccountNumbersExhausted {
        attempts: usize,
    },

    /// An I/O or encoding failure: persisted state, or command output
    #[error("Storage error: {message}")]
    Storage {
        message: String,
    },

    /// The advisory service failed or timed out
    #[error("Advisory error: {message}")]
    Advisory {
        message: String,
    },
}

// Conversion from io::Error to BankError
impl From<std::io::Error> for BankError {
    fn from(error: std::io::Error) -> Self {
        BankError::Storage {
            message: error.to_string(),
        }
    }
}

// Conversion from serde_json::Error to BankError
impl From<serde_json::Error> for BankError {
    fn from(error: serde_json::Error) -> Self {
        BankError::Storage {
            message: error.to_string(),
        }
    }
}

// Conversion from reqwest::Error to BankError
impl From<reqwest::Error> for BankError {
    fn from(error: reqwest::Error) -> Self {
        BankError::Advisory {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl BankError {
    pub fn identity_not_found(account: &str) -> Self {
        BankError::IdentityNotFound {
            account: account.to_string(),
        }
    }

    pub fn account_locked(account: &str) -> Self {
        BankError::AccountLocked {
            account: account.to_string(),
        }
    }

    pub fn account_restricted(account: &str) -> Self {
        BankError::AccountRestricted {
            account: account.to_string(),
        }
    }

    pub fn invalid_credentials(account: &str, attempts: u32) -> Self {
        BankError::InvalidCredentials {
            account: account.to_string(),
            attempts,
        }
    }

    pub fn invalid_amount(amount: Decimal) -> Self {
        BankError::InvalidAmount { amount }
    }

    pub fn insufficient_funds(account: &str, available: Decimal, requested: Decimal) -> Self {
        BankError::InsufficientFunds {
            account: account.to_string(),
            available,
            requested,
        }
    }

    pub fn daily_limit_exceeded(
        account: &str,
        withdrawn_today: Decimal,
        requested: Decimal,
        limit: Decimal,
    ) -> Self {
        BankError::DailyLimitExceeded {
            account: account.to_string(),
            withdrawn_today,
            requested,
            limit,
        }
    }

    pub fn identity_not_verified(account: &str) -> Self {
        BankError::IdentityNotVerified {
            account: account.to_string(),
        }
    }

    pub fn authentication_failed(account: &str) -> Self {
        BankError::AuthenticationFailed {
            account: account.to_string(),
        }
    }

    pub fn arithmetic_overflow(operation: &str, account: &str) -> Self {
        BankError::ArithmeticOverflow {
            operation: operation.to_string(),
            account: account.to_string(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        BankError::Storage {
            message: message.into(),
        }
    }

    pub fn advisory(message: impl Into<String>) -> Self {
        BankError::Advisory {
            message: message.into(),
        }
    }

    /// Whether the error came from a login attempt
    pub fn is_login_failure(&self) -> bool {
        matches!(
            self,
            BankError::IdentityNotFound { .. }
                | BankError::AccountLocked { .. }
                | BankError::AccountRestricted { .. }
                | BankError::InvalidCredentials { .. }
        )
    }
}
