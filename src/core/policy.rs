//! Account policy engine
//!
//! This module provides the `PolicyEngine`, the rule set that validates and
//! applies login, deposit, withdrawal, PIN change, freeze, and registration
//! requests against a single account record.
//!
//! The engine enforces business rules such as:
//! - Lockout after repeated failed PIN checks (`ACTIVE` → `LOCKED`)
//! - Balance sufficiency and a cumulative daily withdrawal limit
//! - PIN re-verification on withdrawal and PIN change
//!
//! Apart from `login`, which resolves the account through an
//! [`AccountRepository`], every operation takes an account and the current
//! time and returns either an updated copy of the record or a rejection. The
//! input record is never modified, so a rejected request leaves no trace.

use crate::core::ids;
use crate::core::traits::AccountRepository;
use crate::types::{
    Account, AccountStatus, BankError, Registration, Transaction, TransactionType,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::warn;

/// Description used when a deposit is made without a note
pub const DEFAULT_DEPOSIT_DESCRIPTION: &str = "Inbound Clearing";

/// Description attached to every withdrawal
pub const WITHDRAWAL_DESCRIPTION: &str = "ATM/Pos Disbursement";

/// Description of the synthetic deposit created at registration
pub const ENROLLMENT_BONUS_DESCRIPTION: &str = "Tier 1 Enrollment Bonus";

/// Tunable limits of the policy engine
#[derive(Clone, Debug, PartialEq)]
pub struct PolicyConfig {
    /// Maximum cumulative withdrawals per calendar day
    pub daily_withdrawal_limit: Decimal,
    /// Consecutive failed logins that lock an account
    pub max_failed_attempts: u32,
    /// Balance credited on registration
    pub opening_bonus: Decimal,
    /// Required PIN length in characters
    pub pin_length: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            daily_withdrawal_limit: Decimal::new(5000, 0),
            max_failed_attempts: 3,
            opening_bonus: Decimal::new(1000, 0),
            pin_length: 4,
        }
    }
}

impl PolicyConfig {
    /// Create a PolicyConfig with custom values
    ///
    /// Values that would make the engine unusable (a non-positive limit, zero
    /// attempts, a negative bonus, a zero-length PIN) are replaced by the
    /// defaults with a warning.
    pub fn new(
        daily_withdrawal_limit: Decimal,
        max_failed_attempts: u32,
        opening_bonus: Decimal,
        pin_length: usize,
    ) -> Self {
        let default = Self::default();

        let daily_withdrawal_limit = if daily_withdrawal_limit <= Decimal::ZERO {
            warn!(
                "Invalid daily_withdrawal_limit ({}), using default ({})",
                daily_withdrawal_limit, default.daily_withdrawal_limit
            );
            default.daily_withdrawal_limit
        } else {
            daily_withdrawal_limit
        };

        let max_failed_attempts = if max_failed_attempts == 0 {
            warn!(
                "Invalid max_failed_attempts ({}), using default ({})",
                max_failed_attempts, default.max_failed_attempts
            );
            default.max_failed_attempts
        } else {
            max_failed_attempts
        };

        let opening_bonus = if opening_bonus < Decimal::ZERO {
            warn!(
                "Invalid opening_bonus ({}), using default ({})",
                opening_bonus, default.opening_bonus
            );
            default.opening_bonus
        } else {
            opening_bonus
        };

        let pin_length = if pin_length == 0 {
            warn!(
                "Invalid pin_length ({}), using default ({})",
                pin_length, default.pin_length
            );
            default.pin_length
        } else {
            pin_length
        };

        Self {
            daily_withdrawal_limit,
            max_failed_attempts,
            opening_bonus,
            pin_length,
        }
    }
}

/// Rule set for account operations
#[derive(Debug, Clone, Default)]
pub struct PolicyEngine {
    config: PolicyConfig,
}

impl PolicyEngine {
    pub fn new(config: PolicyConfig) -> Self {
        PolicyEngine { config }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Authenticate `supplied_pin` against the account stored under `account_id`
    ///
    /// Checks run in order: existence, `LOCKED`, `FROZEN`, PIN. A wrong PIN
    /// bumps the stored failed-attempt counter (locking the account once it
    /// reaches the configured maximum) even though the call fails; that is
    /// the counter's only mutation path. A correct PIN resets the counter.
    ///
    /// # Errors
    ///
    /// - `IdentityNotFound` if no account has this id
    /// - `AccountLocked` if the account is locked
    /// - `AccountRestricted` if the account is frozen
    /// - `InvalidCredentials` if the PIN does not match
    pub fn login<R>(
        &self,
        store: &mut R,
        account_id: &str,
        supplied_pin: &str,
    ) -> Result<Account, BankError>
    where
        R: AccountRepository,
    {
        store
            .update(account_id, |account| self.authenticate(account, supplied_pin))
            .unwrap_or_else(|| Err(BankError::identity_not_found(account_id)))
    }

    /// Apply the login rules to a record in place
    ///
    /// Returns the authenticated record on success. On a PIN mismatch the
    /// record has already been updated with the new attempt count.
    pub fn authenticate(
        &self,
        account: &mut Account,
        supplied_pin: &str,
    ) -> Result<Account, BankError> {
        match account.status {
            AccountStatus::Locked => return Err(BankError::account_locked(&account.id)),
            AccountStatus::Frozen => return Err(BankError::account_restricted(&account.id)),
            AccountStatus::Active => {}
        }

        if account.pin != supplied_pin {
            account.failed_login_attempts = account.failed_login_attempts.saturating_add(1);
            if account.failed_login_attempts >= self.config.max_failed_attempts {
                account.status = AccountStatus::Locked;
                warn!(
                    account = %account.id,
                    attempts = account.failed_login_attempts,
                    "account locked after repeated failed logins"
                );
            }
            return Err(BankError::invalid_credentials(
                &account.id,
                account.failed_login_attempts,
            ));
        }

        account.failed_login_attempts = 0;
        Ok(account.clone())
    }

    /// Credit `amount` and record a `DEPOSIT`
    ///
    /// An empty `note` is replaced by [`DEFAULT_DEPOSIT_DESCRIPTION`]. There
    /// is no upper bound on the amount.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount` is not strictly positive
    /// - `ArithmeticOverflow` if the balance cannot hold the result
    pub fn deposit(
        &self,
        account: &Account,
        amount: Decimal,
        note: &str,
        now: DateTime<Utc>,
    ) -> Result<Account, BankError> {
        if amount <= Decimal::ZERO {
            return Err(BankError::invalid_amount(amount));
        }

        let balance = account
            .balance
            .checked_add(amount)
            .ok_or_else(|| BankError::arithmetic_overflow("deposit", &account.id))?;

        let note = note.trim();
        let description = if note.is_empty() {
            DEFAULT_DEPOSIT_DESCRIPTION
        } else {
            note
        };

        let mut next = account.clone();
        next.balance = balance;
        next.record(Transaction::completed(
            ids::transaction_id(&mut rand::thread_rng()),
            TransactionType::Deposit,
            amount,
            description,
            now,
        ));
        Ok(next)
    }

    /// Debit `amount` and record a `WITHDRAWAL`
    ///
    /// Checks run in order and short-circuit: PIN, amount sign, balance,
    /// daily limit. "Today" is the calendar day of `now` in the same UTC
    /// representation the transaction dates are stored in.
    ///
    /// # Errors
    ///
    /// - `IdentityNotVerified` if `supplied_pin` does not match
    /// - `InvalidAmount` if `amount` is not strictly positive
    /// - `InsufficientFunds` if `amount` exceeds the balance
    /// - `DailyLimitExceeded` if today's withdrawals plus `amount` exceed the limit
    pub fn withdraw(
        &self,
        account: &Account,
        amount: Decimal,
        supplied_pin: &str,
        now: DateTime<Utc>,
    ) -> Result<Account, BankError> {
        if account.pin != supplied_pin {
            return Err(BankError::identity_not_verified(&account.id));
        }

        if amount <= Decimal::ZERO {
            return Err(BankError::invalid_amount(amount));
        }

        if amount > account.balance {
            return Err(BankError::insufficient_funds(
                &account.id,
                account.balance,
                amount,
            ));
        }

        let withdrawn_today = account.withdrawn_on(now.date_naive());
        let projected = withdrawn_today
            .checked_add(amount)
            .ok_or_else(|| BankError::arithmetic_overflow("withdrawal", &account.id))?;
        if projected > self.config.daily_withdrawal_limit {
            return Err(BankError::daily_limit_exceeded(
                &account.id,
                withdrawn_today,
                amount,
                self.config.daily_withdrawal_limit,
            ));
        }

        let balance = account
            .balance
            .checked_sub(amount)
            .ok_or_else(|| BankError::arithmetic_overflow("withdrawal", &account.id))?;

        let mut next = account.clone();
        next.balance = balance;
        next.record(Transaction::completed(
            ids::transaction_id(&mut rand::thread_rng()),
            TransactionType::Withdrawal,
            amount,
            WITHDRAWAL_DESCRIPTION,
            now,
        ));
        Ok(next)
    }

    /// How much more may be withdrawn on the calendar day of `now`
    pub fn remaining_daily_allowance(&self, account: &Account, now: DateTime<Utc>) -> Decimal {
        let withdrawn = account.withdrawn_on(now.date_naive());
        (self.config.daily_withdrawal_limit - withdrawn).max(Decimal::ZERO)
    }

    /// Replace the PIN
    ///
    /// # Errors
    ///
    /// - `InvalidPin` if `next_pin` is not exactly the configured length
    /// - `AuthenticationFailed` if `current_pin` does not match
    pub fn change_pin(
        &self,
        account: &Account,
        current_pin: &str,
        next_pin: &str,
    ) -> Result<Account, BankError> {
        if next_pin.chars().count() != self.config.pin_length {
            return Err(BankError::InvalidPin {
                expected: self.config.pin_length,
            });
        }

        if account.pin != current_pin {
            return Err(BankError::authentication_failed(&account.id));
        }

        let mut next = account.clone();
        next.pin = next_pin.to_string();
        Ok(next)
    }

    /// Mark the account `FROZEN`
    ///
    /// Unconditional. Ending any session on the account is up to the caller.
    pub fn freeze(&self, account: &Account) -> Account {
        let mut next = account.clone();
        next.status = AccountStatus::Frozen;
        next
    }

    /// Open a new `ACTIVE` account credited with the opening bonus
    ///
    /// The id is freshly generated; it is not checked against existing
    /// accounts here, and neither are the email or phone number.
    ///
    /// # Errors
    ///
    /// - `MissingField` if the name, email, or phone number is blank
    /// - `InvalidPin` if the PIN is not exactly the configured length
    pub fn register(
        &self,
        registration: Registration,
        now: DateTime<Utc>,
    ) -> Result<Account, BankError> {
        let Registration {
            full_name,
            email,
            phone_number,
            pin,
        } = registration;

        for (field, value) in [
            ("fullName", &full_name),
            ("email", &email),
            ("phoneNumber", &phone_number),
        ] {
            if value.trim().is_empty() {
                return Err(BankError::MissingField { field });
            }
        }

        if pin.chars().count() != self.config.pin_length {
            return Err(BankError::InvalidPin {
                expected: self.config.pin_length,
            });
        }

        let mut rng = rand::thread_rng();
        let mut account = Account {
            id: ids::account_id(&mut rng),
            full_name: full_name.trim().to_string(),
            email: email.trim().to_string(),
            phone_number: phone_number.trim().to_string(),
            pin,
            balance: self.config.opening_bonus,
            status: AccountStatus::Active,
            failed_login_attempts: 0,
            transactions: Vec::new(),
            created_at: now,
        };

        if self.config.opening_bonus > Decimal::ZERO {
            account.record(Transaction::completed(
                ids::transaction_id(&mut rng),
                TransactionType::Deposit,
                self.config.opening_bonus,
                ENROLLMENT_BONUS_DESCRIPTION,
                now,
            ));
        }

        Ok(account)
    }
}
