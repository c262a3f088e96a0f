//! Session-level orchestration of the policy engine
//!
//! `BankService` owns the account store, the policy engine, the persistence
//! adapter and the session flags of a single-user front end. Every state
//! change is written back through the persistence adapter before the call
//! returns.

use crate::advisory::{advice_or_fallback, AdvisoryProvider};
use crate::core::ids;
use crate::core::{AccountRepository, PolicyEngine};
use crate::io::{AppState, PersistenceAdapter};
use crate::types::{
    Account, AccountId, AccountStatus, BankError, Registration, Transaction, TransactionType,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Registration gives up after this many account-number collisions in a row
const MAX_ID_ATTEMPTS: usize = 16;

/// Source of the current time for transaction dates and the daily window
pub type Clock = fn() -> DateTime<Utc>;

/// Single-user banking session over a persistent account store
pub struct BankService<R, P> {
    store: R,
    engine: PolicyEngine,
    persistence: P,
    current_account: Option<AccountId>,
    dark_mode: bool,
    clock: Clock,
}

impl<R, P> BankService<R, P>
where
    R: AccountRepository,
    P: PersistenceAdapter,
{
    /// Load the saved state into `store` and resume any saved session
    ///
    /// A saved session pointing at an account that no longer exists, or
    /// that is locked or frozen, is dropped.
    pub fn open(mut store: R, engine: PolicyEngine, persistence: P) -> Self {
        let AppState {
            all_accounts,
            current_account,
            is_dark_mode,
        } = persistence.load();

        for account in all_accounts {
            store.upsert(account);
        }

        let current_account = current_account.filter(|id| match store.find_by_id(id) {
            Some(account) if account.is_active() => true,
            Some(account) => {
                warn!(
                    account = %id,
                    status = %account.status,
                    "saved session refers to inactive account, logging out"
                );
                false
            }
            None => {
                warn!(account = %id, "saved session refers to unknown account, logging out");
                false
            }
        });

        info!(
            accounts = store.len(),
            logged_in = current_account.is_some(),
            "bank state opened"
        );

        BankService {
            store,
            engine,
            persistence,
            current_account,
            dark_mode: is_dark_mode,
            clock: Utc::now,
        }
    }

    /// Replace the wall clock, e.g. to pin "today" in tests
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn engine(&self) -> &PolicyEngine {
        &self.engine
    }

    pub fn store(&self) -> &R {
        &self.store
    }

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_account.is_some()
    }

    /// Full state as it would be persisted
    pub fn state(&self) -> AppState {
        AppState {
            all_accounts: self.store.snapshot(),
            current_account: self.current_account.clone(),
            is_dark_mode: self.dark_mode,
        }
    }

    fn persist(&self) {
        self.persistence.save(&self.state());
    }

    /// Open an account and log into it
    pub fn register(&mut self, registration: Registration) -> Result<Account, BankError> {
        let mut account = self.engine.register(registration, (self.clock)())?;

        let mut attempts = 1;
        while self.store.contains(&account.id) {
            if attempts >= MAX_ID_ATTEMPTS {
                return Err(BankError::AccountNumbersExhausted {
                    attempts: MAX_ID_ATTEMPTS,
                });
            }
            debug!(account = %account.id, "account number taken, drawing another");
            account.id = ids::account_id(&mut rand::thread_rng());
            attempts += 1;
        }

        self.store.upsert(account.clone());
        self.current_account = Some(account.id.clone());
        self.persist();

        info!(account = %account.id, "account registered");
        Ok(account)
    }

    /// Authenticate and start a session
    ///
    /// Failed PIN checks are persisted too, since they move the lockout
    /// counter. A rejected login against the account of the running session
    /// ends that session.
    pub fn login(&mut self, account_id: &str, pin: &str) -> Result<Account, BankError> {
        let result = self.engine.login(&mut self.store, account_id, pin);

        match &result {
            Ok(account) => {
                self.current_account = Some(account.id.clone());
                self.persist();
                info!(account = %account.id, "login succeeded");
            }
            Err(err) => self.reject_login(account_id, err),
        }

        result
    }

    fn reject_login(&mut self, account_id: &str, err: &BankError) {
        let ends_session =
            err.is_login_failure() && self.current_account.as_deref() == Some(account_id);
        if ends_session {
            self.current_account = None;
            info!(account = %account_id, "session ended by rejected login");
        }

        match err {
            BankError::InvalidCredentials { attempts, .. } => {
                self.persist();
                warn!(account = %account_id, attempts = *attempts, "login failed: wrong PIN");
            }
            _ => {
                if ends_session {
                    self.persist();
                }
                warn!(account = %account_id, "login rejected: {}", err);
            }
        }
    }

    /// End the session, if any
    pub fn logout(&mut self) {
        if let Some(id) = self.current_account.take() {
            self.persist();
            info!(account = %id, "logged out");
        }
    }

    /// The logged-in account
    ///
    /// # Errors
    ///
    /// - `NotAuthenticated` without a session
    /// - `AccountLocked` / `AccountRestricted` if the account was locked or
    ///   frozen while the session was open
    pub fn current_account(&self) -> Result<Account, BankError> {
        let account = self
            .current_account
            .as_deref()
            .and_then(|id| self.store.find_by_id(id))
            .ok_or(BankError::NotAuthenticated)?;
        ensure_active(&account)?;
        Ok(account)
    }

    /// Run a copy-on-write policy operation against the session account
    fn apply<F>(&mut self, operation: &'static str, f: F) -> Result<Account, BankError>
    where
        F: FnOnce(&PolicyEngine, &Account) -> Result<Account, BankError>,
    {
        let id = self
            .current_account
            .clone()
            .ok_or(BankError::NotAuthenticated)?;
        let engine = &self.engine;

        let result = self
            .store
            .update(&id, |account| {
                ensure_active(account)?;
                let next = f(engine, account)?;
                *account = next.clone();
                Ok(next)
            })
            .unwrap_or(Err(BankError::NotAuthenticated));

        match &result {
            Ok(_) => {
                self.persist();
                debug!(account = %id, operation, "operation applied");
            }
            Err(err) => debug!(account = %id, operation, "operation rejected: {}", err),
        }
        result
    }

    pub fn deposit(&mut self, amount: Decimal, note: &str) -> Result<Account, BankError> {
        let now = (self.clock)();
        self.apply("deposit", |engine, account| {
            engine.deposit(account, amount, note, now)
        })
    }

    pub fn withdraw(&mut self, amount: Decimal, pin: &str) -> Result<Account, BankError> {
        let now = (self.clock)();
        self.apply("withdraw", |engine, account| {
            engine.withdraw(account, amount, pin, now)
        })
    }

    pub fn change_pin(&mut self, current_pin: &str, next_pin: &str) -> Result<Account, BankError> {
        self.apply("change_pin", |engine, account| {
            engine.change_pin(account, current_pin, next_pin)
        })
    }

    /// Freeze the session account and end the session
    pub fn freeze(&mut self) -> Result<Account, BankError> {
        let frozen = self.apply("freeze", |engine, account| Ok(engine.freeze(account)))?;
        self.current_account = None;
        self.persist();
        info!(account = %frozen.id, "account frozen by owner");
        Ok(frozen)
    }

    /// Flip the theme flag and return the new value
    pub fn toggle_theme(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.persist();
        self.dark_mode
    }

    /// Remaining withdrawal allowance for today
    pub fn remaining_daily_allowance(&self) -> Result<Decimal, BankError> {
        let account = self.current_account()?;
        Ok(self.engine.remaining_daily_allowance(&account, (self.clock)()))
    }

    /// Session account's history, most recent first, optionally of one type
    pub fn history(&self, tx_type: Option<TransactionType>) -> Result<Vec<Transaction>, BankError> {
        let account = self.current_account()?;
        Ok(match tx_type {
            Some(tx_type) => account.transactions_of(tx_type).cloned().collect(),
            None => account.transactions,
        })
    }

    /// Every account, in registration order
    pub fn accounts(&self) -> Vec<Account> {
        self.store.snapshot()
    }

    /// Financial tip for the session account
    ///
    /// Provider failures never surface here; only a missing session does.
    pub async fn financial_tip<A>(&self, advisor: &A, timeout: Duration) -> Result<String, BankError>
    where
        A: AdvisoryProvider + ?Sized,
    {
        let account = self.current_account()?;
        Ok(advice_or_fallback(advisor, &account.transactions, account.balance, timeout).await)
    }
}

/// Reject a session account that is no longer `ACTIVE`
fn ensure_active(account: &Account) -> Result<(), BankError> {
    if account.is_active() {
        return Ok(());
    }
    Err(match account.status {
        AccountStatus::Locked => BankError::account_locked(&account.id),
        _ => BankError::account_restricted(&account.id),
    })
}
