//! Benchmark suite for the policy engine hot paths
//!
//! Withdrawals scan the account history to total today's withdrawals, so
//! their cost grows with history length. Login is measured against a store
//! holding many accounts.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use chrono::{Duration, Utc};
use demo_bank_engine::{
    Account, AccountRepository, AccountStore, PolicyEngine, Registration, Transaction,
    TransactionType,
};
use rust_decimal::Decimal;

fn main() {
    divan::main();
}

/// Account with `len` transactions, alternating deposits and withdrawals, all
/// but the newest dated on previous days
fn account_with_history(engine: &PolicyEngine, len: usize) -> Account {
    let now = Utc::now();
    let mut account = engine
        .register(
            Registration::new("Bench Holder", "bench@example.com", "555-0100", "1234"),
            now,
        )
        .expect("registration succeeds");
    account.balance = Decimal::new(1_000_000, 0);

    account.transactions = (0..len)
        .map(|i| {
            let tx_type = if i % 2 == 0 {
                TransactionType::Withdrawal
            } else {
                TransactionType::Deposit
            };
            Transaction::completed(
                format!("TX{:07}", i),
                tx_type,
                Decimal::new(10, 0),
                "bench",
                now - Duration::hours(i as i64),
            )
        })
        .collect();
    account
}

#[divan::bench(args = [10, 1_000, 100_000])]
fn withdraw_with_history(bencher: divan::Bencher, len: usize) {
    let engine = PolicyEngine::default();
    let account = account_with_history(&engine, len);

    bencher.bench_local(|| {
        engine
            .withdraw(
                divan::black_box(&account),
                Decimal::new(1, 0),
                "1234",
                Utc::now(),
            )
            .expect("withdrawal succeeds")
    });
}

#[divan::bench(args = [10, 10_000])]
fn login_in_populated_store(bencher: divan::Bencher, accounts: usize) {
    let engine = PolicyEngine::default();
    let now = Utc::now();
    let mut store = AccountStore::from_accounts((0..accounts).map(|i| {
        let mut account = engine
            .register(
                Registration::new("Bench Holder", "bench@example.com", "555-0100", "1234"),
                now,
            )
            .expect("registration succeeds");
        account.id = format!("{}", 1_000_000_000 + i);
        account
    }));
    let target = format!("{}", 1_000_000_000 + accounts / 2);

    bencher.bench_local(|| {
        engine
            .login(&mut store, divan::black_box(&target), "1234")
            .expect("login succeeds")
    });

    assert!(store.contains(&target));
}
