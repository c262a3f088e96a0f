use super::args::Command;
use crate::advisory::{AdvisoryProvider, GeminiAdvisor, StaticAdvisor};
use crate::config::AppConfig;
use crate::core::{AccountStore, PolicyEngine};
use crate::io::{write_accounts_csv, write_statement_csv, JsonFileStore};
use crate::service::BankService;
use crate::types::{Account, BankError, Registration, TransactionType};
use std::io::Write;

/// Service type the binary drives: in-memory store persisted to a JSON file
pub type FileBackedBank = BankService<AccountStore, JsonFileStore>;

/// Open the bank described by `config`
pub fn open_bank(config: &AppConfig) -> FileBackedBank {
    BankService::open(
        AccountStore::new(),
        PolicyEngine::new(config.policy.clone()),
        JsonFileStore::new(&config.data_file),
    )
}

/// Execute one command against the persisted state
///
/// # Arguments
///
/// * `command` - The parsed subcommand
/// * `config` - Runtime configuration (state file, policy, advisory settings)
/// * `out` - Destination for human-readable or CSV output
///
/// # Errors
///
/// Returns the policy error that rejected the command, or `Storage` when the
/// output cannot be written.
pub fn run(command: Command, config: &AppConfig, out: &mut dyn Write) -> Result<(), BankError> {
    let mut bank = open_bank(config);

    match command {
        Command::Register {
            full_name,
            email,
            phone_number,
            pin,
        } => {
            let account =
                bank.register(Registration::new(full_name, email, phone_number, pin))?;
            writeln!(out, "Account {} opened for {}.", account.id, account.full_name)?;
            write_balance(out, &account)?;
        }
        Command::Login { account_id, pin } => {
            let account = bank.login(&account_id, &pin)?;
            writeln!(out, "Welcome back, {}.", account.full_name)?;
            write_balance(out, &account)?;
        }
        Command::Logout => {
            bank.logout();
            writeln!(out, "Logged out.")?;
        }
        Command::Balance => {
            let account = bank.current_account()?;
            writeln!(out, "{} ({}) [{}]", account.full_name, account.id, account.status)?;
            write_balance(out, &account)?;
            writeln!(
                out,
                "Remaining today: {:.2}",
                bank.remaining_daily_allowance()?
            )?;
        }
        Command::Deposit { amount, note } => {
            let account = bank.deposit(amount, &note)?;
            writeln!(out, "Deposited {:.2}.", amount)?;
            write_balance(out, &account)?;
        }
        Command::Withdraw { amount, pin } => {
            let account = bank.withdraw(amount, &pin)?;
            writeln!(out, "Withdrew {:.2}.", amount)?;
            write_balance(out, &account)?;
        }
        Command::ChangePin {
            current,
            next,
            confirm,
        } => {
            if next != confirm {
                return Err(BankError::PinMismatch);
            }
            bank.change_pin(&current, &next)?;
            writeln!(out, "PIN updated.")?;
        }
        Command::Freeze => {
            let account = bank.freeze()?;
            writeln!(out, "Account {} frozen. You have been logged out.", account.id)?;
        }
        Command::History { tx_type, csv } => {
            let history = bank.history(tx_type.map(TransactionType::from))?;
            if csv {
                write_statement_csv(&history, out)?;
            } else if history.is_empty() {
                writeln!(out, "No transactions.")?;
            } else {
                for tx in &history {
                    let sign = if tx.tx_type == TransactionType::Withdrawal {
                        "-"
                    } else {
                        "+"
                    };
                    writeln!(
                        out,
                        "{}  {:<10} {}{:.2}  {}",
                        tx.date.format("%Y-%m-%d %H:%M"),
                        tx.tx_type,
                        sign,
                        tx.amount,
                        tx.description
                    )?;
                }
            }
        }
        Command::Accounts { csv } => {
            let accounts = bank.accounts();
            if csv {
                write_accounts_csv(&accounts, out)?;
            } else {
                for account in &accounts {
                    writeln!(
                        out,
                        "{}  {:<8} {:.2}  {}",
                        account.id, account.status, account.balance, account.full_name
                    )?;
                }
            }
        }
        Command::Theme => {
            let dark = bank.toggle_theme();
            writeln!(out, "Theme: {}", if dark { "dark" } else { "light" })?;
        }
        Command::Advice => {
            let advisor: Box<dyn AdvisoryProvider> = match &config.gemini {
                Some(gemini) => Box::new(GeminiAdvisor::new(gemini.clone())),
                None => Box::new(StaticAdvisor::default()),
            };
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let tip = runtime.block_on(bank.financial_tip(advisor.as_ref(), config.advice_timeout))?;
            writeln!(out, "{}", tip)?;
        }
    }

    Ok(())
}

fn write_balance(out: &mut dyn Write, account: &Account) -> Result<(), BankError> {
    writeln!(out, "Balance: {:.2}", account.balance)?;
    Ok(())
}
