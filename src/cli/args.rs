use crate::advisory::gemini::DEFAULT_MODEL;
use crate::advisory::GeminiConfig;
use crate::config::{resolve_api_key, AppConfig, DEFAULT_DATA_FILE};
use crate::core::PolicyConfig;
use crate::types::TransactionType;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::time::Duration;

/// Single-user demo bank: accounts, deposits, withdrawals, and PIN management
#[derive(Parser, Debug)]
#[command(name = "demo-bank")]
#[command(about = "Single-user demo bank backed by a local JSON file", long_about = None)]
pub struct CliArgs {
    /// File holding accounts and session state
    #[arg(
        long = "data-file",
        value_name = "PATH",
        env = "DEMO_BANK_DATA",
        default_value = DEFAULT_DATA_FILE
    )]
    pub data_file: PathBuf,

    /// Maximum cumulative withdrawals per calendar day
    #[arg(long = "daily-limit", value_name = "AMOUNT")]
    pub daily_limit: Option<Decimal>,

    /// Consecutive failed logins before an account is locked
    #[arg(long = "max-failed-attempts", value_name = "COUNT")]
    pub max_failed_attempts: Option<u32>,

    /// Seconds to wait for the advisory provider
    #[arg(long = "advice-timeout-secs", value_name = "SECS", default_value_t = 10)]
    pub advice_timeout_secs: u64,

    /// API key for the advisory provider (falls back to API_KEY)
    #[arg(long = "api-key", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Advisory model name
    #[arg(long = "model", env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Open a new account and log into it
    Register {
        #[arg(long = "name")]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long = "phone")]
        phone_number: String,
        /// Exactly 4 digits
        #[arg(long)]
        pin: String,
    },

    /// Log into an existing account
    Login {
        /// Account number, e.g. 1000123456
        account_id: String,
        #[arg(long)]
        pin: String,
    },

    /// End the current session
    Logout,

    /// Show the logged-in account and balance
    #[command(alias = "whoami")]
    Balance,

    /// Deposit funds into the logged-in account
    Deposit {
        amount: Decimal,
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Withdraw funds from the logged-in account
    Withdraw {
        amount: Decimal,
        #[arg(long)]
        pin: String,
    },

    /// Change the PIN of the logged-in account
    ChangePin {
        #[arg(long)]
        current: String,
        #[arg(long = "new")]
        next: String,
        #[arg(long)]
        confirm: String,
    },

    /// Freeze the logged-in account and log out
    Freeze,

    /// List the logged-in account's transactions, most recent first
    History {
        #[arg(long = "type", value_name = "TYPE")]
        tx_type: Option<TxTypeArg>,
        /// Write the statement as CSV
        #[arg(long)]
        csv: bool,
    },

    /// List every registered account
    Accounts {
        #[arg(long)]
        csv: bool,
    },

    /// Toggle between light and dark theme
    Theme,

    /// Ask for a short financial tip
    Advice,
}

/// History filter accepted on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TxTypeArg {
    Deposit,
    Withdrawal,
}

impl From<TxTypeArg> for TransactionType {
    fn from(arg: TxTypeArg) -> Self {
        match arg {
            TxTypeArg::Deposit => TransactionType::Deposit,
            TxTypeArg::Withdrawal => TransactionType::Withdrawal,
        }
    }
}

impl CliArgs {
    /// Create an AppConfig from CLI arguments
    ///
    /// Policy limits that are not given keep their defaults; invalid ones are
    /// replaced by defaults with a warning.
    pub fn to_app_config(&self) -> AppConfig {
        let default = PolicyConfig::default();
        let policy = if self.daily_limit.is_some() || self.max_failed_attempts.is_some() {
            PolicyConfig::new(
                self.daily_limit.unwrap_or(default.daily_withdrawal_limit),
                self.max_failed_attempts
                    .unwrap_or(default.max_failed_attempts),
                default.opening_bonus,
                default.pin_length,
            )
        } else {
            default
        };

        let gemini = resolve_api_key(self.api_key.clone())
            .map(|key| GeminiConfig::new(key).with_model(self.model.clone()));

        AppConfig {
            data_file: self.data_file.clone(),
            policy,
            gemini,
            advice_timeout: Duration::from_secs(self.advice_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::logout(&["demo-bank", "logout"], Command::Logout)]
    #[case::balance(&["demo-bank", "balance"], Command::Balance)]
    #[case::whoami_alias(&["demo-bank", "whoami"], Command::Balance)]
    #[case::freeze(&["demo-bank", "freeze"], Command::Freeze)]
    #[case::login(
        &["demo-bank", "login", "1000123456", "--pin", "1234"],
        Command::Login { account_id: "1000123456".to_string(), pin: "1234".to_string() }
    )]
    #[case::deposit_default_note(
        &["demo-bank", "deposit", "250.75"],
        Command::Deposit { amount: Decimal::new(25075, 2), note: String::new() }
    )]
    #[case::withdraw(
        &["demo-bank", "withdraw", "40", "--pin", "1234"],
        Command::Withdraw { amount: Decimal::new(40, 0), pin: "1234".to_string() }
    )]
    #[case::history_filtered(
        &["demo-bank", "history", "--type", "withdrawal", "--csv"],
        Command::History { tx_type: Some(TxTypeArg::Withdrawal), csv: true }
    )]
    #[case::change_pin(
        &["demo-bank", "change-pin", "--current", "1234", "--new", "9999", "--confirm", "9999"],
        Command::ChangePin { current: "1234".to_string(), next: "9999".to_string(), confirm: "9999".to_string() }
    )]
    fn test_command_parsing(#[case] args: &[&str], #[case] expected: Command) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.command, expected);
    }

    #[rstest]
    #[case::missing_command(&["demo-bank"])]
    #[case::bad_amount(&["demo-bank", "deposit", "ten"])]
    #[case::login_without_pin(&["demo-bank", "login", "1000123456"])]
    #[case::unknown_type(&["demo-bank", "history", "--type", "transfer"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }

    #[test]
    fn test_policy_defaults_without_flags() {
        let parsed = CliArgs::try_parse_from(["demo-bank", "balance"]).unwrap();
        let config = parsed.to_app_config();
        assert_eq!(config.policy, PolicyConfig::default());
        assert_eq!(config.advice_timeout, Duration::from_secs(10));
    }

    #[rstest]
    #[case::custom_limit(&["demo-bank", "--daily-limit", "750", "balance"], Decimal::new(750, 0), 3)]
    #[case::custom_attempts(&["demo-bank", "--max-failed-attempts", "5", "balance"], Decimal::new(5000, 0), 5)]
    #[case::zero_limit_falls_back(&["demo-bank", "--daily-limit", "0", "balance"], Decimal::new(5000, 0), 3)]
    fn test_policy_conversion(
        #[case] args: &[&str],
        #[case] expected_limit: Decimal,
        #[case] expected_attempts: u32,
    ) {
        let config = CliArgs::try_parse_from(args).unwrap().to_app_config();
        assert_eq!(config.policy.daily_withdrawal_limit, expected_limit);
        assert_eq!(config.policy.max_failed_attempts, expected_attempts);
    }

    #[test]
    fn test_explicit_api_key_enables_gemini() {
        let parsed = CliArgs::try_parse_from([
            "demo-bank",
            "--api-key",
            "secret",
            "--model",
            "custom-model",
            "advice",
        ])
        .unwrap();
        let gemini = parsed.to_app_config().gemini.unwrap();
        assert_eq!(gemini.api_key, "secret");
        assert_eq!(gemini.model, "custom-model");
    }
}
