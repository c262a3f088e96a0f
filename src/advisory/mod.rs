//! Advisory adapter
//!
//! Produces a short "financial tip" from an account's balance and recent
//! activity. The remote call is strictly optional: [`advice_or_fallback`]
//! turns every failure, empty answer, or timeout into a fixed message, so
//! callers always get a string back.

pub mod gemini;

use crate::types::{BankError, Transaction};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{debug, warn};

pub use gemini::{GeminiAdvisor, GeminiConfig};

/// Shown when the provider answers with no text
pub const EMPTY_ADVICE_FALLBACK: &str = "Keep up the good work saving! Tracking your daily expenses is the first step to financial freedom.";

/// Shown when the provider fails or times out
pub const ERROR_ADVICE_FALLBACK: &str =
    "Ensure you're setting aside at least 20% of your deposits for long-term savings.";

/// How many of the most recent transactions are sent to the provider
pub const RECENT_TRANSACTIONS: usize = 5;

/// Source of financial tips
#[async_trait]
pub trait AdvisoryProvider: Send + Sync {
    /// Short human-readable advice for this balance and history
    ///
    /// `transactions` is most-recent-first. An empty string means the
    /// provider had nothing to say.
    async fn get_advice(
        &self,
        transactions: &[Transaction],
        balance: Decimal,
    ) -> Result<String, BankError>;
}

/// Provider that always answers with the same text
///
/// Used when no remote provider is configured.
#[derive(Debug, Clone)]
pub struct StaticAdvisor {
    text: String,
}

impl StaticAdvisor {
    pub fn new(text: impl Into<String>) -> Self {
        StaticAdvisor { text: text.into() }
    }
}

impl Default for StaticAdvisor {
    fn default() -> Self {
        Self::new(EMPTY_ADVICE_FALLBACK)
    }
}

#[async_trait]
impl AdvisoryProvider for StaticAdvisor {
    async fn get_advice(
        &self,
        _transactions: &[Transaction],
        _balance: Decimal,
    ) -> Result<String, BankError> {
        Ok(self.text.clone())
    }
}

/// Ask `provider` for advice, never failing
///
/// Errors and timeouts become [`ERROR_ADVICE_FALLBACK`]; an empty answer
/// becomes [`EMPTY_ADVICE_FALLBACK`].
pub async fn advice_or_fallback<A>(
    provider: &A,
    transactions: &[Transaction],
    balance: Decimal,
    timeout: Duration,
) -> String
where
    A: AdvisoryProvider + ?Sized,
{
    match tokio::time::timeout(timeout, provider.get_advice(transactions, balance)).await {
        Ok(Ok(text)) if !text.trim().is_empty() => {
            debug!(chars = text.len(), "advice received");
            text.trim().to_string()
        }
        Ok(Ok(_)) => {
            debug!("advisory provider returned no text");
            EMPTY_ADVICE_FALLBACK.to_string()
        }
        Ok(Err(err)) => {
            warn!(error = %err, "advisory provider failed");
            ERROR_ADVICE_FALLBACK.to_string()
        }
        Err(_) => {
            warn!(timeout_ms = timeout.as_millis() as u64, "advisory provider timed out");
            ERROR_ADVICE_FALLBACK.to_string()
        }
    }
}
