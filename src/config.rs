//! Runtime configuration
//!
//! Gathers everything the binary needs (state file location, policy limits,
//! advisory provider settings) into one `AppConfig`, built from command-line
//! arguments with environment fallbacks.

use crate::advisory::GeminiConfig;
use crate::core::PolicyConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Default location of the persisted state, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "bank_state.json";

/// Default time allowed for the advisory call
pub const DEFAULT_ADVICE_TIMEOUT: Duration = Duration::from_secs(10);

/// Secondary environment variable holding the advisory API key
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// JSON file holding accounts and session flags
    pub data_file: PathBuf,

    pub policy: PolicyConfig,

    /// `None` when no API key is available; advice then uses the fixed fallback
    pub gemini: Option<GeminiConfig>,

    pub advice_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            policy: PolicyConfig::default(),
            gemini: None,
            advice_timeout: DEFAULT_ADVICE_TIMEOUT,
        }
    }
}

/// Pick the explicit key if present, otherwise the `API_KEY` variable
///
/// Blank values count as absent.
pub fn resolve_api_key(explicit: Option<String>) -> Option<String> {
    explicit
        .or_else(|| std::env::var(FALLBACK_API_KEY_ENV).ok())
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.data_file, PathBuf::from("bank_state.json"));
        assert_eq!(config.policy, PolicyConfig::default());
        assert!(config.gemini.is_none());
        assert_eq!(config.advice_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_explicit_api_key_wins_and_is_trimmed() {
        assert_eq!(
            resolve_api_key(Some("  abc  ".to_string())),
            Some("abc".to_string())
        );
    }

    #[test]
    fn test_blank_explicit_key_is_absent() {
        assert_eq!(resolve_api_key(Some("   ".to_string())), None);
    }
}
