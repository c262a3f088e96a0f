//! Persistence adapter for the full application state
//!
//! The whole state (every account plus the session flags) is loaded once at
//! start-up and written back wholesale after every mutation. Persistence is
//! best effort: a missing or unreadable file yields the empty default state,
//! and a failed write is logged and otherwise ignored.

use crate::types::{Account, AccountId, BankError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

const TMP_SUFFIX: &str = "tmp";

/// Everything that survives between runs
///
/// The default is the state of a fresh install: no accounts, logged out,
/// light theme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub all_accounts: Vec<Account>,

    /// Id of the logged-in account, if any
    #[serde(default)]
    pub current_account: Option<AccountId>,

    #[serde(default)]
    pub is_dark_mode: bool,
}

impl AppState {
    pub fn is_logged_in(&self) -> bool {
        self.current_account.is_some()
    }
}

/// Durable slot holding the application state
pub trait PersistenceAdapter {
    /// Read the saved state, or the default state if there is none
    fn load(&self) -> AppState;

    /// Write the full state, replacing whatever was saved before
    fn save(&self, state: &AppState);
}

/// State stored as one pretty-printed JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the state, reporting why it could not be read
    ///
    /// A missing file is not an error and yields the default state.
    pub fn try_load(&self) -> Result<AppState, BankError> {
        if !self.path.exists() {
            return Ok(AppState::default());
        }
        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(AppState::default());
        }
        Ok(serde_json::from_str(&data)?)
    }

    /// Write the state atomically through a sibling temp file
    pub fn try_save(&self, state: &AppState) -> Result<(), BankError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(state)?;
        let tmp = tmp_path(&self.path);
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl PersistenceAdapter for JsonFileStore {
    fn load(&self) -> AppState {
        match self.try_load() {
            Ok(state) => {
                debug!(
                    path = %self.path.display(),
                    accounts = state.all_accounts.len(),
                    "loaded state"
                );
                state
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "could not load state, starting empty");
                AppState::default()
            }
        }
    }

    fn save(&self, state: &AppState) {
        if let Err(err) = self.try_save(state) {
            warn!(path = %self.path.display(), error = %err, "could not save state");
        }
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(TMP_SUFFIX);
    path.with_file_name(name)
}

/// In-process slot, used by tests and embedders that persist elsewhere
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<Option<AppState>>,
    saves: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the slot as if a previous run had saved `state`
    pub fn with_state(state: AppState) -> Self {
        MemoryStore {
            state: Mutex::new(Some(state)),
            saves: Mutex::new(0),
        }
    }

    /// Last saved state, if any
    pub fn saved(&self) -> Option<AppState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of `save` calls so far
    pub fn save_count(&self) -> usize {
        *self
            .saves
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PersistenceAdapter for MemoryStore {
    fn load(&self) -> AppState {
        self.saved().unwrap_or_default()
    }

    fn save(&self, state: &AppState) {
        *self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(state.clone());
        *self
            .saves
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) += 1;
    }
}

impl<P: PersistenceAdapter + ?Sized> PersistenceAdapter for &P {
    fn load(&self) -> AppState {
        (**self).load()
    }

    fn save(&self, state: &AppState) {
        (**self).save(state)
    }
}
