//! I/O module
//!
//! Boundaries between the engine and the outside world:
//! - `persistence`: load/save of the full application state
//! - `csv_format`: statement and account listing export

pub mod csv_format;
pub mod persistence;

pub use csv_format::{write_accounts_csv, write_statement_csv};
pub use persistence::{AppState, JsonFileStore, MemoryStore, PersistenceAdapter};
