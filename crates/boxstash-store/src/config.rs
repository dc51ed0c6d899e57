//! Store configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::{config_error, Result};

/// Path value that selects a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

/// Configuration for the SQLite-backed store
///
/// # Invariants
/// - `path` is a database file path or [`IN_MEMORY`].
/// - `readers` read-only connections serve `view` calls for file databases;
///   `0` routes reads through the writer connection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    pub path: PathBuf,
    #[serde(default = "default_readers")]
    pub readers: usize,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

const fn default_readers() -> usize {
    4
}

const fn default_busy_timeout_ms() -> u64 {
    5_000
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            readers: default_readers(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY)
    }

    pub fn with_readers(mut self, readers: usize) -> Self {
        self.readers = readers;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == IN_MEMORY
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// Reject configurations that cannot be opened
    ///
    /// # Errors
    ///
    /// `Config` when the path is empty or names an existing directory.
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(config_error("database path must not be empty"));
        }
        if self.path.is_dir() {
            return Err(config_error(format!(
                "database path {} is a directory",
                self.path.display()
            )));
        }
        Ok(())
    }
}
