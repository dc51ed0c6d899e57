//! CLI error type

use boxstash_core::ExError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("unsupported database driver '{0}' (only sqlite is available)")]
    UnsupportedDriver(String),

    #[error(transparent)]
    Store(#[from] ExError),

    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}
