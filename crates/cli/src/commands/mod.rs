//! CLI command implementations.

pub mod run;
pub mod users;

use doc_records_store::{ConfigError, RepositoryError, StoreError};
use thiserror::Error;

/// Errors that end a command with a non-zero exit.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Connecting to the store failed.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// A repository operation failed.
    #[error("{0}")]
    Repository(#[from] RepositoryError),
}
