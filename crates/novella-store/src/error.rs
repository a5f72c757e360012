//! Record store error types.

use std::path::PathBuf;
use thiserror::Error;

/// Record store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database file could not be opened.
    #[error("Failed to open database {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The query could not be prepared.
    #[error("Failed to create prepared statement: {0}")]
    Prepare(#[source] rusqlite::Error),

    /// Fetching or reading a row failed.
    #[error("Failed to get row: {0}")]
    QueryStep(#[source] rusqlite::Error),

    /// The connection did not close cleanly.
    #[error("Failed to close database: {0}")]
    Close(#[source] rusqlite::Error),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, StoreError>;
