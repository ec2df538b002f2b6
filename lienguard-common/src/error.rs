//! Common error types for lienguard

use thiserror::Error;

/// Common result type for lienguard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared across the lienguard crates.
///
/// Fatal conditions must name the offending identifier(s) or count, since the
/// operator resolves them by correcting the data files by hand.
#[derive(Error, Debug)]
pub enum Error {
    /// Unusable input shape: unrecognized ledger schema, malformed URL-cache
    /// file, missing settings. No partial progress is attempted.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bad data that would silently drop liability-relevant records if
    /// ignored: short job IDs, duplicate project numbers, unresolved leaders.
    /// Fatal for the whole batch.
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error (wraps csv::Error)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Resolver or notifier transport failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Internal consistency error (should be unreachable)
    #[error("Internal error: {0}")]
    Internal(String),
}
