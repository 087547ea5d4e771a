//! Station data loading error types.

use crate::domain::InvalidStationId;

/// Errors that can occur when loading station-pair records.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Reading the file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV itself is malformed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A station column does not hold a valid identifier
    #[error("line {line}: {source}")]
    InvalidStation {
        line: u64,
        #[source]
        source: InvalidStationId,
    },

    /// A weight column is not a non-negative integer
    #[error("line {line}: {column} must be a non-negative integer, got {value:?}")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },
}
