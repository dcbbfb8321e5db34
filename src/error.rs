//! Error types for the sample logger.
//!
//! Every fallible operation in the crate reports through [`LoggerError`];
//! nothing is retried internally and nothing is swallowed.

use thiserror::Error;

/// Result type alias using LoggerError
pub type Result<T> = std::result::Result<T, LoggerError>;

/// Unified error type for sample logger operations
#[derive(Debug, Error)]
pub enum LoggerError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Initialization Errors
    // -------------------------------------------------------------------------
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to allocate storage for {samples} samples ({bytes} bytes); try a smaller log size")]
    Allocation { samples: usize, bytes: usize },

    #[error("logger is not initialized and holds no rows or columns")]
    NotInitialized,

    // -------------------------------------------------------------------------
    // Logging Errors
    // -------------------------------------------------------------------------
    #[error("cannot log sample: all {max_rows} rows of the log are filled")]
    Full { max_rows: usize },

    // -------------------------------------------------------------------------
    // Access Errors
    // -------------------------------------------------------------------------
    #[error("index {index} is out of range of the {len} stored samples")]
    OutOfRange { index: usize, len: usize },

    // -------------------------------------------------------------------------
    // Binary Format Errors
    // -------------------------------------------------------------------------
    #[error("malformed binary log header: {0}")]
    MalformedHeader(String),
}
