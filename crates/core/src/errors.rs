//! Core error types for Budget Buddy.
//!
//! This module defines store-agnostic error types. Store-specific failures
//! (HTTP status codes, SDK exceptions, etc.) are converted to these types
//! by the `LedgerStore` implementation.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the finance-tracking core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Ledger store operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// An entity is in a state the requested operation cannot act on,
    /// e.g. a goal with a blank or malformed document id.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Store-agnostic error type for ledger operations.
///
/// This enum uses `String` for all error details, allowing the store layer
/// to convert its own errors (network, serialization, SDK) into this format.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The requested document was not found.
    #[error("Document not found: {0}")]
    NotFound(String),

    /// A read or filtered query failed to execute.
    #[error("Ledger query failed: {0}")]
    QueryFailed(String),

    /// A document write (set/update/delete) failed.
    #[error("Ledger write failed: {0}")]
    WriteFailed(String),

    /// Network-level failure reaching the store, including timeouts.
    #[error("Ledger transport failure: {0}")]
    Transport(String),

    /// A document could not be serialized for storage.
    #[error("Document serialization failed: {0}")]
    Serialization(String),
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    /// Amounts and goal targets must be strictly positive.
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(f64),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Store(StoreError::Serialization(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
