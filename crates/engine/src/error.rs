//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`StoreError`] thrown by a [`RecordStore`] when the remote call fails.
//! - [`EngineError`] returned by the [`ExpenseStore`] and the parsers.
//!
//!  [`RecordStore`]: super::remote::RecordStore
//!  [`ExpenseStore`]: super::store::ExpenseStore
use thiserror::Error;

/// Failures reported by the remote record store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("session rejected by the remote store")]
    Unauthorized,
    #[error("\"{0}\" not found")]
    NotFound(String),
    #[error("rejected: {0}")]
    Rejected(String),
    #[error("transport error: {0}")]
    Transport(String),
}

/// Engine custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
