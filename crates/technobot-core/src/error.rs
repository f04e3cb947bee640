//! Error types for the core crate.

use technobot_protocol::SessionId;
use thiserror::Error;

/// Errors returned by core operations.
#[derive(Debug, Error)]
pub enum TechnobotCoreError {
    /// Session id is unknown to the store.
    #[error("unknown session: {0}")]
    UnknownSession(SessionId),
    /// Customer id is not present in the catalog.
    #[error("unknown customer: {0}")]
    UnknownCustomer(String),
    /// Customer data could not be read.
    #[error("data error: {0}")]
    Data(String),
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
