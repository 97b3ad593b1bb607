//! Error types for the eventdesk ecosystem.

use thiserror::Error;

/// Errors that can occur in eventdesk operations.
#[derive(Error, Debug)]
pub enum EventDeskError {
    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Rejected field value: {0}")]
    ValidationRejected(String),

    #[error("Store request failed: {0}")]
    StoreUnavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for eventdesk operations.
pub type EventDeskResult<T> = Result<T, EventDeskError>;
