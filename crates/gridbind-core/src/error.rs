//! Error types for gridbind core systems.

/// Errors raised by the signal and queue primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// The connection ID is invalid or has already been disconnected.
    #[error("Invalid or disconnected connection ID")]
    InvalidConnection,

    /// The queued entry was already processed or cancelled.
    #[error("No pending queue entry with id {0}")]
    UnknownQueueEntry(u64),
}

/// A specialized Result type for gridbind core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
