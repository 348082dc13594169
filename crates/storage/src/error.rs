/// All errors that can be returned by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No order with the given id.
    #[error("order not found: {id}")]
    OrderNotFound { id: String },

    /// No schedule slot with the given id.
    #[error("schedule slot not found: {id}")]
    ScheduleNotFound { id: String },

    /// A backend-specific storage error (connection, serialization, etc.).
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Failure to hand a message to the notification gateway.
///
/// Every call site treats this as best-effort: the failure is logged and
/// swallowed, never surfaced to the transition's caller.
#[derive(Debug, thiserror::Error)]
#[error("notification dispatch failed: {0}")]
pub struct NotifyError(pub String);
