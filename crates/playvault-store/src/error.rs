//! Error types for the storage layer.

/// Errors that can occur while reading or writing durable state.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying filesystem operation failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The key contains characters the backend cannot represent.
    /// Keys are actor addresses (`user_…`, `sess_…`), so hitting this
    /// means a caller bypassed the addressing layer.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}
