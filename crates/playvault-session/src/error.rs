//! Error types for the session layer.

use playvault_protocol::SessionToken;
use playvault_store::StoreError;

/// Errors that can occur during session operations.
///
/// An expired or unknown session is NOT an error — resolving it returns
/// `None`. Errors here mean the machinery itself failed.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The actor's command channel is closed (actor failed to start or
    /// has stopped).
    #[error("session {0} is unavailable")]
    Unavailable(SessionToken),

    /// The stored session record could not be (de)serialized.
    #[error("session record is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// Durable storage failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
