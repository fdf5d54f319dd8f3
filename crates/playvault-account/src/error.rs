//! Error types for the account layer.

use playvault_protocol::AccountAddress;
use playvault_store::StoreError;

/// Errors that can occur during account operations.
///
/// "Soft" absences are NOT errors here: authenticating against a missing
/// account returns `false`, loading an empty save slot returns `None`,
/// and reading an absent game-data namespace returns its default.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// An account already exists at this address; creation never
    /// overwrites.
    #[error("account already exists at {0}")]
    AlreadyExists(AccountAddress),

    /// No account exists at this address.
    #[error("no account at {0}")]
    NotFound(AccountAddress),

    /// The actor's command channel is closed (actor failed to start or
    /// has stopped).
    #[error("account {0} is unavailable")]
    Unavailable(AccountAddress),

    /// Password hashing or verification machinery failed (not a
    /// mismatch — mismatches are a `false` authentication result).
    #[error("credential hashing failed: {0}")]
    Credential(String),

    /// The stored account document could not be (de)serialized.
    #[error("account document is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// Durable storage failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
