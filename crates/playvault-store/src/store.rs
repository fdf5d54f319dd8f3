//! The [`Store`] trait: async byte KV keyed by actor address.

use std::future::Future;

use crate::StoreError;

/// Durable key-value storage, keyed by actor address.
///
/// Each actor reads its record once at spawn and writes it back after
/// every mutation; per-key write ordering is therefore guaranteed by
/// the actors themselves (one exclusive writer per key), and the store
/// only has to make individual `put`/`delete` calls atomic.
///
/// # Trait bounds
///
/// - `Clone` → directories hand a store copy to every spawned actor;
///   implementations share their backing state through the clone
///   (an `Arc`'d map, a path).
/// - `Send + Sync + 'static` → lives inside long-running Tokio tasks.
pub trait Store: Clone + Send + Sync + 'static {
    /// Reads the value at `key`, or `None` if absent.
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<Vec<u8>>, StoreError>> + Send;

    /// Writes `value` at `key`, replacing any previous value atomically.
    fn put(
        &self,
        key: &str,
        value: Vec<u8>,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Removes the value at `key`. Removing an absent key is not an
    /// error — purge paths call this unconditionally.
    fn delete(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
