//! Durable storage and time seams for Playvault.
//!
//! Actors own their state in memory but persist every mutation through
//! the [`Store`] trait — an async byte-oriented key-value interface
//! keyed by actor address. Swapping the implementation swaps the
//! durability story without touching any actor code:
//!
//! - [`MemoryStore`] — shared in-process map; tests and demos.
//! - [`FileStore`] — one file per key under a root directory.
//!
//! Time goes through the same kind of seam: the [`Clock`] trait, with
//! [`SystemClock`] in production and [`ManualClock`] in tests, so
//! expiration behavior is tested by moving a value, never by sleeping.

mod clock;
mod error;
mod file;
mod memory;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::Store;
