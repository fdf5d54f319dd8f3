//! Account actors for Playvault.
//!
//! Every registered user is owned by exactly one **account actor**: an
//! isolated Tokio task that holds the user's durable document and
//! processes commands strictly one at a time. That serialization is the
//! backbone of the whole backend — no lost updates, no two concurrent
//! writers to one account, ever.
//!
//! # Key types
//!
//! - [`AccountDirectory`] — registry mapping address → running actor,
//!   spawning lazily on first use
//! - [`AccountHandle`] — cheap-to-clone command sender for one actor
//! - [`AccountRecord`] — the stored document (never leaves this crate
//!   with its password hash attached; callers get [`ProfileSnapshot`]s)
//! - [`VerifyOutcome`] — result of an email-verification attempt
//!
//! Operations on *different* addresses run fully concurrently; only
//! same-address operations queue behind each other.
//!
//! [`ProfileSnapshot`]: playvault_protocol::ProfileSnapshot

mod actor;
mod credentials;
mod directory;
mod error;
mod record;

pub use actor::AccountHandle;
pub use directory::AccountDirectory;
pub use error::AccountError;
pub use record::{default_game_data, AccountRecord, VerifyOutcome};
