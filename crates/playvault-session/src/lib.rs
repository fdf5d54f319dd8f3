//! Session actors for Playvault.
//!
//! A session is the bearer credential a client holds between requests.
//! Each session token addresses its own actor, which owns one small
//! durable record: which account the session belongs to and when it
//! expires. Expiration is **sliding** — every successful resolve pushes
//! the deadline a full TTL into the future, so a session only dies
//! after the configured stretch of inactivity (30 days by default).
//!
//! Expired sessions are purged lazily: there is no background sweeper,
//! the first resolve past the deadline deletes the stored record and
//! reports the session as gone. Backward clock movement cannot revive a
//! purged session, because the record itself is deleted.

mod actor;
mod config;
mod directory;
mod error;
mod record;

pub use actor::SessionHandle;
pub use config::SessionConfig;
pub use directory::SessionDirectory;
pub use error::SessionError;
pub use record::SessionRecord;
