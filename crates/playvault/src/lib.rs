//! # Playvault
//!
//! Actor-based account and session backend for browser games.
//!
//! Every account and every session is owned by its own actor — a Tokio
//! task addressed by a stable key — so all operations on one identity
//! are serialized while unrelated identities run fully in parallel.
//! State is persisted through a pluggable [`Store`]; time flows through
//! a pluggable [`Clock`]; verification mail goes through a pluggable
//! [`Mailer`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use playvault::{Backend, MemoryStore, NoopMailer, SystemClock};
//! use playvault::protocol::SignupRequest;
//!
//! # async fn run() -> Result<(), playvault::PlayvaultError> {
//! let backend = Backend::<MemoryStore, SystemClock, NoopMailer>::builder()
//!     .build(MemoryStore::new(), SystemClock, NoopMailer);
//!
//! let signup = backend
//!     .signup(SignupRequest {
//!         email: "alice@example.com".into(),
//!         password: "hunter2".into(),
//!         username: "alice".into(),
//!     })
//!     .await?;
//! println!("session: {}", signup.session_id.as_str());
//! # Ok(())
//! # }
//! ```
//!
//! [`Store`]: playvault_store::Store
//! [`Clock`]: playvault_store::Clock
//! [`Mailer`]: playvault_gateway::Mailer

mod backend;
mod error;

pub use backend::{Backend, BackendBuilder};
pub use error::PlayvaultError;

pub use playvault_gateway::{
    GatewayError, Mailer, MailerError, NoopMailer, VerificationMail,
};
pub use playvault_session::SessionConfig;
pub use playvault_store::{
    Clock, FileStore, ManualClock, MemoryStore, Store, SystemClock,
};

/// Wire types: request/response bodies, addresses, tokens, slots.
pub mod protocol {
    pub use playvault_protocol::*;
}
