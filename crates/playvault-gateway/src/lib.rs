//! Request-facing coordination for Playvault.
//!
//! The actors in `playvault-account` and `playvault-session` know
//! nothing about requests, credentials policy, or who is allowed to do
//! what. This crate is where those concerns live:
//!
//! - [`AuthGateway`] — signup, login, logout, email verification
//! - [`SyncCoordinator`] — everything behind a bearer token: profile
//!   sync, per-game data, save slots
//! - [`VerificationFlow`] — issues verification tokens and hands them
//!   to a [`Mailer`] without blocking the request that triggered them
//! - [`GatewayError`] — the error taxonomy with its HTTP status mapping
//!
//! An HTTP layer on top of this crate is a thin translation: decode the
//! body, call one method here, encode the result.

mod auth;
mod error;
mod mailer;
mod sync;
mod verification;

pub use auth::AuthGateway;
pub use error::GatewayError;
pub use mailer::{Mailer, MailerError, NoopMailer, VerificationMail};
pub use sync::SyncCoordinator;
pub use verification::{ConfirmOutcome, VerificationFlow};
