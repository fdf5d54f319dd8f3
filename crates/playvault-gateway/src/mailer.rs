//! Mail delivery seam.
//!
//! Verification emails are the only outbound mail the backend sends,
//! and delivery is strictly best-effort: signup succeeds whether or not
//! the mail goes out. The trait keeps the transport (SMTP relay, HTTP
//! mail API, a log line in development) out of the gateway.

use playvault_protocol::AccountAddress;

/// A verification email about to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationMail {
    pub account: AccountAddress,
    pub email: String,
    pub username: String,
    /// The `verify_…` token the recipient presents back.
    pub token: String,
}

/// Mail delivery failed.
#[derive(Debug, thiserror::Error)]
#[error("mail delivery failed: {0}")]
pub struct MailerError(pub String);

/// Sends verification emails.
pub trait Mailer: Clone + Send + Sync + 'static {
    fn send_verification(
        &self,
        mail: VerificationMail,
    ) -> impl Future<Output = Result<(), MailerError>> + Send;
}

/// A mailer that delivers nothing and logs instead. The development and
/// test default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMailer;

impl Mailer for NoopMailer {
    async fn send_verification(
        &self,
        mail: VerificationMail,
    ) -> Result<(), MailerError> {
        tracing::info!(
            email = %mail.email,
            username = %mail.username,
            "verification mail suppressed (noop mailer)"
        );
        Ok(())
    }
}
