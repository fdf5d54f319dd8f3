//! Email verification flow.
//!
//! Issuance has two halves with very different guarantees: storing the
//! token on the account is part of the signup transaction and can fail
//! it, while actually sending the mail is fire-and-forget — it runs in
//! its own task and a delivery failure costs nothing but a warning in
//! the log (the client can request a resend).

use rand::Rng;

use playvault_account::{AccountError, AccountHandle, VerifyOutcome};

use crate::{GatewayError, Mailer, VerificationMail};

/// Number of random bytes in a verification token.
const VERIFICATION_TOKEN_BYTES: usize = 16;

/// Issues verification tokens and dispatches the emails that carry
/// them.
#[derive(Clone)]
pub struct VerificationFlow<M: Mailer> {
    mailer: M,
}

impl<M: Mailer> VerificationFlow<M> {
    pub fn new(mailer: M) -> Self {
        Self { mailer }
    }

    /// Stores a fresh token on the account, then spawns the mail send.
    ///
    /// Returns once the token is durably on the account; the mail
    /// itself is in flight at that point and its outcome never reaches
    /// the caller.
    pub async fn issue(
        &self,
        account: &AccountHandle,
        email: &str,
        username: &str,
    ) -> Result<(), AccountError> {
        let token = generate_token();
        account.set_verification_token(token.clone()).await?;

        let mail = VerificationMail {
            account: account.address().clone(),
            email: email.to_string(),
            username: username.to_string(),
            token,
        };
        let mailer = self.mailer.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.send_verification(mail.clone()).await {
                tracing::warn!(
                    email = %mail.email,
                    error = %e,
                    "verification mail failed to send"
                );
            }
        });
        Ok(())
    }

    /// Confirms a token against the account, translating the outcome
    /// into the client-facing result.
    pub async fn confirm(
        &self,
        account: &AccountHandle,
        token: &str,
    ) -> Result<ConfirmOutcome, GatewayError> {
        match account.verify_email(token.to_string()).await? {
            VerifyOutcome::Verified => Ok(ConfirmOutcome::Verified),
            VerifyOutcome::AlreadyVerified => Ok(ConfirmOutcome::AlreadyVerified),
            VerifyOutcome::InvalidToken => Err(GatewayError::Validation(
                "Invalid verification token".to_string(),
            )),
            VerifyOutcome::Expired => Err(GatewayError::Validation(
                "Verification token has expired".to_string(),
            )),
        }
    }
}

/// Successful verification results (failures are `GatewayError`s).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Verified,
    AlreadyVerified,
}

/// `verify_<32 hex chars>` — 128 bits of entropy.
fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; VERIFICATION_TOKEN_BYTES] = rng.random();
    let mut out = String::with_capacity(7 + VERIFICATION_TOKEN_BYTES * 2);
    out.push_str("verify_");
    for b in bytes {
        out.push_str(&format!("{b:02x}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token_has_expected_shape() {
        let token = generate_token();
        assert!(token.starts_with("verify_"));
        assert_eq!(token.len(), 7 + 32);
        assert!(token[7..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_token_is_unique() {
        assert_ne!(generate_token(), generate_token());
    }
}
