//! The auth gateway: signup, login, logout, email verification.
//!
//! This is the credential boundary. Passwords cross it exactly twice
//! (signup and login), get handed straight to the account actor, and
//! never appear in any response, log line, or stored document other
//! than as an Argon2 hash.

use playvault_account::AccountDirectory;
use playvault_protocol::{
    AccountAddress, LoginRequest, LoginResponse, OkResponse, SessionToken,
    SignupRequest, SignupResponse, VerifyResponse,
};
use playvault_session::SessionDirectory;
use playvault_store::{Clock, Store};

use crate::verification::ConfirmOutcome;
use crate::{GatewayError, Mailer, VerificationFlow};

/// Front door for everything that creates or destroys authentication
/// state.
pub struct AuthGateway<S: Store, K: Clock, M: Mailer> {
    accounts: AccountDirectory<S, K>,
    sessions: SessionDirectory<S, K>,
    verification: VerificationFlow<M>,
}

impl<S: Store, K: Clock, M: Mailer> Clone for AuthGateway<S, K, M> {
    fn clone(&self) -> Self {
        Self {
            accounts: self.accounts.clone(),
            sessions: self.sessions.clone(),
            verification: self.verification.clone(),
        }
    }
}

impl<S: Store, K: Clock, M: Mailer> AuthGateway<S, K, M> {
    pub fn new(
        accounts: AccountDirectory<S, K>,
        sessions: SessionDirectory<S, K>,
        verification: VerificationFlow<M>,
    ) -> Self {
        Self {
            accounts,
            sessions,
            verification,
        }
    }

    /// Registers a new account and logs it straight in.
    ///
    /// On success the account exists, a verification mail is in flight,
    /// and the returned session is live. A duplicate email fails with
    /// [`GatewayError::AccountExists`] and changes nothing.
    pub async fn signup(
        &self,
        req: SignupRequest,
    ) -> Result<SignupResponse, GatewayError> {
        validate_signup(&req)?;

        let address = AccountAddress::from_email(&req.email);
        let account = self.accounts.handle(&address).await;
        account
            .create(req.email.clone(), req.password, req.username.clone())
            .await?;

        // Token issuance must land on the account; the mail itself is
        // fire-and-forget inside the flow.
        self.verification
            .issue(&account, &req.email, &req.username)
            .await?;

        let session_id = self.sessions.create_session(address.clone()).await?;
        tracing::info!(address = %address, "signup complete");

        Ok(SignupResponse {
            success: true,
            session_id,
            user_id: address,
            username: req.username,
            email: req.email,
            message: "Account created successfully!".to_string(),
        })
    }

    /// Authenticates an email/password pair and opens a fresh session.
    ///
    /// Every login gets its own session; earlier sessions stay valid
    /// until they expire or log out. Unknown email and wrong password
    /// are indistinguishable in the response.
    pub async fn login(
        &self,
        req: LoginRequest,
    ) -> Result<LoginResponse, GatewayError> {
        if req.email.is_empty() || req.password.is_empty() {
            return Err(GatewayError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let address = AccountAddress::from_email(&req.email);
        let account = self.accounts.handle(&address).await;
        if !account.authenticate(req.password).await? {
            return Err(GatewayError::InvalidCredentials);
        }

        let profile = account.profile().await?;
        let session_id = self.sessions.create_session(address.clone()).await?;
        tracing::info!(address = %address, "login complete");

        Ok(LoginResponse {
            success: true,
            session_id,
            profile,
        })
    }

    /// Ends a session. Succeeds no matter what the token was — logout
    /// with a dead token is still a logout.
    pub async fn logout(
        &self,
        token: &SessionToken,
    ) -> Result<OkResponse, GatewayError> {
        self.sessions.destroy(token).await?;
        Ok(OkResponse::ok())
    }

    /// Confirms an email-verification token.
    pub async fn verify_email(
        &self,
        email: &str,
        token: &str,
    ) -> Result<VerifyResponse, GatewayError> {
        let address = AccountAddress::from_email(email);
        let account = self.accounts.handle(&address).await;
        let message = match self.verification.confirm(&account, token).await? {
            ConfirmOutcome::Verified => "Email verified successfully!",
            ConfirmOutcome::AlreadyVerified => "Email is already verified",
        };
        Ok(VerifyResponse {
            success: true,
            message: message.to_string(),
        })
    }
}

/// Signup input policy: all three fields present, email plausibly an
/// email.
fn validate_signup(req: &SignupRequest) -> Result<(), GatewayError> {
    if req.email.is_empty() || req.password.is_empty() || req.username.is_empty()
    {
        return Err(GatewayError::Validation(
            "Email, password and username are required".to_string(),
        ));
    }
    if !is_plausible_email(&req.email) {
        return Err(GatewayError::Validation(
            "Invalid email address".to_string(),
        ));
    }
    Ok(())
}

/// Structural email check: one `@`, non-empty local part, domain with a
/// dot splitting two non-empty labels, no whitespace. Deliverability is
/// the verification mail's problem, not this function's.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}
