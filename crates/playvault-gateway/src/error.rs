//! The gateway error taxonomy and its HTTP status mapping.

use playvault_account::AccountError;
use playvault_session::SessionError;

/// Errors surfaced to clients, each with a fixed HTTP status.
///
/// Client mistakes carry the message the client should see; `Internal`
/// wraps whatever actually broke, and callers are expected to log the
/// source and show clients nothing but a generic 500.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Malformed or missing input (400).
    #[error("{0}")]
    Validation(String),

    /// Unknown email or wrong password (401). Deliberately one variant
    /// for both, so responses don't reveal whether an account exists.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Missing, unknown, or expired session token (401).
    #[error("Unauthorized")]
    Unauthorized,

    /// Signup hit an existing account (400).
    #[error("An account with this email already exists")]
    AccountExists,

    /// The addressed resource doesn't exist (400, like the other
    /// client mistakes — the status set stays closed at 400/401/500).
    #[error("{0}")]
    NotFound(String),

    /// Infrastructure failure (500).
    #[error("internal error: {0}")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl GatewayError {
    /// The HTTP status code this error maps to.
    pub fn status(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::AccountExists | Self::NotFound(_) => {
                400
            }
            Self::InvalidCredentials | Self::Unauthorized => 401,
            Self::Internal(_) => 500,
        }
    }
}

impl From<AccountError> for GatewayError {
    fn from(e: AccountError) -> Self {
        match e {
            AccountError::AlreadyExists(_) => Self::AccountExists,
            AccountError::NotFound(_) => {
                Self::NotFound("User not found".to_string())
            }
            other => Self::Internal(Box::new(other)),
        }
    }
}

impl From<SessionError> for GatewayError {
    fn from(e: SessionError) -> Self {
        Self::Internal(Box::new(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_match_taxonomy() {
        assert_eq!(GatewayError::Validation("x".into()).status(), 400);
        assert_eq!(GatewayError::AccountExists.status(), 400);
        assert_eq!(GatewayError::NotFound("x".into()).status(), 400);
        assert_eq!(GatewayError::InvalidCredentials.status(), 401);
        assert_eq!(GatewayError::Unauthorized.status(), 401);
    }

    #[test]
    fn test_account_errors_map_to_client_statuses() {
        let addr = playvault_protocol::AccountAddress::from_email("a@x.com");
        let e: GatewayError = AccountError::AlreadyExists(addr.clone()).into();
        assert_eq!(e.status(), 400);
        let e: GatewayError = AccountError::NotFound(addr).into();
        assert_eq!(e.status(), 400);
        assert_eq!(e.to_string(), "User not found");
    }

    #[test]
    fn test_invalid_credentials_message_is_uniform() {
        // The login error never says whether the account exists.
        assert_eq!(
            GatewayError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
    }
}
