//! Unified error type for the Playvault backend.

use playvault_account::AccountError;
use playvault_gateway::GatewayError;
use playvault_session::SessionError;
use playvault_store::StoreError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `playvault` meta-crate, you deal with this single
/// error type instead of importing errors from each sub-crate. The
/// `#[from]` attribute on each variant auto-generates `From` impls, so
/// the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum PlayvaultError {
    /// A gateway-level error (validation, credentials, authorization).
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// An account-level error (exists, missing, corrupt document).
    #[error(transparent)]
    Account(#[from] AccountError),

    /// A session-level error (actor or record failure).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A storage-level error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PlayvaultError {
    /// The HTTP status this error maps to (500 for anything that isn't
    /// a client-facing gateway error).
    pub fn status(&self) -> u16 {
        match self {
            Self::Gateway(e) => e.status(),
            _ => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_gateway_error() {
        let err = GatewayError::Unauthorized;
        let pv_err: PlayvaultError = err.into();
        assert!(matches!(pv_err, PlayvaultError::Gateway(_)));
        assert_eq!(pv_err.status(), 401);
    }

    #[test]
    fn test_from_account_error() {
        let addr = playvault_protocol::AccountAddress::from_email("a@x.com");
        let err = AccountError::NotFound(addr);
        let pv_err: PlayvaultError = err.into();
        assert!(matches!(pv_err, PlayvaultError::Account(_)));
        assert_eq!(pv_err.status(), 500);
    }

    #[test]
    fn test_from_store_error() {
        let err = StoreError::InvalidKey("..".into());
        let pv_err: PlayvaultError = err.into();
        assert!(matches!(pv_err, PlayvaultError::Store(_)));
    }
}
