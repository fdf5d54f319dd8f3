//! Addressing: how identities and bearer tokens become actor keys.
//!
//! Two very different schemes live here:
//!
//! - [`AccountAddress`] is **deterministic**. The same email must always
//!   yield the same address, with no index lookup — accounts are
//!   *located*, not searched for. The digest must be collision-resistant
//!   because "exactly one account per address" depends on it: two emails
//!   mapping to the same address would silently share (and corrupt) one
//!   account's state. We use SHA-256 over the exact email bytes.
//! - [`SessionToken`] is **random**. A fresh, unguessable value on every
//!   call; its only contract is uniqueness with overwhelming probability.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ---------------------------------------------------------------------------
// AccountAddress
// ---------------------------------------------------------------------------

/// The stable address of one account actor.
///
/// Newtype over the string form `user_<64 hex chars>`. Using a newtype
/// (rather than a bare `String`) means an account address can never be
/// passed where a session token is expected, and vice versa.
///
/// `#[serde(transparent)]` keeps the JSON form a plain string, so the
/// `userId` field in responses is just `"user_ab12…"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// Derives the address for an email.
    ///
    /// Pure and deterministic: no stored state, stable across process
    /// restarts. The email is hashed byte-for-byte — no trimming or
    /// case folding — so `"A@x.com"` and `"a@x.com"` are distinct
    /// identities, matching the exact-match semantics of signup/login.
    pub fn from_email(email: &str) -> Self {
        let digest = Sha256::digest(email.as_bytes());
        let mut out = String::with_capacity(5 + digest.len() * 2);
        out.push_str("user_");
        for b in digest {
            out.push_str(&format!("{b:02x}"));
        }
        Self(out)
    }

    /// The address as the storage key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// SessionToken
// ---------------------------------------------------------------------------

/// Number of random bytes in a session token (192 bits of entropy).
const SESSION_TOKEN_BYTES: usize = 24;

/// A bearer token addressing one session actor.
///
/// Generated at signup/login, handed to the client, presented back as
/// `Authorization: Bearer <token>`. The token IS the session's address:
/// resolving it either yields the owning account or nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generates a fresh, unpredictable token: `sess_<48 hex chars>`.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let bytes: [u8; SESSION_TOKEN_BYTES] = rng.random();
        let mut out = String::with_capacity(5 + SESSION_TOKEN_BYTES * 2);
        out.push_str("sess_");
        for b in bytes {
            out.push_str(&format!("{b:02x}"));
        }
        Self(out)
    }

    /// Wraps a client-supplied bearer string.
    ///
    /// No shape validation happens here: an unknown or malformed token
    /// simply resolves to nothing, which is indistinguishable from an
    /// expired one.
    pub fn from_bearer(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The token as the storage key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Display is redacted: session tokens are secrets, and handles/logs
/// print them. Only a short prefix survives into log output.
impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self.0.len().min(10);
        write!(f, "{}…", &self.0[..shown])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_email_same_email_same_address() {
        let a = AccountAddress::from_email("a@x.com");
        let b = AccountAddress::from_email("a@x.com");
        assert_eq!(a, b, "address derivation must be deterministic");
    }

    #[test]
    fn test_from_email_distinct_emails_distinct_addresses() {
        let a = AccountAddress::from_email("a@x.com");
        let b = AccountAddress::from_email("b@x.com");
        assert_ne!(a, b);
    }

    #[test]
    fn test_from_email_is_case_and_whitespace_sensitive() {
        // Addresses are exact-match over the raw bytes.
        assert_ne!(
            AccountAddress::from_email("A@x.com"),
            AccountAddress::from_email("a@x.com"),
        );
        assert_ne!(
            AccountAddress::from_email(" a@x.com"),
            AccountAddress::from_email("a@x.com"),
        );
    }

    #[test]
    fn test_from_email_has_expected_shape() {
        let addr = AccountAddress::from_email("a@x.com");
        let s = addr.as_str();
        assert!(s.starts_with("user_"));
        // 5-char prefix + 64 hex chars of SHA-256.
        assert_eq!(s.len(), 5 + 64);
        assert!(s[5..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_tokens_are_unique() {
        let a = SessionToken::generate();
        let b = SessionToken::generate();
        assert_ne!(a, b, "two generated tokens must differ");
    }

    #[test]
    fn test_generate_has_expected_shape() {
        let token = SessionToken::generate();
        let s = token.as_str();
        assert!(s.starts_with("sess_"));
        assert_eq!(s.len(), 5 + 48);
    }

    #[test]
    fn test_display_redacts_session_token() {
        let token = SessionToken::generate();
        let shown = token.to_string();
        assert!(shown.len() < token.as_str().len());
        assert!(shown.ends_with('…'));
    }

    #[test]
    fn test_addresses_serialize_transparently() {
        let addr = AccountAddress::from_email("a@x.com");
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", addr.as_str()));
    }
}
