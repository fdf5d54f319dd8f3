//! Password hashing: salted, memory-hard Argon2.
//!
//! The stored credential is a PHC-format string (`$argon2id$…`) that
//! embeds its own salt and parameters, so verification needs nothing
//! but the password and the stored string. Hashes never leave the
//! account actor.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::AccountError;

fn salt() -> Result<SaltString, AccountError> {
    use rand::Rng;
    let mut bytes = [0u8; 16];
    rand::rng().fill(&mut bytes);
    SaltString::encode_b64(&bytes)
        .map_err(|e| AccountError::Credential(e.to_string()))
}

/// Hashes a password with a fresh random salt.
pub(crate) fn hash_password(password: &str) -> Result<String, AccountError> {
    Argon2::default()
        .hash_password(password.as_bytes(), &salt()?)
        .map(|h| h.to_string())
        .map_err(|e| AccountError::Credential(e.to_string()))
}

/// Verifies a password against a stored PHC string.
///
/// An unparseable stored hash verifies as `false` rather than erroring:
/// to a caller that is indistinguishable from a wrong password, which
/// is exactly the ambiguity the login path wants to preserve.
pub(crate) fn verify_password(password: &str, stored: &str) -> bool {
    PasswordHash::new(stored)
        .ok()
        .as_ref()
        .map(|hash| {
            Argon2::default()
                .verify_password(password.as_bytes(), hash)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_verifies_roundtrip() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn test_hash_password_salts_are_unique() {
        let a = hash_password("pw").unwrap();
        let b = hash_password("pw").unwrap();
        assert_ne!(a, b, "same password must hash differently (salted)");
    }

    #[test]
    fn test_verify_password_garbage_hash_is_false() {
        assert!(!verify_password("pw", "not-a-phc-string"));
        assert!(!verify_password("pw", ""));
    }
}
