//! The stored session record.

use serde::{Deserialize, Serialize};

use playvault_protocol::AccountAddress;

/// One session's durable record, persisted under its token (camelCase
/// JSON, like every other stored document).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// The account this session authenticates as.
    pub account_address: AccountAddress,
    /// Unix millis at creation. Never changes.
    pub created_at: u64,
    /// Unix millis after which the session is dead. Pushed forward on
    /// every successful resolve.
    pub expires_at: u64,
}

impl SessionRecord {
    pub(crate) fn new(
        account_address: AccountAddress,
        now: u64,
        ttl_millis: u64,
    ) -> Self {
        Self {
            account_address,
            created_at: now,
            expires_at: now + ttl_millis,
        }
    }

    /// Whether this session is past its deadline at `now`.
    pub fn is_expired(&self, now: u64) -> bool {
        now > self.expires_at
    }

    /// Restarts the inactivity window from `now`.
    pub(crate) fn slide(&mut self, now: u64, ttl_millis: u64) {
        self.expires_at = now + ttl_millis;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> AccountAddress {
        AccountAddress::from_email("a@x.com")
    }

    #[test]
    fn test_is_expired_at_exact_deadline_is_false() {
        let rec = SessionRecord::new(address(), 1_000, 500);
        assert_eq!(rec.expires_at, 1_500);
        assert!(!rec.is_expired(1_500));
        assert!(rec.is_expired(1_501));
    }

    #[test]
    fn test_slide_moves_deadline_but_not_created_at() {
        let mut rec = SessionRecord::new(address(), 1_000, 500);
        rec.slide(2_000, 500);
        assert_eq!(rec.created_at, 1_000);
        assert_eq!(rec.expires_at, 2_500);
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(SessionRecord::new(address(), 1, 2))
            .unwrap();
        assert!(value.get("accountAddress").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("expiresAt").is_some());
    }
}
