//! Wire DTOs: the JSON bodies of the HTTP surface.
//!
//! Route dispatch itself is an external collaborator; this module only
//! pins down the shapes. All fields use camelCase on the wire, matching
//! what the browser clients send and expect back.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::{AccountAddress, SaveSlots, SessionToken, SlotId};

/// The fixed set of top-level profile keys the sync endpoint accepts.
///
/// Keys outside this list are silently ignored; keys inside it are
/// replaced wholesale (shallow, overwrite-per-key — callers must submit
/// a full replacement value for any key they touch).
pub const PROFILE_KEYS: [&str; 5] =
    ["achievements", "points", "shopUnlocks", "settings", "stats"];

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body of `POST /api/signup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

/// Body of `POST /api/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/dungeon/save`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveSlotRequest {
    pub slot: SlotId,
    pub data: Value,
    /// Optional display name; defaults to `Save <n>` when omitted.
    #[serde(default)]
    pub name: Option<String>,
}

/// Body of `POST /api/dungeon/load` and `POST /api/dungeon/delete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotRequest {
    pub slot: SlotId,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Everything a caller may see of an account — all fields except the
/// password hash, which never leaves the actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSnapshot {
    pub user_id: AccountAddress,
    pub email: String,
    pub username: String,
    pub created_at: u64,
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_token_expiry: Option<u64>,
    /// The synced profile keys (see [`PROFILE_KEYS`]), flattened into
    /// the snapshot so `achievements`, `points`, etc. appear top-level.
    #[serde(flatten)]
    pub profile: Map<String, Value>,
    pub game_data: BTreeMap<String, Value>,
    pub save_slots: SaveSlots,
}

/// Success body of `POST /api/signup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub success: bool,
    pub session_id: SessionToken,
    pub user_id: AccountAddress,
    pub username: String,
    pub email: String,
    pub message: String,
}

/// Success body of `POST /api/login`: the new session plus a sanitized
/// profile snapshot (which carries `userId`, `username`, `email`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub session_id: SessionToken,
    #[serde(flatten)]
    pub profile: ProfileSnapshot,
}

/// Success body of `GET /api/verify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub message: String,
}

/// The bare `{success: true}` body most mutations return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub success: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Every error response body: `{error: <message>}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot() -> ProfileSnapshot {
        let mut profile = Map::new();
        profile.insert("points".into(), json!(50));
        ProfileSnapshot {
            user_id: AccountAddress::from_email("a@x.com"),
            email: "a@x.com".into(),
            username: "alice".into(),
            created_at: 1_700_000_000_000,
            email_verified: false,
            verification_token: None,
            verification_token_expiry: None,
            profile,
            game_data: BTreeMap::new(),
            save_slots: SaveSlots::default(),
        }
    }

    #[test]
    fn test_profile_snapshot_flattens_profile_keys() {
        let value = serde_json::to_value(snapshot()).unwrap();
        assert_eq!(value["points"], 50);
        assert_eq!(value["username"], "alice");
        assert_eq!(value["emailVerified"], false);
        // No nested "profile" wrapper and no password material.
        assert!(value.get("profile").is_none());
        assert!(value.get("passwordHash").is_none());
    }

    #[test]
    fn test_profile_snapshot_omits_absent_verification_token() {
        let value = serde_json::to_value(snapshot()).unwrap();
        assert!(value.get("verificationToken").is_none());
    }

    #[test]
    fn test_login_response_flattens_snapshot() {
        let resp = LoginResponse {
            success: true,
            session_id: SessionToken::generate(),
            profile: snapshot(),
        };
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["success"], true);
        assert!(value["sessionId"].as_str().unwrap().starts_with("sess_"));
        assert_eq!(value["username"], "alice");
        assert!(value["userId"].as_str().unwrap().starts_with("user_"));
    }

    #[test]
    fn test_save_slot_request_name_defaults_to_none() {
        let req: SaveSlotRequest =
            serde_json::from_value(json!({"slot": "slot1", "data": {"hp": 7}}))
                .unwrap();
        assert_eq!(req.slot, SlotId::Slot1);
        assert!(req.name.is_none());
    }

    #[test]
    fn test_save_slot_request_rejects_unknown_slot() {
        let result: Result<SaveSlotRequest, _> =
            serde_json::from_value(json!({"slot": "slot7", "data": {}}));
        assert!(result.is_err(), "unknown slot names are a decode error");
    }
}
