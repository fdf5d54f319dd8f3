//! The stored account document and its state transitions.
//!
//! Everything here is pure, synchronous state manipulation — the actor
//! wraps these methods with command dispatch and persistence. Keeping
//! the transitions on the record itself makes every rule (one-way
//! verification, shallow merges, slot overwrites) unit-testable without
//! spawning anything.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use playvault_protocol::{
    AccountAddress, ProfileSnapshot, SaveSlots, SlotId, SlotRecord,
    PROFILE_KEYS,
};

/// How long an issued verification token stays valid.
pub(crate) const VERIFICATION_TOKEN_TTL_MILLIS: u64 = 24 * 60 * 60 * 1000;

/// Key stamped into a namespace document on every game-data merge.
const LAST_UPDATED_KEY: &str = "lastUpdated";

// ---------------------------------------------------------------------------
// VerifyOutcome
// ---------------------------------------------------------------------------

/// Result of an email-verification attempt.
///
/// Verification is a one-way transition: once `Verified` has been
/// returned, every later attempt — any token — is `AlreadyVerified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Token matched and was unexpired; the account is now verified.
    Verified,
    /// The account was already verified. No mutation happened.
    AlreadyVerified,
    /// The token doesn't match the one on file (or none is on file).
    InvalidToken,
    /// The token matched but its 24-hour window has passed.
    Expired,
}

// ---------------------------------------------------------------------------
// AccountRecord
// ---------------------------------------------------------------------------

/// One user's durable document, exactly as persisted (camelCase JSON).
///
/// `passwordHash` stays inside the actor: the only outward-facing view
/// is [`snapshot`](Self::snapshot), which omits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: u64,
    pub email_verified: bool,
    #[serde(default)]
    pub verification_token: Option<String>,
    #[serde(default)]
    pub verification_token_expiry: Option<u64>,
    /// The five synced profile keys (see
    /// [`PROFILE_KEYS`]); starts empty.
    #[serde(default)]
    pub profile: Map<String, Value>,
    /// Opaque per-game documents, keyed by namespace.
    #[serde(default)]
    pub game_data: BTreeMap<String, Value>,
    #[serde(default)]
    pub save_slots: SaveSlots,
}

impl AccountRecord {
    /// A fresh account: unverified, empty slots, default game data.
    pub fn new(
        email: String,
        username: String,
        password_hash: String,
        now: u64,
    ) -> Self {
        let mut game_data = BTreeMap::new();
        game_data.insert("chess".to_string(), default_game_data("chess"));
        Self {
            email,
            username,
            password_hash,
            created_at: now,
            email_verified: false,
            verification_token: None,
            verification_token_expiry: None,
            profile: Map::new(),
            game_data,
            save_slots: SaveSlots::default(),
        }
    }

    /// Everything except the password hash.
    pub fn snapshot(&self, address: &AccountAddress) -> ProfileSnapshot {
        ProfileSnapshot {
            user_id: address.clone(),
            email: self.email.clone(),
            username: self.username.clone(),
            created_at: self.created_at,
            email_verified: self.email_verified,
            verification_token: self.verification_token.clone(),
            verification_token_expiry: self.verification_token_expiry,
            profile: self.profile.clone(),
            game_data: self.game_data.clone(),
            save_slots: self.save_slots.clone(),
        }
    }

    /// Shallow, overwrite-per-key profile merge.
    ///
    /// Only the fixed [`PROFILE_KEYS`] are considered; each one present
    /// in `fields` replaces the stored value wholesale, and everything
    /// else (known keys absent from the input, unknown keys in the
    /// input) is left alone. Returns whether anything changed.
    pub fn apply_profile(&mut self, fields: &Map<String, Value>) -> bool {
        let mut changed = false;
        for key in PROFILE_KEYS {
            if let Some(value) = fields.get(key) {
                self.profile.insert(key.to_string(), value.clone());
                changed = true;
            }
        }
        changed
    }

    /// Stores a verification token with a 24-hour expiry, replacing any
    /// previously active token.
    pub fn set_verification_token(&mut self, token: String, now: u64) {
        self.verification_token = Some(token);
        self.verification_token_expiry =
            Some(now + VERIFICATION_TOKEN_TTL_MILLIS);
    }

    /// Attempts the one-way verified transition. Mutates only on
    /// [`VerifyOutcome::Verified`].
    pub fn verify_email(&mut self, token: &str, now: u64) -> VerifyOutcome {
        if self.email_verified {
            return VerifyOutcome::AlreadyVerified;
        }
        if self.verification_token.as_deref() != Some(token) {
            return VerifyOutcome::InvalidToken;
        }
        if self.verification_token_expiry.is_some_and(|exp| now > exp) {
            return VerifyOutcome::Expired;
        }
        self.email_verified = true;
        self.verification_token = None;
        self.verification_token_expiry = None;
        VerifyOutcome::Verified
    }

    /// Shallow-merges `document` into `gameData[namespace]` and stamps
    /// `lastUpdated`.
    ///
    /// Top-level keys of the incoming document replace those of the
    /// stored one; untouched stored keys survive. A stored value that
    /// somehow isn't an object is replaced outright.
    pub fn merge_game_data(
        &mut self,
        namespace: &str,
        document: Map<String, Value>,
        now: u64,
    ) {
        let entry = self
            .game_data
            .entry(namespace.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let Some(target) = entry.as_object_mut() {
            for (key, value) in document {
                target.insert(key, value);
            }
            target.insert(LAST_UPDATED_KEY.to_string(), json!(now));
        }
    }

    /// The stored namespace document, or its fixed default when absent.
    pub fn game_data_or_default(&self, namespace: &str) -> Value {
        self.game_data
            .get(namespace)
            .cloned()
            .unwrap_or_else(|| default_game_data(namespace))
    }

    /// Writes a slot unconditionally and points `lastPlayedSlot` at it.
    pub fn save_slot(
        &mut self,
        slot: SlotId,
        data: Value,
        name: Option<String>,
        now: u64,
    ) {
        *self.save_slots.get_mut(slot) = Some(SlotRecord {
            name: name.unwrap_or_else(|| slot.default_name()),
            data,
            saved_at: now,
        });
        self.save_slots.last_played_slot = Some(slot);
    }
}

// ---------------------------------------------------------------------------
// Namespace defaults
// ---------------------------------------------------------------------------

/// The fixed default document for a game-data namespace.
///
/// "chess" carries the full starter document seeded at signup; every
/// other namespace defaults to an empty object. Reads of an absent
/// namespace return this instead of erroring, so first use needs no
/// setup round-trip.
pub fn default_game_data(namespace: &str) -> Value {
    match namespace {
        "chess" => default_chess_document(),
        _ => Value::Object(Map::new()),
    }
}

fn default_chess_document() -> Value {
    json!({
        "achievements": {},
        "points": 0,
        "shopUnlocks": {
            "boards": ["classic"],
            "pieces": ["classic"],
            "highlightColors": ["red"],
            "arrowColors": ["red"],
            "legalMoveDots": ["gray-circle"],
            "themes": ["light"],
            "checkmateEffects": [],
            "timeControls": ["none"]
        },
        "settings": {
            "boardStyle": "classic",
            "pieceStyle": "classic",
            "highlightColor": "red",
            "arrowColor": "red",
            "legalMoveDotStyle": "gray-circle",
            "pageTheme": "light"
        },
        "stats": {
            "playerStats": { "wins": 0, "losses": 0, "draws": 0 },
            "lifetimeStats": {}
        }
    })
}
