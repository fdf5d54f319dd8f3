//! The fixed three-slot save registry.
//!
//! Every account carries exactly three named save slots plus a pointer
//! to the last one played. Slots are overwritten unconditionally on
//! save; deleting a slot empties it without touching the pointer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// SlotId
// ---------------------------------------------------------------------------

/// One of the three fixed save slots.
///
/// Modeled as an enum rather than a string so an unrecognized slot name
/// can never reach the account actor: it is rejected at the boundary
/// (serde or [`FromStr`]) as a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotId {
    Slot1,
    Slot2,
    Slot3,
}

impl SlotId {
    /// All three slots, in display order.
    pub const ALL: [SlotId; 3] = [SlotId::Slot1, SlotId::Slot2, SlotId::Slot3];

    /// The wire/storage name of this slot (`"slot1"` etc.).
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotId::Slot1 => "slot1",
            SlotId::Slot2 => "slot2",
            SlotId::Slot3 => "slot3",
        }
    }

    /// The default display name used when a save request omits one.
    pub fn default_name(&self) -> String {
        match self {
            SlotId::Slot1 => "Save 1".to_string(),
            SlotId::Slot2 => "Save 2".to_string(),
            SlotId::Slot3 => "Save 3".to_string(),
        }
    }
}

impl FromStr for SlotId {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slot1" => Ok(SlotId::Slot1),
            "slot2" => Ok(SlotId::Slot2),
            "slot3" => Ok(SlotId::Slot3),
            other => Err(ProtocolError::InvalidSlot(other.to_string())),
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SlotRecord / SaveSlots
// ---------------------------------------------------------------------------

/// The contents of one occupied save slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRecord {
    /// Player-visible name of the save.
    pub name: String,
    /// Opaque game payload; the backend never looks inside.
    pub data: Value,
    /// Unix-millis timestamp of the save.
    pub saved_at: u64,
}

/// The full slot registry of one account.
///
/// Serializes to the `{slot1, slot2, slot3, lastPlayedSlot}` shape the
/// slot-listing endpoint returns, and is stored in the account document
/// in the same shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSlots {
    pub slot1: Option<SlotRecord>,
    pub slot2: Option<SlotRecord>,
    pub slot3: Option<SlotRecord>,
    /// The slot most recently written by a save. Deleting a slot does
    /// NOT clear this, even when it points at the deleted slot.
    pub last_played_slot: Option<SlotId>,
}

impl SaveSlots {
    /// Shared access to one slot's contents.
    pub fn get(&self, slot: SlotId) -> &Option<SlotRecord> {
        match slot {
            SlotId::Slot1 => &self.slot1,
            SlotId::Slot2 => &self.slot2,
            SlotId::Slot3 => &self.slot3,
        }
    }

    /// Exclusive access to one slot's contents.
    pub fn get_mut(&mut self, slot: SlotId) -> &mut Option<SlotRecord> {
        match slot {
            SlotId::Slot1 => &mut self.slot1,
            SlotId::Slot2 => &mut self.slot2,
            SlotId::Slot3 => &mut self.slot3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_str_accepts_the_three_fixed_names() {
        assert_eq!("slot1".parse::<SlotId>().unwrap(), SlotId::Slot1);
        assert_eq!("slot2".parse::<SlotId>().unwrap(), SlotId::Slot2);
        assert_eq!("slot3".parse::<SlotId>().unwrap(), SlotId::Slot3);
    }

    #[test]
    fn test_from_str_rejects_unknown_names() {
        assert!("slot4".parse::<SlotId>().is_err());
        assert!("Slot1".parse::<SlotId>().is_err());
        assert!("".parse::<SlotId>().is_err());
    }

    #[test]
    fn test_slot_id_serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&SlotId::Slot2).unwrap(), "\"slot2\"");
        let parsed: SlotId = serde_json::from_str("\"slot3\"").unwrap();
        assert_eq!(parsed, SlotId::Slot3);
        assert!(serde_json::from_str::<SlotId>("\"slot9\"").is_err());
    }

    #[test]
    fn test_save_slots_serializes_to_listing_shape() {
        let mut slots = SaveSlots::default();
        *slots.get_mut(SlotId::Slot2) = Some(SlotRecord {
            name: "Save 2".into(),
            data: json!({"level": 3}),
            saved_at: 1_000,
        });
        slots.last_played_slot = Some(SlotId::Slot2);

        let value = serde_json::to_value(&slots).unwrap();
        assert_eq!(value["slot1"], Value::Null);
        assert_eq!(value["slot2"]["name"], "Save 2");
        assert_eq!(value["slot2"]["savedAt"], 1_000);
        assert_eq!(value["lastPlayedSlot"], "slot2");
    }

    #[test]
    fn test_get_mut_targets_the_right_slot() {
        let mut slots = SaveSlots::default();
        for slot in SlotId::ALL {
            *slots.get_mut(slot) = Some(SlotRecord {
                name: slot.default_name(),
                data: Value::Null,
                saved_at: 0,
            });
        }
        assert_eq!(slots.get(SlotId::Slot1).as_ref().unwrap().name, "Save 1");
        assert_eq!(slots.get(SlotId::Slot3).as_ref().unwrap().name, "Save 3");
    }
}
