//! Slot and Roomslot domain models.
//!
//! Slots are fixed time-of-day intervals seeded by the schema migrations;
//! a Roomslot pairs a room with one of them and is reused across dates.

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Slot {
    pub slot_number: u32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Composite key of a Roomslot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoomSlot {
    pub room_id: Uuid,
    pub slot_number: u32,
}

impl RoomSlot {
    pub fn new(room_id: Uuid, slot_number: u32) -> Self {
        Self {
            room_id,
            slot_number,
        }
    }
}

impl fmt::Display for RoomSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room {} slot {}", self.room_id, self.slot_number)
    }
}
