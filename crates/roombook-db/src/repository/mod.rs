//! SurrealDB repository implementations.

mod booking;
mod campus;
mod date_lock;
mod room;
mod slot;
mod user;

pub use booking::SurrealBookingRepository;
pub use campus::SurrealCampusRepository;
pub use date_lock::DateLocks;
pub use room::SurrealRoomRepository;
pub use slot::SurrealSlotRepository;
pub use user::SurrealUserRepository;

use roombook_core::models::slot::RoomSlot;
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

fn first_total(rows: Vec<CountRow>) -> u64 {
    rows.first().map(|r| r.total).unwrap_or(0)
}

fn parse_uuid(value: &str, what: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(value).map_err(|e| DbError::Decode(format!("invalid {what} UUID: {e}")))
}

/// Row struct for roomslot keys (`roomslot` and `booking_roomslot`).
#[derive(Debug, SurrealValue)]
struct RoomSlotRow {
    room_id: String,
    slot_number: u32,
}

impl RoomSlotRow {
    fn try_into_roomslot(self) -> Result<RoomSlot, DbError> {
        Ok(RoomSlot::new(parse_uuid(&self.room_id, "room")?, self.slot_number))
    }
}

fn into_roomslots(rows: Vec<RoomSlotRow>) -> Result<Vec<RoomSlot>, DbError> {
    rows.into_iter().map(RoomSlotRow::try_into_roomslot).collect()
}
