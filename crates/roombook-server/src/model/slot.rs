use roombook_core::models::slot::Slot;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotResponse {
    pub slot_number: u32,
    /// `HH:MM`
    pub start_time: String,
    pub end_time: String,
}

impl From<Slot> for SlotResponse {
    fn from(value: Slot) -> Self {
        Self {
            slot_number: value.slot_number,
            start_time: value.start_time.format("%H:%M").to_string(),
            end_time: value.end_time.format("%H:%M").to_string(),
        }
    }
}
