use chrono::{DateTime, NaiveDate, Utc};
use garde::Validate;
use roombook_core::models::booking::Booking;
use roombook_core::models::slot::RoomSlot;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomSlotBody {
    #[garde(skip)]
    pub room_id: Uuid,
    #[garde(range(min = 1))]
    pub slot_number: u32,
}

impl From<RoomSlotBody> for RoomSlot {
    fn from(value: RoomSlotBody) -> Self {
        RoomSlot::new(value.room_id, value.slot_number)
    }
}

impl From<RoomSlot> for RoomSlotBody {
    fn from(value: RoomSlot) -> Self {
        Self {
            room_id: value.room_id,
            slot_number: value.slot_number,
        }
    }
}

/// Booking request. Pairs may be given as `roomslots`, or as one `roomId`
/// with several `slotNumbers`; both forms are merged.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[garde(skip)]
    pub booking_date: NaiveDate,
    #[serde(default)]
    #[garde(dive)]
    pub roomslots: Vec<RoomSlotBody>,
    #[serde(default)]
    #[garde(skip)]
    pub room_id: Option<Uuid>,
    #[serde(default)]
    #[garde(inner(range(min = 1)))]
    pub slot_numbers: Vec<u32>,
}

impl CreateBookingRequest {
    pub fn into_pairs(self) -> (NaiveDate, Vec<RoomSlot>) {
        let CreateBookingRequest {
            booking_date,
            roomslots,
            room_id,
            slot_numbers,
        } = self;

        let mut pairs: Vec<RoomSlot> = roomslots.into_iter().map(RoomSlot::from).collect();
        if let Some(room_id) = room_id {
            pairs.extend(slot_numbers.into_iter().map(|n| RoomSlot::new(room_id, n)));
        }
        (booking_date, pairs)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub booking_date: NaiveDate,
    pub status: String,
    pub roomslots: Vec<RoomSlotBody>,
    pub requested_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking {
            id,
            user_id,
            booking_date,
            status,
            roomslots,
            requested_at,
            approved_at,
            cancelled_at,
        } = value;
        Self {
            id,
            user_id,
            booking_date,
            status: status.to_string(),
            roomslots: roomslots.into_iter().map(RoomSlotBody::from).collect(),
            requested_at,
            approved_at,
            cancelled_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_request_shapes_are_merged() {
        let room_a = Uuid::new_v4();
        let room_b = Uuid::new_v4();
        let req: CreateBookingRequest = serde_json::from_value(serde_json::json!({
            "bookingDate": "2030-01-15",
            "roomslots": [{ "roomId": room_a, "slotNumber": 1 }],
            "roomId": room_b,
            "slotNumbers": [2, 3],
        }))
        .unwrap();
        req.validate().unwrap();

        let (date, pairs) = req.into_pairs();
        assert_eq!(date, NaiveDate::from_ymd_opt(2030, 1, 15).unwrap());
        assert_eq!(
            pairs,
            vec![
                RoomSlot::new(room_a, 1),
                RoomSlot::new(room_b, 2),
                RoomSlot::new(room_b, 3),
            ]
        );
    }

    #[test]
    fn slot_numbers_without_room_are_ignored() {
        let req: CreateBookingRequest = serde_json::from_value(serde_json::json!({
            "bookingDate": "2030-01-15",
            "slotNumbers": [1],
        }))
        .unwrap();
        let (_, pairs) = req.into_pairs();
        assert!(pairs.is_empty());
    }

    #[test]
    fn slot_zero_fails_validation() {
        let req: CreateBookingRequest = serde_json::from_value(serde_json::json!({
            "bookingDate": "2030-01-15",
            "roomslots": [{ "roomId": Uuid::new_v4(), "slotNumber": 0 }],
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }
}
