use chrono::{DateTime, Utc};
use garde::Validate;
use roombook_core::models::room::{CreateRoom, Room, UpdateRoom};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::pagination::PageQuery;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[garde(skip)]
    pub campus_id: Uuid,
    #[garde(length(min = 1, max = 50))]
    pub code: String,
    #[garde(length(min = 1, max = 100))]
    pub room_type: String,
    #[garde(range(min = 1))]
    pub capacity: u32,
}

impl From<CreateRoomRequest> for CreateRoom {
    fn from(value: CreateRoomRequest) -> Self {
        let CreateRoomRequest {
            campus_id,
            code,
            room_type,
            capacity,
        } = value;
        Self {
            campus_id,
            code,
            room_type,
            capacity,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    #[garde(skip)]
    pub campus_id: Option<Uuid>,
    #[garde(length(min = 1, max = 50))]
    pub code: Option<String>,
    #[garde(length(min = 1, max = 100))]
    pub room_type: Option<String>,
    #[garde(range(min = 1))]
    pub capacity: Option<u32>,
    #[garde(skip)]
    pub is_available: Option<bool>,
}

impl From<UpdateRoomRequest> for UpdateRoom {
    fn from(value: UpdateRoomRequest) -> Self {
        let UpdateRoomRequest {
            campus_id,
            code,
            room_type,
            capacity,
            is_available,
        } = value;
        Self {
            campus_id,
            code,
            room_type,
            capacity,
            is_available,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomsByCampusQuery {
    pub campus_id: Uuid,
    pub current_page: Option<u64>,
    pub page_size: Option<u64>,
}

impl RoomsByCampusQuery {
    pub fn page(&self) -> PageQuery {
        PageQuery::new(self.current_page, self.page_size)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomByCodeQuery {
    pub code: String,
    pub campus_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub id: Uuid,
    pub campus_id: Uuid,
    pub code: String,
    pub room_type: String,
    pub capacity: u32,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Room> for RoomResponse {
    fn from(value: Room) -> Self {
        let Room {
            id,
            campus_id,
            code,
            room_type,
            capacity,
            is_available,
            created_at,
            updated_at,
        } = value;
        Self {
            id,
            campus_id,
            code,
            room_type,
            capacity,
            is_available,
            created_at,
            updated_at,
        }
    }
}
