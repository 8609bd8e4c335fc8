//! Room domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub campus_id: Uuid,
    /// Unique within the owning campus.
    pub code: String,
    pub room_type: String,
    pub capacity: u32,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoom {
    pub campus_id: Uuid,
    pub code: String,
    pub room_type: String,
    pub capacity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateRoom {
    pub campus_id: Option<Uuid>,
    pub code: Option<String>,
    pub room_type: Option<String>,
    pub capacity: Option<u32>,
    pub is_available: Option<bool>,
}
