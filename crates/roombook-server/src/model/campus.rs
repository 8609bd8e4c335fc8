use chrono::{DateTime, Utc};
use garde::Validate;
use roombook_core::models::campus::{Campus, CreateCampus, UpdateCampus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampusRequest {
    #[garde(length(min = 1, max = 200))]
    pub name: String,
}

impl From<CreateCampusRequest> for CreateCampus {
    fn from(value: CreateCampusRequest) -> Self {
        Self { name: value.name }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCampusRequest {
    #[garde(length(min = 1, max = 200))]
    pub name: Option<String>,
}

impl From<UpdateCampusRequest> for UpdateCampus {
    fn from(value: UpdateCampusRequest) -> Self {
        Self { name: value.name }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampusResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Campus> for CampusResponse {
    fn from(value: Campus) -> Self {
        let Campus {
            id,
            name,
            created_at,
            updated_at,
        } = value;
        Self {
            id,
            name,
            created_at,
            updated_at,
        }
    }
}
