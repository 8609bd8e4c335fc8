//! User domain model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RoombookError;

/// Role codes as carried in bearer tokens and stored on the user record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub enum UserRole {
    Admin = 0,
    Student = 1,
    Lecturer = 2,
    Manager = 3,
}

impl UserRole {
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Campus, room and user administration.
    pub fn can_manage_facilities(self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Manager)
    }

    /// Reviewing the pending queue and approving or rejecting bookings.
    pub fn can_moderate_bookings(self) -> bool {
        matches!(
            self,
            UserRole::Admin | UserRole::Lecturer | UserRole::Manager
        )
    }
}

impl TryFrom<u8> for UserRole {
    type Error = RoombookError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(UserRole::Admin),
            1 => Ok(UserRole::Student),
            2 => Ok(UserRole::Lecturer),
            3 => Ok(UserRole::Manager),
            other => Err(RoombookError::validation(format!(
                "unknown role code: {other}"
            ))),
        }
    }
}

impl From<UserRole> for u8 {
    fn from(role: UserRole) -> Self {
        role.code()
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    /// Argon2id PHC string; never serialized to clients.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub full_name: String,
    /// Raw password (will be hashed with Argon2id before storage).
    pub password: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}
