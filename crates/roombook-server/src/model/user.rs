use chrono::{DateTime, Utc};
use garde::Validate;
use roombook_auth::{LoginInput, LoginOutput, RegisterInput};
use roombook_core::models::user::{UpdateUser, User, UserRole};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 1))]
    pub password: String,
}

impl From<LoginRequest> for LoginInput {
    fn from(value: LoginRequest) -> Self {
        let LoginRequest { email, password } = value;
        Self { email, password }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[garde(length(min = 1, max = 200))]
    pub full_name: String,
    #[garde(email)]
    pub email: String,
    // Minimum length is enforced by the auth service policy.
    #[garde(length(min = 1))]
    pub password: String,
    #[serde(default)]
    #[garde(skip)]
    pub is_lecturer: bool,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(value: RegisterRequest) -> Self {
        let RegisterRequest {
            full_name,
            email,
            password,
            is_lecturer,
        } = value;
        Self {
            full_name,
            email,
            password,
            is_lecturer,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
    pub user_id: Uuid,
    pub role: u8,
}

impl From<LoginOutput> for TokenResponse {
    fn from(value: LoginOutput) -> Self {
        let LoginOutput {
            access_token,
            user_id,
            role,
            expires_in,
        } = value;
        Self {
            access_token,
            token_type: "Bearer",
            expires_in,
            user_id,
            role: role.code(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: u8,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let User {
            id,
            email,
            full_name,
            role,
            is_active,
            created_at,
            updated_at,
            ..
        } = value;
        Self {
            id,
            email,
            full_name,
            role: role.code(),
            is_active,
            created_at,
            updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[garde(length(min = 1, max = 200))]
    pub full_name: String,
}

impl From<UpdateProfileRequest> for UpdateUser {
    fn from(value: UpdateProfileRequest) -> Self {
        Self {
            full_name: Some(value.full_name),
            ..Default::default()
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[garde(length(min = 1))]
    pub current_password: String,
    #[garde(length(min = 1))]
    pub new_password: String,
}

/// Manager-side user edit. Absent fields stay unchanged.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateUserRequest {
    #[garde(length(min = 1, max = 200))]
    pub full_name: Option<String>,
    #[garde(email)]
    pub email: Option<String>,
    #[garde(skip)]
    pub role: Option<u8>,
    #[garde(skip)]
    pub is_active: Option<bool>,
}

impl TryFrom<AdminUpdateUserRequest> for UpdateUser {
    type Error = ApiError;

    fn try_from(value: AdminUpdateUserRequest) -> Result<Self, Self::Error> {
        let AdminUpdateUserRequest {
            full_name,
            email,
            role,
            is_active,
        } = value;
        Ok(Self {
            full_name,
            email,
            role: role.map(UserRole::try_from).transpose()?,
            is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_defaults_to_student() {
        let req: RegisterRequest = serde_json::from_value(serde_json::json!({
            "fullName": "Alice",
            "email": "alice@example.com",
            "password": "CorrectHorse1",
        }))
        .unwrap();
        assert!(!req.is_lecturer);
        req.validate().unwrap();
    }

    #[test]
    fn malformed_email_fails_validation() {
        let req = LoginRequest {
            email: "not-an-email".into(),
            password: "x".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn unknown_role_code_is_rejected() {
        let req = AdminUpdateUserRequest {
            full_name: None,
            email: None,
            role: Some(9),
            is_active: None,
        };
        assert!(UpdateUser::try_from(req).is_err());
    }
}
