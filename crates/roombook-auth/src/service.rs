//! Authentication service: login, registration and password change.

use roombook_core::error::{RoombookError, RoombookResult};
use roombook_core::models::user::{CreateUser, User, UserRole};
use roombook_core::repository::UserRepository;
use tracing::info;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Input for self-registration.
#[derive(Debug)]
pub struct RegisterInput {
    pub full_name: String,
    pub email: String,
    pub password: String,
    /// Registrants declaring themselves lecturers get the Lecturer role;
    /// everyone else is a Student.
    pub is_lecturer: bool,
}

/// Successful login or registration result.
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed JWT access token.
    pub access_token: String,
    pub user_id: Uuid,
    pub role: UserRole,
    /// Token lifetime in seconds.
    pub expires_in: u64,
}

/// Authentication service.
///
/// Generic over the user repository so that the auth layer has no
/// dependency on the database crate.
pub struct AuthService<U: UserRepository> {
    user_repo: U,
    config: AuthConfig,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(user_repo: U, config: AuthConfig) -> Self {
        Self { user_repo, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Authenticate with email + password and issue a token.
    pub async fn login(&self, input: LoginInput) -> RoombookResult<LoginOutput> {
        // 1. Look up the user; an unknown email is indistinguishable from a
        //    wrong password.
        let user = match self.user_repo.get_by_email(&input.email).await {
            Ok(u) => u,
            Err(RoombookError::NotFound { .. }) => {
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        // 2. Verify password.
        if !password::verify_password(&input.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        // 3. Deactivated users cannot sign in.
        if !user.is_active {
            return Err(AuthError::AccountInactive.into());
        }

        info!(user_id = %user.id, "User logged in");
        self.issue(&user)
    }

    /// Create a Student or Lecturer account and sign it in.
    pub async fn register(&self, input: RegisterInput) -> RoombookResult<LoginOutput> {
        password::check_policy(&input.password, self.config.min_password_length)?;

        let role = if input.is_lecturer {
            UserRole::Lecturer
        } else {
            UserRole::Student
        };

        let user = self
            .user_repo
            .create(CreateUser {
                email: input.email,
                full_name: input.full_name,
                password: input.password,
                role,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "User registered");
        self.issue(&user)
    }

    /// Replace the password of `user_id` after verifying the current one.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> RoombookResult<()> {
        let user = self.user_repo.get_by_id(user_id).await?;

        if !password::verify_password(current_password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }
        password::check_policy(new_password, self.config.min_password_length)?;

        self.user_repo.set_password(user_id, new_password).await?;
        info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    fn issue(&self, user: &User) -> RoombookResult<LoginOutput> {
        let access_token = token::issue_access_token(user, &self.config)?;
        Ok(LoginOutput {
            access_token,
            user_id: user.id,
            role: user.role,
            expires_in: self.config.token_lifetime_secs,
        })
    }
}
