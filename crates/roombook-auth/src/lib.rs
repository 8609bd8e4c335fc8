//! Roombook Auth: password verification, bearer token issuance and
//! validation, and the account flows built on them (login, registration,
//! password change).

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::{AuthService, LoginInput, LoginOutput, RegisterInput};
pub use token::AccessTokenClaims;
