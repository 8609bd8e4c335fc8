//! JWT bearer token issuance and verification (HS256).

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use roombook_core::models::user::{User, UserRole};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// JWT claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject: user ID (UUID string).
    pub sub: String,
    /// Full name of the user.
    pub name: String,
    pub email: String,
    /// Role code (0 = Admin, 1 = Student, 2 = Lecturer, 3 = Manager).
    pub role: u8,
    /// Issuer.
    pub iss: String,
    /// Audience.
    pub aud: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
    /// Unique token ID (UUID string).
    pub jti: String,
}

impl AccessTokenClaims {
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub)
            .map_err(|e| AuthError::TokenInvalid(format!("bad subject: {e}")))
    }

    pub fn role(&self) -> Result<UserRole, AuthError> {
        UserRole::try_from(self.role)
            .map_err(|e| AuthError::TokenInvalid(format!("bad role: {e}")))
    }
}

/// Issue a signed HS256 JWT access token for `user`.
pub fn issue_access_token(user: &User, config: &AuthConfig) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = AccessTokenClaims {
        sub: user.id.to_string(),
        name: user.full_name.clone(),
        email: user.email.clone(),
        role: user.role.code(),
        iss: config.jwt_issuer.clone(),
        aud: config.jwt_audience.clone(),
        iat: now,
        exp: now + config.token_lifetime_secs as i64,
        jti: Uuid::new_v4().to_string(),
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
}

/// Validate a JWT access token (signature, expiry, issuer, audience) and
/// return the verified claims.
///
/// Purely stateless: no database lookup is performed.
pub fn validate_access_token(
    token: &str,
    config: &AuthConfig,
) -> Result<AccessTokenClaims, AuthError> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.jwt_issuer]);
    validation.set_audience(&[&config.jwt_audience]);
    validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

    jsonwebtoken::decode::<AccessTokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".into(),
            jwt_issuer: "roombook-test".into(),
            jwt_audience: "roombook-test-clients".into(),
            ..AuthConfig::default()
        }
    }

    fn test_user(role: UserRole) -> User {
        User {
            id: Uuid::new_v4(),
            email: "alice@example.com".into(),
            full_name: "Alice".into(),
            password_hash: String::new(),
            role,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn jwt_roundtrip() {
        let config = test_config();
        let user = test_user(UserRole::Lecturer);

        let token = issue_access_token(&user, &config).unwrap();
        let claims = validate_access_token(&token, &config).unwrap();

        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.role().unwrap(), UserRole::Lecturer);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.name, "Alice");
        assert_eq!(claims.iss, "roombook-test");
        assert_eq!(claims.exp - claims.iat, config.token_lifetime_secs as i64);
    }

    #[test]
    fn jti_is_unique() {
        let config = test_config();
        let user = test_user(UserRole::Student);

        let c1 = validate_access_token(&issue_access_token(&user, &config).unwrap(), &config)
            .unwrap();
        let c2 = validate_access_token(&issue_access_token(&user, &config).unwrap(), &config)
            .unwrap();
        assert_ne!(c1.jti, c2.jti);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let config = test_config();
        let token = issue_access_token(&test_user(UserRole::Student), &config).unwrap();

        let other = AuthConfig {
            jwt_secret: "another-secret".into(),
            ..test_config()
        };
        assert!(matches!(
            validate_access_token(&token, &other),
            Err(AuthError::TokenInvalid(_))
        ));
    }

    #[test]
    fn wrong_audience_is_rejected() {
        let config = test_config();
        let token = issue_access_token(&test_user(UserRole::Student), &config).unwrap();

        let other = AuthConfig {
            jwt_audience: "someone-else".into(),
            ..test_config()
        };
        assert!(validate_access_token(&token, &other).is_err());
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let config = test_config();
        let user = test_user(UserRole::Student);
        let now = Utc::now().timestamp();
        let claims = AccessTokenClaims {
            sub: user.id.to_string(),
            name: user.full_name,
            email: user.email,
            role: user.role.code(),
            iss: config.jwt_issuer.clone(),
            aud: config.jwt_audience.clone(),
            iat: now - 7200,
            exp: now - 3600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            validate_access_token(&token, &config),
            Err(AuthError::TokenExpired)
        ));
    }
}
