//! Authentication configuration.

/// Configuration for the authentication service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared HMAC secret for HS256 token signing and verification.
    pub jwt_secret: String,
    /// JWT issuer (`iss` claim).
    pub jwt_issuer: String,
    /// JWT audience (`aud` claim).
    pub jwt_audience: String,
    /// Token lifetime in seconds (default: 2_592_000 = 30 days).
    pub token_lifetime_secs: u64,
    /// Minimum password length for policy enforcement.
    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "roombook-development-secret".into(),
            jwt_issuer: "roombook".into(),
            jwt_audience: "roombook-clients".into(),
            token_lifetime_secs: 2_592_000,
            min_password_length: 8,
        }
    }
}
