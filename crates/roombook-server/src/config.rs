//! Server configuration, read from `ROOMBOOK_*` environment variables.

use std::net::SocketAddr;
use std::str::FromStr;

use roombook_auth::AuthConfig;
use roombook_db::DbConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen address (default `127.0.0.1:8080`).
    pub addr: SocketAddr,
    pub db: DbConfig,
    pub auth: AuthConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            db: DbConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read the configuration from the process environment. Unset variables
    /// keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(addr) = parsed(&lookup, "ROOMBOOK_ADDR")? {
            config.addr = addr;
        }

        if let Some(url) = lookup("ROOMBOOK_DB_URL") {
            config.db.url = url;
        }
        if let Some(namespace) = lookup("ROOMBOOK_DB_NAMESPACE") {
            config.db.namespace = namespace;
        }
        if let Some(database) = lookup("ROOMBOOK_DB_DATABASE") {
            config.db.database = database;
        }
        config.db.username = lookup("ROOMBOOK_DB_USERNAME");
        config.db.password = lookup("ROOMBOOK_DB_PASSWORD");

        if let Some(secret) = lookup("ROOMBOOK_JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }
        if let Some(issuer) = lookup("ROOMBOOK_JWT_ISSUER") {
            config.auth.jwt_issuer = issuer;
        }
        if let Some(audience) = lookup("ROOMBOOK_JWT_AUDIENCE") {
            config.auth.jwt_audience = audience;
        }
        if let Some(lifetime) = parsed(&lookup, "ROOMBOOK_TOKEN_LIFETIME_SECS")? {
            config.auth.token_lifetime_secs = lifetime;
        }

        Ok(config)
    }

    /// Whether the signing secret is still the built-in development value.
    pub fn uses_default_secret(&self) -> bool {
        self.auth.jwt_secret == AuthConfig::default().jwt_secret
    }
}

fn parsed<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|value| {
            value.parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_variables() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.db.url, "mem://");
        assert_eq!(config.auth.token_lifetime_secs, 2_592_000);
        assert!(config.db.username.is_none());
        assert!(config.uses_default_secret());
    }

    #[test]
    fn variables_override_defaults() {
        let config = AppConfig::from_lookup(lookup(&[
            ("ROOMBOOK_ADDR", "0.0.0.0:9000"),
            ("ROOMBOOK_DB_URL", "ws://db:8000"),
            ("ROOMBOOK_DB_USERNAME", "root"),
            ("ROOMBOOK_JWT_SECRET", "s3cret"),
            ("ROOMBOOK_TOKEN_LIFETIME_SECS", "60"),
        ]))
        .unwrap();
        assert_eq!(config.addr.port(), 9000);
        assert_eq!(config.db.url, "ws://db:8000");
        assert_eq!(config.db.username.as_deref(), Some("root"));
        assert_eq!(config.auth.token_lifetime_secs, 60);
        assert!(!config.uses_default_secret());
    }

    #[test]
    fn invalid_numbers_are_errors() {
        let err = AppConfig::from_lookup(lookup(&[("ROOMBOOK_TOKEN_LIFETIME_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("ROOMBOOK_TOKEN_LIFETIME_SECS"));
    }
}
