use secrecy::Secret;
use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:4200,http://localhost:3000,http://localhost:8080";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Settings consumed by the token issuer and the `AuthenticatedUser` extractor.
#[derive(Clone)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    pub access_token_expiry_minutes: i64,
}

impl JwtSettings {
    pub fn new(secret: impl Into<String>, access_token_expiry_minutes: i64) -> Self {
        Self {
            secret: Secret::new(secret.into()),
            access_token_expiry_minutes,
        }
    }
}

/// Connection pool sizing for the Postgres store.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
}

/// Application configuration, built once in `main` and handed to the
/// collaborators that need it.
#[derive(Clone)]
pub struct AppConfig {
    pub project_name: String,
    pub api_prefix: String,
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
}

impl AppConfig {
    /// Read configuration from the process environment (call `dotenvy::dotenv()` first).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            project_name: lookup("PROJECT_NAME").unwrap_or_else(|| "Finance Tracker API".to_string()),
            api_prefix: lookup("API_V1_STR").unwrap_or_else(|| "/api/v1".to_string()),
            host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "SERVER_PORT", 8080)?,
            cors_allowed_origins,
            database: DatabaseSettings {
                url: database_url,
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 20)?,
                min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", 5)?,
                acquire_timeout: Duration::from_secs(parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 3)?),
            },
            jwt: JwtSettings::new(
                jwt_secret,
                parse_or(&lookup, "ACCESS_TOKEN_EXPIRE_MINUTES", 30)?,
            ),
        })
    }

    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        self.cors_allowed_origins.iter().any(|allowed| allowed == origin)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
