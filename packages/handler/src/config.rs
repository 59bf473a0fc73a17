use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const DATABASE_MAX_CONNECTIONS: &str = "DATABASE_MAX_CONNECTIONS";
pub const DATABASE_MIN_CONNECTIONS: &str = "DATABASE_MIN_CONNECTIONS";
pub const DATABASE_CONNECT_TIMEOUT_SECS: &str = "DATABASE_CONNECT_TIMEOUT_SECS";
pub const DATABASE_SQLX_LOGGING: &str = "DATABASE_SQLX_LOGGING";
pub const FUNCTION_NAME: &str = "FUNCTION_NAME";
pub const SUCCESS_MESSAGE: &str = "SUCCESS_MESSAGE";
pub const ERROR_FALLBACK_MESSAGE: &str = "ERROR_FALLBACK_MESSAGE";
pub const USER_NAME: &str = "USER_NAME";
pub const USER_EMAIL: &str = "USER_EMAIL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Connection pool settings for the ORM client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub sqlx_logging: bool,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(8),
            sqlx_logging: false,
        }
    }
}

/// What one deployed copy of the function creates and answers with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionProfile {
    pub name: String,
    pub success_message: String,
    pub fallback_message: String,
    pub user_name: String,
    pub user_email: String,
}

impl Default for FunctionProfile {
    fn default() -> Self {
        Self {
            name: "function1".to_string(),
            success_message: "hello world from function1 qwerwtr123".to_string(),
            fallback_message: "some error happened".to_string(),
            user_name: "Alice".to_string(),
            user_email: "alice@prisma.io123".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    pub database: DatabaseConfig,
    pub profile: FunctionProfile,
}

impl HandlerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let url = get(DATABASE_URL).ok_or(ConfigError::Missing(DATABASE_URL))?;
        let mut database = DatabaseConfig::new(url);
        if let Some(value) = get(DATABASE_MAX_CONNECTIONS) {
            database.max_connections = parse(DATABASE_MAX_CONNECTIONS, value)?;
        }
        if let Some(value) = get(DATABASE_MIN_CONNECTIONS) {
            database.min_connections = parse(DATABASE_MIN_CONNECTIONS, value)?;
        }
        if let Some(value) = get(DATABASE_CONNECT_TIMEOUT_SECS) {
            database.connect_timeout =
                Duration::from_secs(parse(DATABASE_CONNECT_TIMEOUT_SECS, value)?);
        }
        if let Some(value) = get(DATABASE_SQLX_LOGGING) {
            database.sqlx_logging = parse(DATABASE_SQLX_LOGGING, value)?;
        }

        if database.min_connections > database.max_connections {
            return Err(ConfigError::Invalid {
                key: DATABASE_MIN_CONNECTIONS,
                value: database.min_connections.to_string(),
            });
        }

        let defaults = FunctionProfile::default();
        let profile = FunctionProfile {
            name: get(FUNCTION_NAME).unwrap_or(defaults.name),
            success_message: get(SUCCESS_MESSAGE).unwrap_or(defaults.success_message),
            fallback_message: get(ERROR_FALLBACK_MESSAGE).unwrap_or(defaults.fallback_message),
            user_name: get(USER_NAME).unwrap_or(defaults.user_name),
            user_email: get(USER_EMAIL).unwrap_or(defaults.user_email),
        };

        Ok(Self { database, profile })
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}
