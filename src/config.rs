use std::env;

use derive_more::{Display, Error};
use dotenv::dotenv;

const DEFAULT_APP_URL: &str = "http://localhost:3333";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3333";
const DEFAULT_JWT_EXPIRES_IN_SECS: i64 = 7 * 24 * 60 * 60;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Display, Error)]
pub enum ConfigError {
    #[display(fmt = "failed to get env with name '{}'", name)]
    Missing { name: &'static str },

    #[display(fmt = "invalid value '{}' for env '{}'", value, name)]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expires_in_secs: i64,
    /// Public base URL used to build avatar links.
    pub app_url: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
}

impl AppConfig {
    /// Reads the process environment, after loading `.env` when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing { name });

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_expires_in_secs: parse_or(
                "JWT_EXPIRES_IN_SECS",
                lookup("JWT_EXPIRES_IN_SECS"),
                DEFAULT_JWT_EXPIRES_IN_SECS,
            )?,
            app_url: lookup("APP_URL").unwrap_or_else(|| DEFAULT_APP_URL.to_string()),
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            db_max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                lookup("DB_MAX_CONNECTIONS"),
                DEFAULT_DB_MAX_CONNECTIONS,
            )?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
