//! Database configuration for the PostgreSQL connection.

use serde::Deserialize;

use super::EnvSource;
use crate::error::ConfigError;

/// Prefix shared by all database variables.
pub const DB_PREFIX: &str = "DB_";

/// Database configuration loaded from environment variables.
///
/// Environment variables are prefixed with `DB_`:
/// - `DB_HOST`: Database host
/// - `DB_PORT`: Database port
/// - `DB_USER`: Database user
/// - `DB_PASS`: Database password
/// - `DB_NAME`: Database name
/// - `DB_SSL`: SSL mode (`disable`, `require`, ...)
/// - `DB_TZ`: Session timezone
///
/// All of them are required; an empty value counts as set.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    /// Database host
    pub host: String,

    /// Database user
    pub user: String,

    /// Database password
    #[serde(rename = "pass")]
    pub password: String,

    /// Database name
    pub name: String,

    /// SSL mode passed to the driver
    #[serde(rename = "ssl")]
    pub ssl_mode: String,

    /// Session timezone
    #[serde(rename = "tz")]
    pub timezone: String,

    /// Database port
    pub port: u16,
}

impl DatabaseConfig {
    /// Deserialize the database record from the `DB_`-prefixed keys of
    /// `source`.
    pub fn from_source(source: &EnvSource) -> Result<Self, ConfigError> {
        envy::prefixed(DB_PREFIX)
            .from_iter(source.pairs())
            .map_err(|e| ConfigError::from_envy(e, DB_PREFIX))
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("ssl_mode", &self.ssl_mode)
            .field("timezone", &self.timezone)
            .field("port", &self.port)
            .finish()
    }
}
