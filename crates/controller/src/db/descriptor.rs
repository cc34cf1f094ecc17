//! Connection descriptor derived from [`DatabaseConfig`].
//!
//! The descriptor is a libpq key/value string with a fixed key order:
//!
//! ```text
//! host=<host> user=<user> password=<password> dbname=<name> port=<port> sslmode=<ssl> TimeZone=<tz>
//! ```
//!
//! Values that are empty or contain whitespace, `'` or `\` are wrapped in
//! single quotes with `\'` and `\\` escapes, so every descriptor parses
//! back into the record it was built from.

use std::fmt;
use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use thiserror::Error;

use crate::config::DatabaseConfig;

const KEYS: [&str; 7] = [
    "host", "user", "password", "dbname", "port", "sslmode", "TimeZone",
];

/// Errors raised when a descriptor cannot be read back.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("missing '=' after key '{0}'")]
    MissingEquals(String),

    #[error("unterminated quoted value for key '{0}'")]
    UnterminatedQuote(String),

    #[error("unknown key '{0}'")]
    UnknownKey(String),

    #[error("missing key '{0}'")]
    MissingKey(&'static str),

    #[error("invalid port '{0}'")]
    InvalidPort(String),
}

/// Deterministic connection string for the database driver.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor(String);

impl ConnectionDescriptor {
    /// Build the descriptor for `config`. Same input, byte-identical output.
    pub fn from_config(config: &DatabaseConfig) -> Self {
        let port = config.port.to_string();
        let values = [
            config.host.as_str(),
            config.user.as_str(),
            config.password.as_str(),
            config.name.as_str(),
            port.as_str(),
            config.ssl_mode.as_str(),
            config.timezone.as_str(),
        ];

        let descriptor = KEYS
            .iter()
            .zip(values)
            .map(|(key, value)| format!("{}={}", key, quote(value)))
            .collect::<Vec<_>>()
            .join(" ");

        Self(descriptor)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the descriptor back into its database fields.
    pub fn parse_fields(&self) -> Result<DatabaseConfig, DescriptorError> {
        let mut slots: [Option<String>; 7] = Default::default();
        for (key, value) in tokenize(&self.0)? {
            let index = KEYS
                .iter()
                .position(|k| *k == key)
                .ok_or_else(|| DescriptorError::UnknownKey(key.clone()))?;
            slots[index] = Some(value);
        }

        let mut take = |index: usize| {
            slots[index]
                .take()
                .ok_or(DescriptorError::MissingKey(KEYS[index]))
        };

        let host = take(0)?;
        let user = take(1)?;
        let password = take(2)?;
        let name = take(3)?;
        let port = take(4)?;
        let ssl_mode = take(5)?;
        let timezone = take(6)?;
        let port = port
            .parse::<u16>()
            .map_err(|_| DescriptorError::InvalidPort(port.clone()))?;

        Ok(DatabaseConfig {
            host,
            user,
            password,
            name,
            ssl_mode,
            timezone,
            port,
        })
    }

    /// Get PostgreSQL connection options.
    ///
    /// A malformed descriptor or an unknown SSL mode is reported as
    /// `sqlx::Error::Configuration`.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        let fields = self
            .parse_fields()
            .map_err(|e| sqlx::Error::Configuration(Box::new(e)))?;
        let ssl_mode = PgSslMode::from_str(&fields.ssl_mode)?;

        Ok(PgConnectOptions::new()
            .host(&fields.host)
            .port(fields.port)
            .username(&fields.user)
            .password(&fields.password)
            .database(&fields.name)
            .ssl_mode(ssl_mode)
            .options([("TimeZone", fields.timezone.as_str())]))
    }
}

impl From<&DatabaseConfig> for ConnectionDescriptor {
    fn from(config: &DatabaseConfig) -> Self {
        Self::from_config(config)
    }
}

impl fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parse_fields() {
            Ok(fields) => f
                .debug_struct("ConnectionDescriptor")
                .field("host", &fields.host)
                .field("port", &fields.port)
                .field("dbname", &fields.name)
                .finish_non_exhaustive(),
            Err(_) => f.write_str("ConnectionDescriptor(<malformed>)"),
        }
    }
}

fn quote(value: &str) -> String {
    let needs_quotes =
        value.is_empty() || value.chars().any(|c| c.is_whitespace() || c == '\'' || c == '\\');
    if !needs_quotes {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if c == '\'' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

fn tokenize(input: &str) -> Result<Vec<(String, String)>, DescriptorError> {
    let mut pairs = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let mut key = String::new();
        while let Some(c) = chars.next_if(|c| *c != '=' && !c.is_whitespace()) {
            key.push(c);
        }
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.next() != Some('=') {
            return Err(DescriptorError::MissingEquals(key));
        }
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let mut value = String::new();
        if chars.next_if_eq(&'\'').is_some() {
            loop {
                match chars.next() {
                    Some('\\') => match chars.next() {
                        Some(c) => value.push(c),
                        None => return Err(DescriptorError::UnterminatedQuote(key)),
                    },
                    Some('\'') => break,
                    Some(c) => value.push(c),
                    None => return Err(DescriptorError::UnterminatedQuote(key)),
                }
            }
        } else {
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        value.push(escaped);
                    }
                } else {
                    value.push(c);
                }
            }
        }

        pairs.push((key, value));
    }

    Ok(pairs)
}
