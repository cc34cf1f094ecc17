//! Error types for application bootstrap.
//!
//! Configuration, connection and shutdown failures are kept apart so the
//! caller can tell which stage of the lifecycle went wrong. HTTP-facing
//! errors live in [`crate::api::error`].

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while assembling the typed configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The environment file could not be read or parsed.
    #[error("error loading env file {path}: {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    /// A required variable is not set.
    #[error("missing required environment variable {0}")]
    Missing(String),

    /// A variable is set but does not parse as its declared type.
    #[error("invalid environment value: {0}")]
    Conversion(String),
}

impl ConfigError {
    /// Translate an `envy` failure into the loader taxonomy.
    ///
    /// `envy` reports missing fields by their serde name, which is the
    /// lowercased variable name without `prefix`.
    pub(crate) fn from_envy(err: envy::Error, prefix: &str) -> Self {
        match err {
            envy::Error::MissingValue(field) => {
                ConfigError::Missing(format!("{}{}", prefix, field.to_uppercase()))
            }
            other => ConfigError::Conversion(other.to_string()),
        }
    }
}

/// Lifecycle errors of the application context.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded; no connection was attempted.
    #[error("error loading environment configuration: {0}")]
    Config(#[from] ConfigError),

    /// The connection factory rejected the descriptor or could not reach
    /// the database.
    #[error("error creating database connection: {0}")]
    Connect(#[source] sqlx::Error),

    /// The cancellation signal fired before the connection was ready.
    #[error("database connection cancelled")]
    Cancelled,

    /// The database handle failed to close cleanly.
    #[error("failed to close db conn: {0}")]
    Shutdown(#[source] sqlx::Error),
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_value_is_named_by_variable() {
        let err = ConfigError::from_envy(envy::Error::MissingValue("port".into()), "DB_");
        assert!(matches!(err, ConfigError::Missing(ref key) if key == "DB_PORT"));
        assert_eq!(
            err.to_string(),
            "missing required environment variable DB_PORT"
        );
    }

    #[test]
    fn test_custom_error_is_conversion() {
        let err = ConfigError::from_envy(envy::Error::Custom("bad digit".to_string()), "");
        assert!(matches!(err, ConfigError::Conversion(_)));
    }

    #[test]
    fn test_config_error_wraps_into_app_error() {
        let err: AppError = ConfigError::Missing("GO_BACKEND_PORT".to_string()).into();
        assert_eq!(
            err.to_string(),
            "error loading environment configuration: missing required environment variable GO_BACKEND_PORT"
        );
    }

    #[test]
    fn test_shutdown_error_message() {
        let err = AppError::Shutdown(sqlx::Error::PoolClosed);
        assert!(err.to_string().starts_with("failed to close db conn"));
    }
}
