//! Configuration module for the controller.
//!
//! Settings are gathered into an [`EnvSource`] (env file overlaid by the
//! process environment) and deserialized with `envy` into an
//! [`EnvConfig`] made of two named records. Every variable except
//! `FRONTEND_URL` is required; a missing or malformed value fails the
//! whole load.

mod backend;
mod database;
mod source;

use std::path::Path;

pub use backend::BackendConfig;
pub use database::{DatabaseConfig, DB_PREFIX};
pub use source::{EnvSource, DEFAULT_ENV_FILE};

use crate::error::ConfigError;
use crate::result_ext::ResultExt;

/// Typed application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub backend: BackendConfig,
    pub database: DatabaseConfig,
}

impl EnvConfig {
    /// Load `path` plus the process environment and build the configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = EnvSource::load(path).log("Loading env file")?;
        Self::from_source(&source)
    }

    /// Build the configuration from an already collected source.
    pub fn from_source(source: &EnvSource) -> Result<Self, ConfigError> {
        let backend =
            BackendConfig::from_source(source).log("Provide missing backend environment variables")?;
        let database = DatabaseConfig::from_source(source)
            .log("Provide missing database environment variables")?;
        Ok(Self { backend, database })
    }
}
