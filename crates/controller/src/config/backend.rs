//! HTTP backend settings.

use serde::{Deserialize, Deserializer};

use super::EnvSource;
use crate::error::ConfigError;

/// Backend settings loaded from environment variables.
///
/// The variables do not share a prefix, so each field names its variable
/// explicitly (`envy` matches on the lowercased name):
/// - `GO_BACKEND_PORT`: Server port
/// - `GO_BACKEND_HOST`: Server bind host
/// - `GO_BACKEND_API_PATH`: Path the API routes are mounted under
/// - `HOST_URL`: Public URL of this backend
/// - `RUNNING_IN_DEV`: Enable development mode
/// - `FRONTEND_URL`: Origin of the frontend (optional)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BackendConfig {
    /// Origin allowed by CORS outside development mode
    #[serde(default)]
    pub frontend_url: Option<String>,

    /// Public URL of this backend
    pub host_url: String,

    /// Server port
    #[serde(rename = "go_backend_port")]
    pub port: u16,

    /// Server bind host
    #[serde(rename = "go_backend_host")]
    pub host: String,

    /// API mount path
    #[serde(rename = "go_backend_api_path")]
    pub api_path: String,

    /// Development mode flag
    #[serde(deserialize_with = "flag")]
    pub running_in_dev: bool,
}

impl BackendConfig {
    /// Deserialize the backend record from `source`.
    pub fn from_source(source: &EnvSource) -> Result<Self, ConfigError> {
        envy::from_iter(source.pairs()).map_err(|e| ConfigError::from_envy(e, ""))
    }

    /// Get the server bind address as a string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse a boolean flag.
///
/// Accepts `1`, `t`, `true` and `0`, `f`, `false`, ignoring case.
pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_flag(&value).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "RUNNING_IN_DEV: '{}' is not a boolean",
            value
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> EnvSource {
        [
            ("GO_BACKEND_PORT", "8080"),
            ("GO_BACKEND_HOST", "0.0.0.0"),
            ("GO_BACKEND_API_PATH", "/api/v1"),
            ("HOST_URL", "http://localhost:8080"),
            ("RUNNING_IN_DEV", "true"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_from_source() {
        let config = BackendConfig::from_source(&source()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.api_path, "/api/v1");
        assert_eq!(config.host_url, "http://localhost:8080");
        assert!(config.running_in_dev);
        assert_eq!(config.frontend_url, None);
    }

    #[test]
    fn test_frontend_url_is_read_when_present() {
        let mut source = source();
        source.set("FRONTEND_URL", "http://localhost:3000");
        let config = BackendConfig::from_source(&source).unwrap();
        assert_eq!(config.frontend_url.as_deref(), Some("http://localhost:3000"));
    }

    #[test]
    fn test_bind_address() {
        let config = BackendConfig::from_source(&source()).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_non_integer_port_fails() {
        let mut source = source();
        source.set("GO_BACKEND_PORT", "notanumber");
        let err = BackendConfig::from_source(&source).unwrap_err();
        assert!(matches!(err, ConfigError::Conversion(_)));
    }

    #[test]
    fn test_invalid_flag_fails() {
        let mut source = source();
        source.set("RUNNING_IN_DEV", "sometimes");
        let err = BackendConfig::from_source(&source).unwrap_err();
        assert!(matches!(err, ConfigError::Conversion(ref msg) if msg.contains("RUNNING_IN_DEV")));
    }

    #[test]
    fn test_missing_host_is_named() {
        let source: EnvSource = source()
            .pairs()
            .filter(|(k, _)| k != "GO_BACKEND_HOST")
            .collect();
        let err = BackendConfig::from_source(&source).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ref key) if key == "GO_BACKEND_HOST"));
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("f"), Some(false));
        assert_eq!(parse_flag("False"), Some(false));
        assert_eq!(parse_flag("yes"), None);
        assert_eq!(parse_flag(""), None);
    }
}
