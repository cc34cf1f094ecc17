//! Log-and-return helpers for `Result` and `Option`.
//!
//! Bootstrap failures are returned to the caller, never swallowed. These
//! extensions record the failure at the point it is observed and hand the
//! value back unchanged.

use std::fmt::Display;
use std::panic::Location;

use tracing::{error, warn};

/// Extension trait for logging errors with context.
pub trait ResultExt<T, E> {
    /// Log the error with `context` and the caller location if this is an
    /// `Err`, then return `self`.
    ///
    /// ```ignore
    /// use controller::result_ext::ResultExt;
    ///
    /// let conf = EnvConfig::load(".env").log("loading environment configuration")?;
    /// ```
    fn log<S: ToString>(self, context: S) -> Result<T, E>;
}

impl<T, E: Display> ResultExt<T, E> for Result<T, E> {
    #[track_caller]
    fn log<S: ToString>(self, context: S) -> Result<T, E> {
        if let Err(e) = &self {
            let location = caller();
            error!(
                target: "controller",
                error = %e,
                location = %location,
                context = %context.to_string(),
                "Operation failed"
            );
        }
        self
    }
}

/// Extension trait for noting an absent optional setting.
pub trait OptionResultExt<T> {
    /// Emit a warning with `context` if this is `None`.
    fn log_none<S: ToString>(self, context: S) -> Option<T>;
}

impl<T> OptionResultExt<T> for Option<T> {
    #[track_caller]
    fn log_none<S: ToString>(self, context: S) -> Option<T> {
        if self.is_none() {
            let location = caller();
            warn!(
                target: "controller",
                location = %location,
                context = %context.to_string(),
                "Optional setting absent"
            );
        }
        self
    }
}

/// `file:line` of the code that called the logging helper.
#[track_caller]
fn caller() -> String {
    let location = Location::caller();
    format!("{}:{}", location.file(), location.line())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_log_passes_ok_through() {
        let result: Result<u16, ConfigError> = Ok(8080);
        assert_eq!(result.log("reading port").unwrap(), 8080);
    }

    #[test]
    fn test_log_passes_err_through() {
        let result: Result<u16, ConfigError> = Err(ConfigError::Missing("DB_PORT".to_string()));
        let logged = result.log("reading port");
        assert!(matches!(logged, Err(ConfigError::Missing(ref key)) if key == "DB_PORT"));
    }

    #[test]
    fn test_caller_points_at_call_site() {
        let location = caller();
        assert!(location.starts_with(file!()), "{location}");
    }

    #[test]
    fn test_log_none_keeps_value() {
        let origin = Some("https://app.example.com".to_string());
        assert_eq!(
            origin.log_none("frontend origin").as_deref(),
            Some("https://app.example.com")
        );
        let missing: Option<String> = None;
        assert!(missing.log_none("frontend origin").is_none());
    }
}
