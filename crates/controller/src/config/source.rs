//! Raw key/value sources for the configuration loader.
//!
//! Sources are collected into a plain mapping instead of being exported
//! into the process environment. Reading `std::env::vars_os()` in
//! [`EnvSource::from_process`] is the only place the loader touches global
//! state, and it only reads.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Default env file used when the configured path is empty.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Key/value pairs the typed configuration is deserialized from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSource {
    vars: BTreeMap<String, String>,
}

impl EnvSource {
    /// Parse an env file.
    ///
    /// An empty `path` means [`DEFAULT_ENV_FILE`]. When a key appears more
    /// than once in the file, the last occurrence wins.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = resolve_path(path.as_ref());
        let source_err = |source| ConfigError::Source {
            path: path.clone(),
            source,
        };

        let mut vars = BTreeMap::new();
        for item in dotenvy::from_path_iter(&path).map_err(source_err)? {
            let (key, value) = item.map_err(source_err)?;
            vars.insert(key, value);
        }

        tracing::debug!(path = %path.display(), keys = vars.len(), "Env file parsed");
        Ok(Self { vars })
    }

    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped; none
    /// of them can be a setting the loader reads.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => Some((key, value)),
                (key, _) => {
                    tracing::debug!(
                        key = %key.map_or_else(|k| k.to_string_lossy().into_owned(), |k| k),
                        "Skipping non UTF-8 environment variable"
                    );
                    None
                }
            })
            .collect()
    }

    /// Load `path` and overlay the process environment on top of it.
    ///
    /// Variables already present in the environment take precedence over
    /// the file, so a deployment can override any file value.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut source = Self::from_file(path)?;
        source.merge(Self::from_process());
        Ok(source)
    }

    /// Insert or replace a single value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Overlay `other` onto this source; keys in `other` win.
    pub fn merge(&mut self, other: EnvSource) {
        self.vars.extend(other.vars);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Owned pairs in the shape `envy` consumes.
    pub(crate) fn pairs(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.vars.iter().map(|(k, v)| (k.clone(), v.clone()))
    }
}

impl FromIterator<(String, String)> for EnvSource {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for EnvSource {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

fn resolve_path(path: &Path) -> PathBuf {
    if path.as_os_str().is_empty() {
        PathBuf::from(DEFAULT_ENV_FILE)
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn env_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_from_file_reads_pairs() {
        let file = env_file("DB_HOST=localhost\n# comment\nDB_PORT=5432\n");
        let source = EnvSource::from_file(file.path()).unwrap();
        assert_eq!(source.get("DB_HOST"), Some("localhost"));
        assert_eq!(source.get("DB_PORT"), Some("5432"));
        assert_eq!(source.len(), 2);
    }

    #[test]
    fn test_last_duplicate_in_file_wins() {
        let file = env_file("DB_NAME=first\nDB_NAME=second\n");
        let source = EnvSource::from_file(file.path()).unwrap();
        assert_eq!(source.get("DB_NAME"), Some("second"));
    }

    #[test]
    fn test_missing_file_is_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EnvSource::from_file(dir.path().join("absent.env")).unwrap_err();
        assert!(matches!(err, ConfigError::Source { .. }));
    }

    #[test]
    fn test_unparsable_file_is_source_error() {
        let file = env_file("THIS LINE IS NOT AN ASSIGNMENT\n");
        let err = EnvSource::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Source { .. }));
    }

    #[test]
    fn test_empty_path_resolves_to_default_file() {
        assert_eq!(resolve_path(Path::new("")), PathBuf::from(DEFAULT_ENV_FILE));
        assert_eq!(resolve_path(Path::new("conf/.env")), PathBuf::from("conf/.env"));
    }

    #[test]
    fn test_merge_overrides_existing_keys() {
        let mut base: EnvSource = [("DB_HOST", "file-host"), ("DB_USER", "app")]
            .into_iter()
            .collect();
        base.merge([("DB_HOST", "env-host")].into_iter().collect());
        assert_eq!(base.get("DB_HOST"), Some("env-host"));
        assert_eq!(base.get("DB_USER"), Some("app"));
    }

    #[test]
    fn test_load_lets_process_environment_win() {
        let key = "CONTROLLER_SOURCE_TEST_OVERRIDE";
        let file = env_file(&format!("{key}=from-file\nCONTROLLER_SOURCE_TEST_FILE_ONLY=kept\n"));
        std::env::set_var(key, "from-process");

        let source = EnvSource::load(file.path()).unwrap();
        std::env::remove_var(key);

        assert_eq!(source.get(key), Some("from-process"));
        assert_eq!(source.get("CONTROLLER_SOURCE_TEST_FILE_ONLY"), Some("kept"));
    }

    #[cfg(unix)]
    #[test]
    fn test_load_skips_non_utf8_process_variables() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let key = "CONTROLLER_SOURCE_TEST_NON_UTF8";
        let file = env_file("DB_HOST=localhost\n");
        std::env::set_var(key, OsStr::from_bytes(b"\xff\xfe"));

        let result = EnvSource::load(file.path());
        std::env::remove_var(key);

        let source = result.unwrap();
        assert_eq!(source.get(key), None);
        assert!(source.get("DB_HOST").is_some());
    }

    #[test]
    fn test_default_source_is_empty() {
        let mut source = EnvSource::default();
        assert!(source.is_empty());
        source.set("DB_NAME", "app").set("DB_USER", "app");
        assert_eq!(source.len(), 2);
    }
}
