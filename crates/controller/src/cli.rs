//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::DEFAULT_ENV_FILE;

/// Controller command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "controller", version, about = "HTTP backend controller")]
pub struct Args {
    /// Path to the env file with the application settings
    #[arg(short, long, default_value = DEFAULT_ENV_FILE)]
    pub conf: PathBuf,
}

impl Args {
    /// Arguments pointing at an alternate env file.
    pub fn with_conf(conf: impl Into<PathBuf>) -> Self {
        Self { conf: conf.into() }
    }
}

impl Default for Args {
    fn default() -> Self {
        Self::with_conf(DEFAULT_ENV_FILE)
    }
}
