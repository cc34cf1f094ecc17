//! Controller Library
//!
//! Bootstrap plumbing for an HTTP backend:
//!
//! - **Configuration**: typed settings from an env file and the process
//!   environment, validated up front
//! - **Database lifecycle**: a deterministic connection descriptor, a
//!   connection factory seam and orderly shutdown of the handle
//! - **Responses**: the `{status, message, data[, links]}` JSON envelope
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from env sources
//! - [`db`]: Connection descriptor, factory and handle
//! - [`app`]: Application context owning configuration and handle
//! - [`api`]: Response envelope, error mapping and health handlers
//! - [`router`]: Router assembly
//! - [`state`]: Shared handler state
//!
//! ## Example
//!
//! ```ignore
//! use controller::{app::App, cli::Args, db::PgPoolFactory};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::new(&Args::default(), &PgPoolFactory::default()).await?;
//!     // ... build and run server
//!     app.exit().await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod result_ext;
pub mod router;
pub mod state;

pub use app::App;
pub use error::{AppError, AppResult, ConfigError};
pub use result_ext::ResultExt;
