//! Database module for the controller.
//!
//! Provides the connection descriptor, the connection factory seam and
//! the PostgreSQL pool implementing it.

pub mod descriptor;
pub mod pool;

pub use descriptor::{ConnectionDescriptor, DescriptorError};
pub use pool::{ConnectionFactory, DatabaseHandle, DbPool, PgPoolFactory};
