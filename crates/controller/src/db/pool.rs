//! Database connection factory and handle.
//!
//! [`ConnectionFactory`] turns a [`ConnectionDescriptor`] into a live
//! handle; [`DatabaseHandle`] is the slice of the handle the application
//! context needs for health checks and shutdown. The PostgreSQL pool
//! implements both.

use std::future::Future;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::ConnectionDescriptor;

/// Type alias for the PostgreSQL connection pool.
pub type DbPool = PgPool;

/// A live database handle owned by the application context.
pub trait DatabaseHandle: Send + Sync {
    /// Close the handle. Closing a handle that is already closed is an error.
    fn close(&self) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// Check that the database answers.
    fn ping(&self) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
}

/// Opens database handles from a descriptor.
pub trait ConnectionFactory: Send + Sync {
    type Handle: DatabaseHandle;

    fn connect(
        &self,
        descriptor: &ConnectionDescriptor,
    ) -> impl Future<Output = Result<Self::Handle, sqlx::Error>> + Send;
}

impl DatabaseHandle for DbPool {
    async fn close(&self) -> Result<(), sqlx::Error> {
        if self.is_closed() {
            return Err(sqlx::Error::PoolClosed);
        }
        sqlx::Pool::close(self).await;
        Ok(())
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(self).await?;
        Ok(())
    }
}

/// Factory producing a PostgreSQL connection pool.
///
/// Pool sizing is left at the driver defaults. The pool connects eagerly,
/// so an unreachable database is reported once the acquire timeout runs
/// out instead of on the first request.
#[derive(Debug, Clone, Default)]
pub struct PgPoolFactory {
    options: PgPoolOptions,
}

impl PgPoolFactory {
    pub fn new(options: PgPoolOptions) -> Self {
        Self { options }
    }
}

impl ConnectionFactory for PgPoolFactory {
    type Handle = DbPool;

    async fn connect(&self, descriptor: &ConnectionDescriptor) -> Result<DbPool, sqlx::Error> {
        let connect_options = descriptor.connect_options()?;
        let pool = self.options.clone().connect_with(connect_options).await?;

        tracing::info!(
            descriptor = ?descriptor,
            max_connections = self.options.get_max_connections(),
            "Database connection pool created"
        );

        Ok(pool)
    }
}
