//! Application context: configuration plus the live database handle.
//!
//! [`App`] is built once at startup and torn down once at shutdown with
//! [`App::exit`], which consumes it. Construction is all-or-nothing: a
//! configuration failure never reaches the connection factory, and a
//! failed or cancelled connect leaves no handle behind.

use std::future::Future;

use crate::cli::Args;
use crate::config::{EnvConfig, EnvSource};
use crate::db::{ConnectionDescriptor, ConnectionFactory, DatabaseHandle, DbPool};
use crate::error::{AppError, AppResult};

/// Process-scoped application context.
///
/// ```ignore
/// let app = App::new(&Args::default(), &PgPoolFactory::default()).await?;
/// // ... serve requests with app.conf() and app.db()
/// app.exit().await?;
/// ```
#[derive(Debug)]
pub struct App<D = DbPool> {
    conf: EnvConfig,
    descriptor: ConnectionDescriptor,
    db: D,
}

impl<D: DatabaseHandle> App<D> {
    /// Load the env file named by `args` and connect with `factory`.
    pub async fn new<F>(args: &Args, factory: &F) -> AppResult<Self>
    where
        F: ConnectionFactory<Handle = D>,
    {
        Self::new_until(args, factory, std::future::pending()).await
    }

    /// Like [`App::new`], giving up with [`AppError::Cancelled`] once
    /// `cancel` resolves.
    pub async fn new_until<F, C>(args: &Args, factory: &F, cancel: C) -> AppResult<Self>
    where
        F: ConnectionFactory<Handle = D>,
        C: Future<Output = ()>,
    {
        tracing::info!(conf = %args.conf.display(), "Initializing app");
        let source = EnvSource::load(&args.conf)?;
        Self::from_source_until(&source, factory, cancel).await
    }

    /// Build the context from an already collected source.
    pub async fn from_source<F>(source: &EnvSource, factory: &F) -> AppResult<Self>
    where
        F: ConnectionFactory<Handle = D>,
    {
        Self::from_source_until(source, factory, std::future::pending()).await
    }

    pub async fn from_source_until<F, C>(
        source: &EnvSource,
        factory: &F,
        cancel: C,
    ) -> AppResult<Self>
    where
        F: ConnectionFactory<Handle = D>,
        C: Future<Output = ()>,
    {
        let conf = EnvConfig::from_source(source)?;
        let descriptor = ConnectionDescriptor::from_config(&conf.database);

        let db = tokio::select! {
            result = factory.connect(&descriptor) => result.map_err(AppError::Connect)?,
            _ = cancel => {
                tracing::warn!("Database connection cancelled");
                return Err(AppError::Cancelled);
            }
        };

        tracing::info!(
            host = %conf.backend.host,
            port = conf.backend.port,
            api_path = %conf.backend.api_path,
            running_in_dev = conf.backend.running_in_dev,
            "Application initialized"
        );

        Ok(Self {
            conf,
            descriptor,
            db,
        })
    }

    /// The loaded configuration.
    pub fn conf(&self) -> &EnvConfig {
        &self.conf
    }

    /// The live database handle.
    pub fn db(&self) -> &D {
        &self.db
    }

    /// The descriptor the handle was opened with.
    pub fn descriptor(&self) -> &ConnectionDescriptor {
        &self.descriptor
    }

    /// Release the database handle.
    pub async fn exit(self) -> AppResult<()> {
        self.db.close().await.map_err(AppError::Shutdown)?;
        tracing::info!("Database connection closed");
        Ok(())
    }
}
