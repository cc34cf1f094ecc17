//! Shared state handed to the HTTP handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::app::App;
use crate::config::EnvConfig;
use crate::db::{DatabaseHandle, DbPool};

/// Shared application state.
///
/// A cheap-to-clone view of the [`App`]: the configuration behind an `Arc`
/// and a clone of the database handle. The [`App`] keeps ownership of the
/// handle and closes it after the server stops.
#[derive(Clone)]
pub struct AppState<D = DbPool> {
    /// Database handle
    pub db: D,

    /// Application configuration
    pub config: Arc<EnvConfig>,

    /// Server start time for uptime calculation
    pub start_time: Instant,
}

impl<D: DatabaseHandle + Clone> AppState<D> {
    /// Create the handler state from a constructed application context.
    pub fn from_app(app: &App<D>) -> Self {
        Self {
            db: app.db().clone(),
            config: Arc::new(app.conf().clone()),
            start_time: Instant::now(),
        }
    }

    /// Get the server uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::FakeFactory;
    use crate::config::tests::valid_source;

    #[tokio::test]
    async fn test_from_app_shares_config() {
        let app = App::from_source(&valid_source(), &FakeFactory::default())
            .await
            .unwrap();
        let state = AppState::from_app(&app);

        assert_eq!(state.config.as_ref(), app.conf());
        assert_eq!(state.uptime_seconds(), 0);
    }
}
