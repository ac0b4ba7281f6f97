//! Application state - shared across all handlers.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use taps_core::ports::{RateLimiter, TapAnalytics, TeamRepository};
use taps_infra::InMemoryTapStore;

#[cfg(feature = "postgres")]
use taps_infra::{PostgresTapAnalytics, PostgresTeamRepository, database};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub teams: Arc<dyn TeamRepository>,
    pub analytics: Arc<dyn TapAnalytics>,
    /// Backend name reported by the health check.
    pub storage: &'static str,
    pub requests_per_window: u32,
    pub query_timeout: Duration,
}

type Stores = (Arc<dyn TeamRepository>, Arc<dyn TapAnalytics>, &'static str);

fn in_memory_stores() -> Stores {
    let store = Arc::new(InMemoryTapStore::new());
    let teams: Arc<dyn TeamRepository> = store.clone();
    let analytics: Arc<dyn TapAnalytics> = store;
    (teams, analytics, "in-memory")
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// A configured database that cannot be reached is a startup error; the
    /// in-memory store is only used when no database is configured.
    pub async fn new(config: &AppConfig, rate_limiter: Arc<dyn RateLimiter>) -> io::Result<Self> {
        #[cfg(feature = "postgres")]
        let (teams, analytics, storage): Stores = match &config.database {
            Some(db_config) => {
                let conn = database::connect(db_config).await.map_err(|e| {
                    tracing::error!("Failed to connect to database: {}", e);
                    io::Error::other(format!("database unavailable: {e}"))
                })?;
                let teams: Arc<dyn TeamRepository> =
                    Arc::new(PostgresTeamRepository::new(conn.clone()));
                let analytics: Arc<dyn TapAnalytics> = Arc::new(PostgresTapAnalytics::new(conn));
                (teams, analytics, "postgres")
            }
            None => {
                tracing::warn!(
                    "DATABASE_URL not set. Serving from an empty in-memory store; every token will be rejected."
                );
                in_memory_stores()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (teams, analytics, storage): Stores = {
            tracing::warn!("Built without postgres feature - serving from an empty in-memory store");
            in_memory_stores()
        };

        tracing::info!(storage, "Application state initialized");

        Ok(Self {
            rate_limiter,
            teams,
            analytics,
            storage,
            requests_per_window: config.requests_per_window,
            query_timeout: config.query_timeout,
        })
    }
}
