//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use taps_infra::DatabaseConfig;
use taps_infra::rate_limit::{DEFAULT_CAPACITY, DEFAULT_WINDOW, RateLimitConfig};

/// Requests allowed per token per rate limit window.
pub const DEFAULT_REQUESTS_PER_WINDOW: u32 = 100;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub rate_limit: RateLimitConfig,
    pub requests_per_window: u32,
    /// How often expired limiter entries are dropped; `None` disables the task.
    pub purge_interval: Option<Duration>,
    pub query_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database: None,
            rate_limit: RateLimitConfig::default(),
            requests_per_window: DEFAULT_REQUESTS_PER_WINDOW,
            purge_interval: Some(Duration::from_secs(300)),
            query_timeout: Duration::from_secs(10),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let defaults = DatabaseConfig::new(url);
            DatabaseConfig {
                max_connections: env_or("DB_MAX_CONNECTIONS", defaults.max_connections),
                min_connections: env_or("DB_MIN_CONNECTIONS", defaults.min_connections),
                ..defaults
            }
        });

        let purge_secs: u64 = env_or("RATE_LIMIT_PURGE_INTERVAL_SECS", 300);

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env_or("PORT", 8080),
            database,
            rate_limit: RateLimitConfig {
                capacity: env_or("RATE_LIMIT_CAPACITY", DEFAULT_CAPACITY),
                window: Duration::from_secs(env_or(
                    "RATE_LIMIT_WINDOW_SECS",
                    DEFAULT_WINDOW.as_secs(),
                )),
            },
            requests_per_window: env_or("RATE_LIMIT_MAX_REQUESTS", DEFAULT_REQUESTS_PER_WINDOW),
            purge_interval: (purge_secs > 0).then(|| Duration::from_secs(purge_secs)),
            query_timeout: Duration::from_secs(env_or("QUERY_TIMEOUT_SECS", 10)),
        }
    }
}

/// Parse `key` from the environment, falling back to `default` when unset or malformed.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
