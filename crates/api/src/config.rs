//! Runtime settings for the rentwise API, read once at startup.

use std::str::FromStr;

use rentwise_core::property_search::{
    clamp_limit, DEFAULT_RECENT_SEARCHES, MAX_RECENT_SEARCHES, MAX_SEARCH_RESULTS,
};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Postgres connection string.
    pub database_url: String,
    /// Pool size; spawned history writes share it with request handlers.
    pub db_max_connections: u32,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Upper bound on closing the pool after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    pub search: SearchLimits,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                  |
    /// |---------------------------|--------------------------|
    /// | `HOST`                    | `0.0.0.0`                |
    /// | `PORT`                    | `3000`                   |
    /// | `DATABASE_URL`            | required                 |
    /// | `DB_MAX_CONNECTIONS`      | `20`                     |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`  |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                     |
    /// | `SHUTDOWN_TIMEOUT_SECS`   | `30`                     |
    /// | `SEARCH_MAX_RESULTS`      | `50` (never above 50)    |
    /// | `RECENT_SEARCHES_DEFAULT` | `5`                      |
    /// | `RECENT_SEARCHES_MAX`     | `50`                     |
    ///
    /// # Panics
    ///
    /// Panics on a missing `DATABASE_URL` or an unparsable value.
    pub fn from_env() -> Self {
        let cors_origins = env_or("CORS_ORIGINS", "http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 3000),
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 20),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", 30),
            search: SearchLimits::new(
                env_or("SEARCH_MAX_RESULTS", MAX_SEARCH_RESULTS),
                env_or("RECENT_SEARCHES_DEFAULT", DEFAULT_RECENT_SEARCHES),
                env_or("RECENT_SEARCHES_MAX", MAX_RECENT_SEARCHES),
            ),
            jwt: JwtConfig::from_env(),
        }
    }
}

/// Row limits for property search and the recent-search history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Rows returned by one property search, at most [`MAX_SEARCH_RESULTS`].
    pub max_results: i64,
    /// Recent searches returned when the caller gives no `limit`.
    pub recent_default: i64,
    /// Largest `limit` honoured for recent searches.
    pub recent_max: i64,
}

impl SearchLimits {
    /// Build limits, pulling each value into its valid range.
    pub fn new(max_results: i64, recent_default: i64, recent_max: i64) -> Self {
        let recent_max = recent_max.max(1);
        Self {
            max_results: max_results.clamp(1, MAX_SEARCH_RESULTS),
            recent_default: recent_default.clamp(1, recent_max),
            recent_max,
        }
    }

    /// Effective page size for a recent-searches request.
    pub fn recent_limit(&self, requested: Option<i64>) -> i64 {
        clamp_limit(requested, self.recent_default, self.recent_max)
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::new(MAX_SEARCH_RESULTS, DEFAULT_RECENT_SEARCHES, MAX_RECENT_SEARCHES)
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}
