//! ListKeeper configuration.
//!
//! All configuration is driven by environment variables.

use std::env;

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListKeeperConfig {
    /// Bind address for the HTTP listener.
    pub listen: String,
    /// SQLite database URL, e.g. `sqlite://todo.db`.
    pub database_url: String,
    /// Maximum number of pooled database connections.
    pub max_connections: u32,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ListKeeperConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:4000".to_owned(),
            database_url: "sqlite://todo.db".to_owned(),
            max_connections: 5,
            log_level: "info".to_owned(),
        }
    }
}

impl ListKeeperConfig {
    /// Create configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            listen: lookup("LISTKEEPER_LISTEN").unwrap_or(defaults.listen),
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .and_then(|v| v.trim().parse::<u32>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_connections),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }
}
