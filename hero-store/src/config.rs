//! Connection settings for the entity store.

use serde::{Deserialize, Serialize};

/// Configuration for opening a [`SqliteStore`](crate::SqliteStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct StoreConfig {
    /// Database URL, e.g. `sqlite://app.db?mode=rwc`.
    pub url: String,

    /// Upper bound on pooled connections.
    pub max_connections: u32,
}

impl StoreConfig {
    /// Connection pool size used unless overridden.
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

    /// Create a config for the given URL with the default pool size.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Override the pool size.
    #[must_use]
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// A private in-memory database.
    ///
    /// Every SQLite connection to `:memory:` opens its own database, so the
    /// pool is pinned to a single connection.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_owned(),
            max_connections: 1,
        }
    }

    /// Returns `true` if this config points at an in-memory database.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_pool_size() {
        let config = StoreConfig::new("sqlite://app.db?mode=rwc");
        assert_eq!(config.max_connections, StoreConfig::DEFAULT_MAX_CONNECTIONS);
        assert!(!config.is_in_memory());
    }

    #[test]
    fn in_memory_config_uses_single_connection() {
        let config = StoreConfig::in_memory();
        assert_eq!(config.max_connections, 1);
        assert!(config.is_in_memory());
    }
}
