//! Runtime configuration read from the environment.

use std::net::SocketAddr;

use hero_store::StoreConfig;

/// Default listen address; matches the port the API has always used.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5555";

/// Default database location, created on first start.
pub const DEFAULT_DB_URI: &str = "sqlite://app.db?mode=rwc";

/// Errors raised while reading the configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A variable was set to a value that cannot be parsed.
    #[error("invalid value '{value}' for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Gateway configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct GatewayConfig {
    /// Address the HTTP server binds to (`HERO_LISTEN_ADDR`).
    pub listen_addr: SocketAddr,

    /// Database connection settings (`DB_URI`, `HERO_DB_MAX_CONNECTIONS`).
    pub store: StoreConfig,

    /// Load the seed data set into an empty database (`HERO_SEED`).
    pub seed: bool,
}

impl GatewayConfig {
    /// Read the configuration from process environment variables.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if a set variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if a set variable cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let listen_raw =
            lookup("HERO_LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned());
        let listen_addr = listen_raw.parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::InvalidValue {
                var: "HERO_LISTEN_ADDR",
                value: listen_raw.clone(),
                reason: e.to_string(),
            }
        })?;

        let url = lookup("DB_URI").unwrap_or_else(|| DEFAULT_DB_URI.to_owned());
        let mut store = StoreConfig::new(url);
        if let Some(raw) = lookup("HERO_DB_MAX_CONNECTIONS") {
            let max = raw.parse::<u32>().ok().filter(|&n| n > 0).ok_or_else(|| {
                ConfigError::InvalidValue {
                    var: "HERO_DB_MAX_CONNECTIONS",
                    value: raw.clone(),
                    reason: "expected a positive integer".to_owned(),
                }
            })?;
            store = store.with_max_connections(max);
        }

        let seed = match lookup("HERO_SEED") {
            None => false,
            Some(raw) => parse_flag(&raw).ok_or_else(|| ConfigError::InvalidValue {
                var: "HERO_SEED",
                value: raw.clone(),
                reason: "expected one of 1, 0, true, false".to_owned(),
            })?,
        };

        Ok(Self { listen_addr, store, seed })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<GatewayConfig, ConfigError> {
        let vars: HashMap<String, String> =
            vars.iter().map(|&(k, v)| (k.to_owned(), v.to_owned())).collect();
        GatewayConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = match config_from(&[]) {
            Ok(c) => c,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(config.listen_addr.port(), 5555);
        assert_eq!(config.store.url, DEFAULT_DB_URI);
        assert_eq!(config.store.max_connections, StoreConfig::DEFAULT_MAX_CONNECTIONS);
        assert!(!config.seed);
    }

    #[test]
    fn overrides_are_honoured() {
        let config = match config_from(&[
            ("HERO_LISTEN_ADDR", "0.0.0.0:8080"),
            ("DB_URI", "sqlite::memory:"),
            ("HERO_DB_MAX_CONNECTIONS", "1"),
            ("HERO_SEED", "true"),
        ]) {
            Ok(c) => c,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(config.listen_addr.port(), 8080);
        assert!(config.store.is_in_memory());
        assert_eq!(config.store.max_connections, 1);
        assert!(config.seed);
    }

    #[test]
    fn invalid_values_name_the_variable() {
        for (var, value) in [
            ("HERO_LISTEN_ADDR", "not-an-address"),
            ("HERO_DB_MAX_CONNECTIONS", "0"),
            ("HERO_SEED", "maybe"),
        ] {
            match config_from(&[(var, value)]) {
                Err(ConfigError::InvalidValue { var: reported, .. }) => assert_eq!(reported, var),
                Ok(c) => panic!("{var}={value} must be rejected, got {c:?}"),
            }
        }
    }
}
