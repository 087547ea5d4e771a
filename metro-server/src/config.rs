//! Server configuration.
//!
//! Every setting has a default and can be overridden by an environment
//! variable.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable names.
pub const STATIONS_CSV_VAR: &str = "METRO_STATIONS_CSV";
pub const AMENITIES_CSV_VAR: &str = "METRO_AMENITIES_CSV";
pub const BIND_ADDR_VAR: &str = "METRO_BIND_ADDR";
pub const STATIC_DIR_VAR: &str = "METRO_STATIC_DIR";
pub const CONGESTION_TTL_VAR: &str = "METRO_CONGESTION_TTL_SECS";
pub const CONGESTION_CAPACITY_VAR: &str = "METRO_CONGESTION_CAPACITY";

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {var}: {reason}")]
pub struct ConfigError {
    var: &'static str,
    value: String,
    reason: String,
}

/// Configuration for the congestion cache.
#[derive(Debug, Clone)]
pub struct CongestionConfig {
    /// How long a hop keeps its congestion level.
    pub ttl: Duration,

    /// Maximum number of cached hops.
    pub max_capacity: u64,
}

impl Default for CongestionConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(600), // 10 minutes
            max_capacity: 10_000,
        }
    }
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// CSV of adjacent station pairs.
    pub stations_csv: PathBuf,

    /// CSV of amenities near each station. Optional: a missing file
    /// means no amenity data.
    pub amenities_csv: PathBuf,

    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Directory served under `/static`.
    pub static_dir: PathBuf,

    pub congestion: CongestionConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            stations_csv: PathBuf::from("data/stations.csv"),
            amenities_csv: PathBuf::from("data/amenities.csv"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: PathBuf::from("static"),
            congestion: CongestionConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// variables it returns `None` for.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(STATIONS_CSV_VAR) {
            config.stations_csv = PathBuf::from(path);
        }
        if let Some(path) = lookup(AMENITIES_CSV_VAR) {
            config.amenities_csv = PathBuf::from(path);
        }
        if let Some(path) = lookup(STATIC_DIR_VAR) {
            config.static_dir = PathBuf::from(path);
        }
        if let Some(addr) = lookup(BIND_ADDR_VAR) {
            config.bind_addr = parse_var(BIND_ADDR_VAR, &addr)?;
        }
        if let Some(secs) = lookup(CONGESTION_TTL_VAR) {
            config.congestion.ttl = Duration::from_secs(parse_var(CONGESTION_TTL_VAR, &secs)?);
        }
        if let Some(capacity) = lookup(CONGESTION_CAPACITY_VAR) {
            config.congestion.max_capacity = parse_var(CONGESTION_CAPACITY_VAR, &capacity)?;
        }

        Ok(config)
    }
}

fn parse_var<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();

        assert_eq!(config.stations_csv, PathBuf::from("data/stations.csv"));
        assert_eq!(config.amenities_csv, PathBuf::from("data/amenities.csv"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.congestion.ttl, Duration::from_secs(600));
        assert_eq!(config.congestion.max_capacity, 10_000);
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn overrides_from_environment() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            (STATIONS_CSV_VAR, "/srv/metro/stations.csv"),
            (BIND_ADDR_VAR, "0.0.0.0:8080"),
            (CONGESTION_TTL_VAR, "30"),
            (CONGESTION_CAPACITY_VAR, " 500 "),
        ]))
        .unwrap();

        assert_eq!(config.stations_csv, PathBuf::from("/srv/metro/stations.csv"));
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.congestion.ttl, Duration::from_secs(30));
        assert_eq!(config.congestion.max_capacity, 500);
        // Untouched settings keep their defaults
        assert_eq!(config.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn bad_values_are_reported() {
        let err = ServerConfig::from_lookup(lookup_from(&[(CONGESTION_TTL_VAR, "soon")]))
            .unwrap_err();
        assert!(
            err.to_string()
                .starts_with("invalid value \"soon\" for METRO_CONGESTION_TTL_SECS")
        );

        let err =
            ServerConfig::from_lookup(lookup_from(&[(BIND_ADDR_VAR, "localhost")])).unwrap_err();
        assert!(err.to_string().contains(BIND_ADDR_VAR));
    }
}
