//! Application configuration
//!
//! All knobs come from the environment with sensible defaults, so the
//! binary runs with no configuration at all. Unparseable numeric values
//! fall back to their defaults rather than failing startup.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server section
    #[serde(default)]
    pub server: HttpServerConfig,

    /// Catalog store section
    #[serde(default)]
    pub store: StoreConfig,

    /// Catalog cache section
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Catalog store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Root data directory; the store lives under `<data_dir>/catalog/`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Catalog cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL in seconds for the cached active catalog
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_ttl_secs() -> u64 {
    3600
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// Recognized variables: `API_HOST`, `API_PORT`, `PACKCALC_DATA_DIR`,
    /// `CACHE_TTL_SECS`.
    pub fn from_env() -> Self {
        Self {
            server: HttpServerConfig {
                host: env_or("API_HOST", HttpServerConfig::default().host),
                port: env_parsed_or("API_PORT", HttpServerConfig::default().port),
            },
            store: StoreConfig {
                data_dir: PathBuf::from(env_or(
                    "PACKCALC_DATA_DIR",
                    default_data_dir().display().to_string(),
                )),
            },
            cache: CacheConfig {
                ttl_secs: env_parsed_or("CACHE_TTL_SECS", default_ttl_secs()),
            },
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => default,
    }
}

fn env_parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(value) => value.parse().unwrap_or(default),
        Err(_) => default,
    }
}
