//! packcalc server entry point
//!
//! Wires configuration, store, cache, service, and HTTP server together.
//! Subsystem failures at startup are fatal; the process logs and exits
//! non-zero.

use std::process;
use std::sync::Arc;
use std::time::Duration;

use packcalc::cache::InMemoryTtlCache;
use packcalc::catalog::FileCatalogStore;
use packcalc::config::AppConfig;
use packcalc::http_server::{HttpServer, PackState};
use packcalc::observability::{Logger, MetricsRegistry};
use packcalc::service::PackService;

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();

    let store = match FileCatalogStore::open(&config.store.data_dir) {
        Ok(store) => store,
        Err(e) => {
            Logger::fatal(
                "store_open_failed",
                &[
                    ("data_dir", &config.store.data_dir.display().to_string()),
                    ("error", &e.to_string()),
                ],
            );
            process::exit(1);
        }
    };

    let metrics = Arc::new(MetricsRegistry::new());
    let service = PackService::with_ttl(
        store,
        InMemoryTtlCache::new(),
        Arc::clone(&metrics),
        Duration::from_secs(config.cache.ttl_secs),
    );
    let state = Arc::new(PackState { service, metrics });

    let server = HttpServer::with_config(config.server, state);
    if let Err(e) = server.start().await {
        Logger::fatal("server_failed", &[("error", &e.to_string())]);
        process::exit(1);
    }
}
