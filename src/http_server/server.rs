//! HTTP server
//!
//! Combines the pack API and observability routers behind a permissive
//! CORS layer and serves them until SIGINT/SIGTERM. In-flight requests
//! get a bounded grace period to finish; the process terminates either
//! way.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::observability::Logger;

use super::config::HttpServerConfig;
use super::observability_routes::observability_routes;
use super::pack_routes::{pack_routes, PackState};

/// How long in-flight requests get to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// HTTP server for the pack service.
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server with default configuration.
    pub fn new(state: Arc<PackState>) -> Self {
        Self::with_config(HttpServerConfig::default(), state)
    }

    /// Create a server with custom configuration.
    pub fn with_config(config: HttpServerConfig, state: Arc<PackState>) -> Self {
        let router = Self::build_router(state);
        Self { config, router }
    }

    /// Build the combined router with all endpoints.
    fn build_router(state: Arc<PackState>) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let metrics = Arc::clone(&state.metrics);

        Router::new()
            .nest("/api", pack_routes(state))
            .merge(observability_routes(metrics))
            .layer(cors)
    }

    /// The socket address the server will bind.
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// The router (for testing).
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until a shutdown signal arrives.
    ///
    /// After the signal, in-flight requests get [`SHUTDOWN_GRACE`] to
    /// finish; a drain that overruns the grace period is abandoned and
    /// reported as an error.
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("{}", e)))?;

        let listener = TcpListener::bind(addr).await?;
        Logger::info("server_started", &[("addr", &addr.to_string())]);

        // The drain channel marks the moment the shutdown signal fired,
        // which is when the grace clock starts.
        let (drain_tx, drain_rx) = tokio::sync::oneshot::channel::<()>();
        let serve = std::future::IntoFuture::into_future(axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                let _ = drain_tx.send(());
            }));
        tokio::pin!(serve);

        let grace_elapsed = async {
            let _ = drain_rx.await;
            tokio::time::sleep(SHUTDOWN_GRACE).await;
        };

        tokio::select! {
            result = &mut serve => result?,
            _ = grace_elapsed => {
                Logger::error(
                    "shutdown_grace_exceeded",
                    &[("grace_secs", &SHUTDOWN_GRACE.as_secs().to_string())],
                );
                return Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    "shutdown grace period exceeded",
                ));
            }
        }

        Logger::info("server_stopped", &[]);
        Ok(())
    }
}

/// Resolves when SIGINT or SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    Logger::info("shutdown_requested", &[]);
}
