//! HTTP server for the query proxy

use axum::{routing::get, Router};
use insights_core::{InsightsError, ProxyConfig};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::handlers::ProxyHandler;
use crate::state::AppState;
use crate::upstream::UpstreamClient;

/// Query proxy server
pub struct ProxyServer {
    config: ProxyConfig,
    state: AppState,
}

impl ProxyServer {
    /// Create a new server from configuration
    pub fn new(config: ProxyConfig) -> Result<Self, InsightsError> {
        let upstream = UpstreamClient::new(config.upstream_url())?;

        Ok(Self {
            config,
            state: AppState::new(upstream),
        })
    }

    /// Build the Axum router
    ///
    /// Everything outside `/proxy` and `/health` is served from the static
    /// directory; `/` resolves to its `index.html`.
    pub fn build_router(&self) -> Router {
        // CORS configuration
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/proxy", get(ProxyHandler::handle))
            .route("/health", get(Self::health_check))
            .fallback_service(ServeDir::new(self.config.static_dir()))
            .with_state(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Health check endpoint
    async fn health_check() -> &'static str {
        "OK"
    }

    /// Start the server
    pub async fn run(&self) -> Result<(), InsightsError> {
        let addr: SocketAddr = format!("0.0.0.0:{}", self.config.port())
            .parse()
            .map_err(|e| InsightsError::Server(format!("Invalid address: {}", e)))?;

        let app = self.build_router();

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| InsightsError::Server(format!("Failed to bind: {}", e)))?;
        let local = listener
            .local_addr()
            .map_err(|e| InsightsError::Server(format!("Failed to read local address: {}", e)))?;

        info!("Proxy server listening on port {}", local.port());
        info!("Upstream: {}", self.state.upstream.base_url());
        info!("Static files: {}", self.config.static_dir());

        axum::serve(listener, app)
            .with_graceful_shutdown(Self::shutdown_signal())
            .await
            .map_err(|e| InsightsError::Server(format!("Server error: {}", e)))?;

        info!("Server stopped");
        Ok(())
    }

    /// Wait for shutdown signal
    async fn shutdown_signal() {
        let ctrl_c = async {
            if let Err(e) = signal::ctrl_c().await {
                debug!("Failed to listen for CTRL+C: {}", e);
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                }
                Err(e) => {
                    debug!("Failed to install SIGTERM handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                debug!("Received CTRL+C, shutting down...");
            }
            _ = terminate => {
                debug!("Received SIGTERM, shutting down...");
            }
        }
    }
}
