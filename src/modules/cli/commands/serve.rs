//! Serve command implementation

use clap::Args;
use insights_core::{InsightsError, ProxyConfig};
use insights_proxy::ProxyServer;
use tracing::info;

/// Serve command arguments
#[derive(Args, Debug)]
pub struct ServeCommand {
    /// Override server port (default: $PORT or 9001)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory served as static files
    #[arg(long)]
    pub static_dir: Option<String>,

    /// Override the upstream Insights API base URL
    #[arg(long)]
    pub upstream: Option<String>,
}

impl ServeCommand {
    /// Resolve the proxy configuration from environment and flags
    pub fn config(&self) -> Result<ProxyConfig, InsightsError> {
        Ok(self.apply(ProxyConfig::from_env()?))
    }

    /// Layer the command-line flags over a base configuration
    fn apply(&self, base: ProxyConfig) -> ProxyConfig {
        base.with_overrides(self.port, self.upstream.clone(), self.static_dir.clone())
    }

    /// Execute the serve command
    pub async fn execute(&self) -> Result<(), InsightsError> {
        let config = self.config()?;
        info!("Starting query proxy on port {}", config.port());

        let server = ProxyServer::new(config)?;
        server.run().await?;

        Ok(())
    }
}
