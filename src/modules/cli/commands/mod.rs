//! CLI commands

mod fetch;
mod schema;
mod serve;

pub use fetch::FetchCommand;
pub use schema::SchemaCommand;
pub use serve::ServeCommand;

use clap::{Args, Parser, Subcommand};
use insights_connector::{InsightsConnector, ProxyClient};
use insights_core::ConnectionParameters;

use crate::host::{CliHost, CliState};

/// Insights Bridge - query proxy and data connector for the Insights API
#[derive(Parser, Debug)]
#[command(name = "insights-bridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the query proxy
    Serve(ServeCommand),

    /// Discover the columns of a query
    Schema(SchemaCommand),

    /// Fetch the rows of a query
    Fetch(FetchCommand),
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Connection arguments shared by `schema` and `fetch`
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Insights account ID
    #[arg(short, long, env = "INSIGHTS_ACCOUNT_ID")]
    pub account: String,

    /// NRQL query
    #[arg(short, long, env = "INSIGHTS_NRQL")]
    pub query: String,

    /// Insights query key, sent as X-Query-Key
    #[arg(short, long, env = "INSIGHTS_QUERY_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Base URL of the query proxy
    #[arg(long, default_value = "http://localhost:9001")]
    pub proxy: String,
}

impl ConnectionArgs {
    /// Build a connector wired to the proxy and to command-line host state
    pub fn connector(&self) -> InsightsConnector<ProxyClient, CliHost, CliState> {
        InsightsConnector::new(
            ProxyClient::new(&self.proxy),
            CliHost::new(),
            CliState::new(
                ConnectionParameters::new(&self.account, &self.query),
                self.key.clone(),
            ),
        )
    }
}
