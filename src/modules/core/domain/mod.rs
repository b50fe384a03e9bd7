//! Domain models for Insights Bridge configuration

mod config;
mod connection;

pub use config::{ProxyConfig, DEFAULT_PORT, DEFAULT_STATIC_DIR, DEFAULT_UPSTREAM_URL};
pub use connection::ConnectionParameters;
