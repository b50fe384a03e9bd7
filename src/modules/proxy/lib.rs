//! Query proxy for Insights Bridge
//!
//! This crate provides the HTTP server that relays NRQL queries to the
//! Insights API, forwarding the caller's query key, and serves static files
//! for the host to load the connector page from.

pub mod handlers;
pub mod server;
pub mod state;
pub mod upstream;

pub use handlers::{ProxyHandler, ProxyParams};
pub use server::ProxyServer;
pub use state::AppState;
pub use upstream::{UpstreamClient, UpstreamReply, USER_AGENT};
