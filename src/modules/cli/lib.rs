//! Insights Bridge CLI
//!
//! This crate provides the command-line interface for Insights Bridge including:
//! - serve: Start the query proxy
//! - schema: Discover the columns of an NRQL query through the proxy
//! - fetch: Fetch the rows of an NRQL query through the proxy

pub mod commands;
pub mod host;

pub use commands::{Cli, Commands};
