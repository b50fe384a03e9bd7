//! Host data connector for Insights Bridge
//!
//! This crate implements the host plugin lifecycle (setup, column discovery,
//! data fetch, teardown) on top of three injected capabilities: an HTTP client
//! that reaches the query proxy, the host's callback interface, and the
//! host's stored connector state.

pub mod adapter;
pub mod client;
pub mod response;
pub mod rows;
pub mod schema;
pub mod traits;

pub use adapter::{InsightsConnector, UNSUPPORTED_QUERY_MESSAGE};
pub use client::ProxyClient;
pub use response::InsightsResponse;
pub use rows::{epoch_millis_to_iso, shape_event};
pub use schema::{describe_columns, infer_type};
pub use traits::{ConnectorState, Host, HttpClient};
