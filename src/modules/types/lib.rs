//! Type definitions for Insights Bridge
//!
//! This crate contains shared type definitions used across the workspace,
//! including column descriptors, host lifecycle phases, and the request and
//! result types exchanged between the connector and the query proxy.

pub mod column;
pub mod phase;
pub mod runtime;

pub use column::{ColumnDescriptor, ColumnType};
pub use phase::Phase;
pub use runtime::{
    encode_uri_component, Event, PageToken, QueryRequest, TableData, QUERY_KEY_HEADER,
    TIMESTAMP_FIELD,
};
