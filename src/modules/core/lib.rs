//! Core domain logic for Insights Bridge
//!
//! This crate contains the configuration models and error types shared by
//! the query proxy, the connector and the CLI.

pub mod domain;
pub mod error;

pub use domain::*;
pub use error::{InsightsError, Result};
