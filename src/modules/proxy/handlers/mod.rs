//! HTTP request handlers

mod proxy;

pub use proxy::{ProxyHandler, ProxyParams};
