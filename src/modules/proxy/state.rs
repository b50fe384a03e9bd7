//! Shared application state (HTTP handlers)

use std::sync::Arc;

use crate::upstream::UpstreamClient;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
}

impl AppState {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self {
            upstream: Arc::new(upstream),
        }
    }
}
