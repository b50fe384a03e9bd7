//! `reqwest`-backed client for the query proxy

use async_trait::async_trait;
use insights_core::InsightsError;
use reqwest::header;
use std::fmt;
use tracing::debug;

use crate::traits::HttpClient;

/// HTTP client bound to a query proxy base URL
#[derive(Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    base_url: String,
}

impl fmt::Debug for ProxyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ProxyClient {
    /// Create a client for the proxy at `base_url` (e.g. `http://localhost:9001`)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Proxy base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl HttpClient for ProxyClient {
    async fn get(&self, path: &str, headers: &[(&str, &str)]) -> Result<String, InsightsError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let mut request = self.http.get(&url).header(header::ACCEPT, "application/json");
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| InsightsError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(InsightsError::UpstreamStatus(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| InsightsError::Transport(e.to_string()))
    }
}
