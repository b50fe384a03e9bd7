//! Client for the upstream Insights query API

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use insights_core::InsightsError;
use insights_types::{encode_uri_component, QUERY_KEY_HEADER};
use std::fmt;
use tracing::info;

/// User agent sent on every upstream request
pub const USER_AGENT: &str = concat!("insights-bridge/", env!("CARGO_PKG_VERSION"));

/// Connection-scoped headers that never cross the proxy, plus the framing
/// headers the server recomputes for the buffered body
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    HeaderName::from_static("proxy-connection"),
    header::TRANSFER_ENCODING,
    header::TE,
    header::TRAILER,
    header::UPGRADE,
    header::CONTENT_LENGTH,
];

/// Successful upstream reply: end-to-end headers and the full body
#[derive(Debug)]
pub struct UpstreamReply {
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Issues single-attempt GET requests against the Insights query API
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl UpstreamClient {
    /// Create a client for the given API base URL
    ///
    /// No timeout is configured; the client default applies.
    pub fn new(base_url: impl Into<String>) -> Result<Self, InsightsError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| InsightsError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Upstream base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the query URL for an account, percent-encoding the NRQL
    pub fn query_url(&self, account_id: &str, nrql: &str) -> String {
        format!(
            "{}/v1/accounts/{}/query?nrql={}",
            self.base_url,
            account_id,
            encode_uri_component(nrql)
        )
    }

    /// Run an NRQL query
    ///
    /// Returns the reply only for status 200. Any other status becomes
    /// [`InsightsError::UpstreamStatus`] and the upstream body is discarded.
    pub async fn query(
        &self,
        account_id: &str,
        nrql: &str,
        query_key: Option<&HeaderValue>,
    ) -> Result<UpstreamReply, InsightsError> {
        let url = self.query_url(account_id, nrql);
        info!("Attempting to proxy request to {}", url);

        let mut request = self
            .http
            .get(&url)
            .header(header::ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(key) = query_key {
            request = request.header(QUERY_KEY_HEADER, key.clone());
        }

        let response = request
            .send()
            .await
            .map_err(|e| InsightsError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(InsightsError::UpstreamStatus(status.as_u16()));
        }

        let headers = end_to_end_headers(response.headers());
        let body = response
            .bytes()
            .await
            .map_err(|e| InsightsError::Transport(e.to_string()))?;

        Ok(UpstreamReply { headers, body })
    }
}

/// Copy upstream headers, dropping hop-by-hop ones and any header the
/// upstream listed in its `Connection` header
pub fn end_to_end_headers(upstream: &HeaderMap) -> HeaderMap {
    let listed: Vec<HeaderName> = upstream
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    let mut headers = HeaderMap::with_capacity(upstream.len());
    for (name, value) in upstream {
        if HOP_BY_HOP.contains(name) || listed.contains(name) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers
}
