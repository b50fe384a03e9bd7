//! Query proxy handler

use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::state::AppState;
use insights_types::QUERY_KEY_HEADER;

/// Query string accepted on `/proxy`
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyParams {
    /// NRQL query
    pub nrql: String,
    /// Insights account identifier
    pub account: String,
    /// Continuation token; accepted but not forwarded upstream
    #[serde(default)]
    pub page: Option<String>,
}

/// Handler for proxied NRQL queries
pub struct ProxyHandler;

impl ProxyHandler {
    /// Handle GET /proxy?nrql=..&account=..[&page=..]
    pub async fn handle(
        State(state): State<AppState>,
        Query(params): Query<ProxyParams>,
        headers: HeaderMap,
    ) -> Response {
        if let Some(page) = &params.page {
            debug!("Ignoring page token '{}' for account {}", page, params.account);
        }

        let query_key = headers.get(QUERY_KEY_HEADER);
        if query_key.is_none() {
            warn!("Request for account {} has no {} header", params.account, QUERY_KEY_HEADER);
        }

        match state
            .upstream
            .query(&params.account, &params.nrql, query_key)
            .await
        {
            Ok(reply) => {
                let mut response = Response::new(Body::from(reply.body));
                *response.headers_mut() = reply.headers;
                response
            }
            Err(e) => {
                if e.is_error() {
                    error!("Error fulfilling request: \"{}\"", e);
                } else {
                    warn!("Error fulfilling request: \"{}\"", e);
                }
                StatusCode::from_u16(e.status_code())
                    .unwrap_or(StatusCode::BAD_GATEWAY)
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::UpstreamClient;
    use axum::{
        body::to_bytes,
        extract::{Path, RawQuery},
        http::Request,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    const INSIGHTS_BODY: &str =
        r#"{"results":[{"events":[{"timestamp":1609459200000,"name":"x"}]}]}"#;

    /// Mock Insights API: echoes what it received in `x-echo-*` headers.
    async fn insights_handler(
        Path(account): Path<String>,
        RawQuery(query): RawQuery,
        headers: HeaderMap,
    ) -> Response {
        if account == "500" {
            return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded: secret detail")
                .into_response();
        }
        if account == "204" {
            return StatusCode::NO_CONTENT.into_response();
        }
        if account == "chunked" {
            let (head, tail) = INSIGHTS_BODY.split_at(20);
            let chunks = futures::stream::iter([Ok::<_, std::io::Error>(head), Ok(tail)]);
            return Response::builder()
                .status(StatusCode::OK)
                .header("content-type", "application/json")
                .body(Body::from_stream(chunks))
                .unwrap();
        }

        let echo = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string()
        };

        Response::builder()
            .status(StatusCode::OK)
            .header("content-type", "application/json; charset=utf-8")
            .header("x-echo-key", echo("x-query-key"))
            .header("x-echo-agent", echo("user-agent"))
            .header("x-echo-accept", echo("accept"))
            .header("x-echo-query", query.unwrap_or_default())
            .header("x-request-id", "abc-123")
            .body(Body::from(INSIGHTS_BODY))
            .unwrap()
    }

    async fn spawn_upstream() -> (String, tokio::task::JoinHandle<()>) {
        let app = Router::new().route("/v1/accounts/:account/query", get(insights_handler));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("must bind test listener");
        let address = listener.local_addr().expect("must have local addr");
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock upstream must run");
        });
        (format!("http://{address}"), task)
    }

    fn proxy_router(upstream_url: &str) -> Router {
        let state = AppState::new(UpstreamClient::new(upstream_url).unwrap());
        Router::new()
            .route("/proxy", get(ProxyHandler::handle))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_success_relays_body_and_headers() {
        let (upstream_url, task) = spawn_upstream().await;
        let response = proxy_router(&upstream_url)
            .oneshot(
                Request::get("/proxy?nrql=SELECT%20*%20FROM%20Test&account=123")
                    .header("X-Query-Key", "abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers().clone();
        assert_eq!(headers["x-request-id"], "abc-123");
        assert_eq!(headers["content-type"], "application/json; charset=utf-8");
        assert_eq!(headers["x-echo-key"], "abc");
        assert_eq!(headers["x-echo-accept"], "application/json");
        assert!(headers["x-echo-agent"]
            .to_str()
            .unwrap()
            .starts_with("insights-bridge/"));
        assert_eq!(headers["x-echo-query"], "nrql=SELECT%20*%20FROM%20Test");

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], INSIGHTS_BODY.as_bytes());
        task.abort();
    }

    #[tokio::test]
    async fn test_chunked_upstream_is_relayed_over_tcp() {
        let (upstream_url, upstream) = spawn_upstream().await;
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("must bind proxy listener");
        let address = listener.local_addr().expect("must have local addr");
        let app = proxy_router(&upstream_url);
        let proxy = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("proxy must run");
        });

        let response = reqwest::Client::new()
            .get(format!("http://{address}/proxy?nrql=SELECT%201&account=chunked"))
            .header("X-Query-Key", "abc")
            .send()
            .await
            .expect("proxy must answer a chunked upstream");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "application/json");
        assert_eq!(response.text().await.unwrap(), INSIGHTS_BODY);

        proxy.abort();
        upstream.abort();
    }

    #[tokio::test]
    async fn test_upstream_error_status_has_empty_body() {
        let (upstream_url, task) = spawn_upstream().await;
        let response = proxy_router(&upstream_url)
            .oneshot(
                Request::get("/proxy?nrql=SELECT%201&account=500")
                    .header("X-Query-Key", "abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
        task.abort();
    }

    #[tokio::test]
    async fn test_non_200_success_is_not_relayed() {
        let (upstream_url, task) = spawn_upstream().await;
        let response = proxy_router(&upstream_url)
            .oneshot(
                Request::get("/proxy?nrql=SELECT%201&account=204")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        task.abort();
    }

    #[tokio::test]
    async fn test_transport_error_is_bad_gateway() {
        // Nothing listens on port 1
        let response = proxy_router("http://127.0.0.1:1")
            .oneshot(
                Request::get("/proxy?nrql=SELECT%201&account=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_missing_params_is_bad_request() {
        let response = proxy_router("http://127.0.0.1:1")
            .oneshot(Request::get("/proxy?nrql=SELECT%201").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_proxy_params_page_is_optional() {
        let params: ProxyParams =
            serde_json::from_str(r#"{"nrql":"SELECT 1","account":"9"}"#).unwrap();
        assert!(params.page.is_none());
    }
}
