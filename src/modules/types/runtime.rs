//! Runtime type definitions for the connector/proxy exchange

use serde::{Deserialize, Serialize};
use std::fmt;

/// Header carrying the Insights query key from connector to proxy to upstream
pub const QUERY_KEY_HEADER: &str = "X-Query-Key";

/// Event field used for incremental refresh tracking and datetime inference
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// Characters `urlencoding` escapes but `encodeURIComponent` keeps literal
const URI_COMPONENT_KEPT: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Percent-encode a URI component with the `encodeURIComponent` unreserved set
/// (`A-Z a-z 0-9 - _ . ! ~ * ' ( )`)
pub fn encode_uri_component(value: &str) -> String {
    // Every '%' in the encoded text starts an escape, so the swaps cannot overlap.
    URI_COMPONENT_KEPT
        .iter()
        .fold(urlencoding::encode(value).into_owned(), |text, (escaped, literal)| {
            text.replace(*escaped, literal)
        })
}

/// A single event: field name to scalar value, in upstream key order
pub type Event = serde_json::Map<String, serde_json::Value>;

/// Opaque continuation marker handed back and forth through the host
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageToken(String);

impl PageToken {
    /// Wrap a raw token value
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Build a token from a host-supplied value, dropping the "no more data" markers
    pub fn from_last_record(value: Option<&str>) -> Option<Self> {
        value.map(Self::new).filter(Self::has_more)
    }

    /// Returns false for the values the host uses to signal "no more data":
    /// empty, `0`, `false` and `null`
    pub fn has_more(&self) -> bool {
        let token = self.0.trim();
        !(token.is_empty() || token == "0" || token == "false" || token == "null")
    }

    /// Raw token value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Query sent from the connector to the proxy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// NRQL query, passed through uninterpreted
    pub query: String,
    /// Insights account identifier
    pub account_id: String,
    /// Continuation token from a previous fetch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<PageToken>,
}

impl QueryRequest {
    /// Create a request for the first page
    pub fn new(query: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            account_id: account_id.into(),
            page_token: None,
        }
    }

    /// Attach a page token; tokens that mean "no more data" are dropped
    pub fn with_page_token(mut self, token: Option<PageToken>) -> Self {
        self.page_token = token.filter(PageToken::has_more);
        self
    }

    /// Render the proxy path, e.g. `/proxy?nrql=SELECT%20*%20FROM%20Test&account=123`
    pub fn to_proxy_path(&self) -> String {
        let mut path = format!("/proxy?nrql={}", encode_uri_component(&self.query));
        if let Some(token) = &self.page_token {
            path.push_str("&page=");
            path.push_str(&encode_uri_component(token.as_str()));
        }
        path.push_str("&account=");
        path.push_str(&encode_uri_component(&self.account_id));
        path
    }
}

/// Rows produced by one data fetch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    /// Shaped events, in upstream order
    pub rows: Vec<Event>,
    /// Token for the next fetch, `None` when all data was returned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<PageToken>,
}

impl TableData {
    /// Create a complete (single page) result
    pub fn complete(rows: Vec<Event>) -> Self {
        Self {
            rows,
            next_page: None,
        }
    }

    /// Create an empty result
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if the host should call again for more data
    pub fn has_more(&self) -> bool {
        self.next_page.as_ref().map(PageToken::has_more).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_token_terminal_values() {
        for raw in ["", "0", "false", "null", "  "] {
            assert!(!PageToken::new(raw).has_more(), "{:?} should end paging", raw);
        }
        assert!(PageToken::new("1609459200000").has_more());
        assert!(PageToken::from_last_record(Some("0")).is_none());
        assert!(PageToken::from_last_record(None).is_none());
        assert_eq!(
            PageToken::from_last_record(Some("abc")),
            Some(PageToken::new("abc"))
        );
    }

    #[test]
    fn test_proxy_path_without_page() {
        let request = QueryRequest::new("SELECT * FROM Test", "123");
        assert_eq!(
            request.to_proxy_path(),
            "/proxy?nrql=SELECT%20*%20FROM%20Test&account=123"
        );
    }

    #[test]
    fn test_proxy_path_with_page() {
        let request = QueryRequest::new("SELECT count(*) FROM Transaction", "42")
            .with_page_token(Some(PageToken::new("7")));
        assert_eq!(
            request.to_proxy_path(),
            "/proxy?nrql=SELECT%20count(*)%20FROM%20Transaction&page=7&account=42"
        );
    }

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(encode_uri_component("it's (ok)!*~"), "it's%20(ok)!*~");
        assert_eq!(encode_uri_component("a=b&c/d?"), "a%3Db%26c%2Fd%3F");
        assert_eq!(encode_uri_component("100%2A"), "100%252A");
        assert_eq!(encode_uri_component("café"), "caf%C3%A9");
    }

    #[test]
    fn test_terminal_page_token_is_not_sent() {
        let request =
            QueryRequest::new("SELECT * FROM Test", "1").with_page_token(Some(PageToken::new("")));
        assert!(request.page_token.is_none());
        assert!(!request.to_proxy_path().contains("page="));
    }

    #[test]
    fn test_table_data_complete_has_no_more() {
        let mut row = Event::new();
        row.insert("name".to_string(), serde_json::json!("x"));
        let data = TableData::complete(vec![row]);
        assert_eq!(data.rows.len(), 1);
        assert!(!data.has_more());
        assert!(!TableData::empty().has_more());
    }
}
