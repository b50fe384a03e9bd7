//! Connection parameters stored by the host

use insights_types::{PageToken, QueryRequest};
use serde::{Deserialize, Serialize};

use crate::error::InsightsError;

/// Connection parameters entered by the user and stored by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionParameters {
    /// Insights account identifier
    #[serde(rename = "AccountID")]
    pub account_id: String,

    /// NRQL query to run
    #[serde(rename = "NRQLQuery")]
    pub query: String,
}

impl ConnectionParameters {
    /// Create connection parameters for the given account and query
    pub fn new(account_id: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            query: query.into(),
        }
    }

    /// Check that both parameters are present
    pub fn validate(&self) -> Result<(), InsightsError> {
        if self.account_id.trim().is_empty() {
            return Err(InsightsError::MissingInput("AccountID".to_string()));
        }
        if self.query.trim().is_empty() {
            return Err(InsightsError::MissingInput("NRQLQuery".to_string()));
        }
        Ok(())
    }

    /// Build the proxy request for these parameters
    pub fn to_query_request(&self, page_token: Option<PageToken>) -> QueryRequest {
        QueryRequest::new(&self.query, &self.account_id).with_page_token(page_token)
    }
}
