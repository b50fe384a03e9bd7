//! Connector lifecycle: setup, column discovery, data fetch, teardown

use insights_core::InsightsError;
use insights_types::{
    ColumnDescriptor, PageToken, Phase, TableData, QUERY_KEY_HEADER, TIMESTAMP_FIELD,
};
use tracing::{debug, info, warn};

use crate::response::InsightsResponse;
use crate::rows::shape_event;
use crate::schema::describe_columns;
use crate::traits::{ConnectorState, Host, HttpClient};

/// Message shown by the host when a query does not return a flat event list
pub const UNSUPPORTED_QUERY_MESSAGE: &str =
    "NRQL queries with aggregation are unsupported at this time.";

/// Insights data connector
///
/// Each lifecycle method issues at most one request and resolves once. The
/// host drives calls one at a time and owns the page token between them.
pub struct InsightsConnector<C, H, S> {
    client: C,
    host: H,
    state: S,
}

impl<C, H, S> InsightsConnector<C, H, S>
where
    C: HttpClient,
    H: Host,
    S: ConnectorState,
{
    /// Create a connector from its three capabilities
    pub fn new(client: C, host: H, state: S) -> Self {
        Self {
            client,
            host,
            state,
        }
    }

    /// Initialize the connector for a host phase
    ///
    /// The incremental extract column is registered in every phase.
    pub async fn setup(&self, phase: Phase) -> Result<(), InsightsError> {
        debug!("Setting up connector for {} phase", phase);
        self.host.set_incremental_extract_column(TIMESTAMP_FIELD);
        Ok(())
    }

    /// Release resources; there are none to release
    pub async fn teardown(&self) -> Result<(), InsightsError> {
        debug!("Tearing down connector");
        Ok(())
    }

    /// Discover columns from the first event the query returns
    ///
    /// An unsupported query shape aborts through the host and yields no
    /// columns; transport and parse failures are returned as errors.
    pub async fn column_headers(&self) -> Result<Vec<ColumnDescriptor>, InsightsError> {
        let Some(response) = self.fetch(None).await? else {
            return Ok(Vec::new());
        };

        let columns = match response.sample() {
            Some(sample) => describe_columns(sample),
            None => {
                warn!("Query returned no events; no columns to infer");
                Vec::new()
            }
        };

        info!("Discovered {} columns", columns.len());
        Ok(columns)
    }

    /// Fetch and shape all rows for the query
    ///
    /// Paging is not detected: the returned data never carries a next page
    /// token, so the host stops after one call.
    pub async fn table_data(
        &self,
        last_record: Option<PageToken>,
    ) -> Result<TableData, InsightsError> {
        let Some(response) = self.fetch(last_record).await? else {
            return Ok(TableData::empty());
        };

        let rows: Vec<_> = response.into_events().into_iter().map(shape_event).collect();

        info!("Fetched {} rows", rows.len());
        Ok(TableData::complete(rows))
    }

    /// Get the host
    pub fn host(&self) -> &H {
        &self.host
    }

    // `Ok(None)` means the cycle was aborted through the host.
    async fn fetch(
        &self,
        page_token: Option<PageToken>,
    ) -> Result<Option<InsightsResponse>, InsightsError> {
        let params = self.state.connection_data()?;
        params.validate()?;

        let path = params.to_query_request(page_token).to_proxy_path();
        let password = self.state.password();
        let headers: Vec<(&str, &str)> = password
            .as_deref()
            .map(|key| vec![(QUERY_KEY_HEADER, key)])
            .unwrap_or_default();

        let body = self.client.get(&path, &headers).await?;

        match InsightsResponse::parse(&body) {
            Ok(response) => Ok(Some(response)),
            Err(InsightsError::InvalidResponseShape(reason)) => {
                warn!("Aborting: {}", reason);
                self.host.abort_with_error(UNSUPPORTED_QUERY_MESSAGE);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
