//! Capabilities injected into the connector

use async_trait::async_trait;
use insights_core::{ConnectionParameters, InsightsError};

/// HTTP access to the query proxy
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue a GET for a proxy path (e.g. `/proxy?nrql=...&account=...`)
    ///
    /// # Returns
    /// The response body for a 2xx status. Any other status is
    /// [`InsightsError::UpstreamStatus`]; network failures are
    /// [`InsightsError::Transport`].
    async fn get(&self, path: &str, headers: &[(&str, &str)]) -> Result<String, InsightsError>;
}

/// Callbacks provided by the host
pub trait Host: Send + Sync {
    /// Abort the current lifecycle call with a user-visible message
    fn abort_with_error(&self, message: &str);

    /// Register the column the host tracks for incremental extract refreshes
    fn set_incremental_extract_column(&self, column: &str);
}

/// Connection state stored by the host between lifecycle calls
pub trait ConnectorState: Send + Sync {
    /// Stored connection parameters, read fresh on every lifecycle call
    fn connection_data(&self) -> Result<ConnectionParameters, InsightsError>;

    /// Stored query key, if the user provided one
    fn password(&self) -> Option<String>;
}
