//! Command-line stand-ins for the host capabilities

use insights_connector::{ConnectorState, Host};
use insights_core::{ConnectionParameters, InsightsError};
use std::sync::Mutex;
use tracing::{debug, error};

/// Host that logs callbacks and remembers the last abort
#[derive(Debug, Default)]
pub struct CliHost {
    abort: Mutex<Option<String>>,
}

impl CliHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Message of the last abort, if the connector aborted
    pub fn abort_message(&self) -> Option<String> {
        self.abort.lock().ok().and_then(|guard| guard.clone())
    }

    /// Turn a recorded abort into an error
    pub fn check_aborted(&self) -> Result<(), InsightsError> {
        match self.abort_message() {
            Some(message) => Err(InsightsError::InvalidResponseShape(message)),
            None => Ok(()),
        }
    }
}

impl Host for CliHost {
    fn abort_with_error(&self, message: &str) {
        error!("Connector aborted: {}", message);
        if let Ok(mut guard) = self.abort.lock() {
            *guard = Some(message.to_string());
        }
    }

    fn set_incremental_extract_column(&self, column: &str) {
        debug!("Incremental extract column: {}", column);
    }
}

/// Connection state taken from command-line arguments
#[derive(Debug, Clone)]
pub struct CliState {
    params: ConnectionParameters,
    query_key: Option<String>,
}

impl CliState {
    pub fn new(params: ConnectionParameters, query_key: Option<String>) -> Self {
        Self { params, query_key }
    }
}

impl ConnectorState for CliState {
    fn connection_data(&self) -> Result<ConnectionParameters, InsightsError> {
        Ok(self.params.clone())
    }

    fn password(&self) -> Option<String> {
        self.query_key.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_host_records_abort() {
        let host = CliHost::new();
        assert!(host.check_aborted().is_ok());

        host.abort_with_error("unsupported");
        assert_eq!(host.abort_message().as_deref(), Some("unsupported"));
        assert!(matches!(
            host.check_aborted(),
            Err(InsightsError::InvalidResponseShape(ref m)) if m == "unsupported"
        ));
    }

    #[test]
    fn test_cli_state() {
        let state = CliState::new(
            ConnectionParameters::new("1", "SELECT 1"),
            Some("key".to_string()),
        );
        assert_eq!(state.connection_data().unwrap().account_id, "1");
        assert_eq!(state.password().as_deref(), Some("key"));
    }
}
