//! Host lifecycle phase definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase in which the host initializes the connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Initialized with a user interface for entering connection details
    Interactive,
    /// Initialized in the background to collect data
    GatherData,
    /// Initialized only to refresh an authentication token
    Auth,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Interactive => write!(f, "interactive"),
            Phase::GatherData => write!(f, "gatherData"),
            Phase::Auth => write!(f, "auth"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_display_matches_serde() {
        for phase in [Phase::Interactive, Phase::GatherData, Phase::Auth] {
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(json, format!("\"{}\"", phase));
        }
    }
}
