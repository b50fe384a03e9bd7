//! Column type definitions reported to the host during schema discovery

use serde::{Deserialize, Serialize};
use std::fmt;

/// Column types understood by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Date and time (ISO 8601)
    Datetime,
    /// Floating point number
    Float,
    /// Integer number
    Int,
    /// Anything else
    String,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Datetime => write!(f, "datetime"),
            ColumnType::Float => write!(f, "float"),
            ColumnType::Int => write!(f, "int"),
            ColumnType::String => write!(f, "string"),
        }
    }
}

/// A single column header registered with the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    /// Column name (the event field key)
    pub name: String,

    /// Inferred column type
    #[serde(rename = "type")]
    pub column_type: ColumnType,

    /// Set only on the column used for incremental extract refreshes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incremental_refresh: Option<bool>,
}

impl ColumnDescriptor {
    /// Create a descriptor without incremental refresh
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            incremental_refresh: None,
        }
    }

    /// Mark this column as the incremental refresh column
    pub fn with_incremental_refresh(mut self) -> Self {
        self.incremental_refresh = Some(true);
        self
    }

    /// Returns true if this column drives incremental refreshes
    pub fn is_incremental(&self) -> bool {
        self.incremental_refresh.unwrap_or(false)
    }
}
