//! Schema command implementation

use clap::Args;
use insights_core::InsightsError;
use insights_types::Phase;
use tracing::info;

use super::ConnectionArgs;

/// Schema command arguments
#[derive(Args, Debug)]
pub struct SchemaCommand {
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

impl SchemaCommand {
    /// Execute the schema command, printing column descriptors as JSON
    pub async fn execute(&self) -> Result<(), InsightsError> {
        info!("Discovering columns for account {}", self.connection.account);

        let connector = self.connection.connector();
        connector.setup(Phase::Interactive).await?;
        let columns = connector.column_headers().await?;
        connector.host().check_aborted()?;
        connector.teardown().await?;

        if let Some(column) = columns.iter().find(|c| c.is_incremental()) {
            info!("Incremental refresh column: {}", column.name);
        }
        println!("{}", serde_json::to_string_pretty(&columns)?);
        Ok(())
    }
}
