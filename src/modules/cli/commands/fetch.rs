//! Fetch command implementation

use clap::Args;
use insights_core::InsightsError;
use insights_types::{PageToken, Phase};
use tracing::info;

use super::ConnectionArgs;

/// Fetch command arguments
#[derive(Args, Debug)]
pub struct FetchCommand {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Page token returned by a previous fetch
    #[arg(long)]
    pub page: Option<String>,
}

impl FetchCommand {
    /// Execute the fetch command, printing the table data as JSON
    pub async fn execute(&self) -> Result<(), InsightsError> {
        info!("Fetching rows for account {}", self.connection.account);

        let connector = self.connection.connector();
        connector.setup(Phase::GatherData).await?;
        let data = connector
            .table_data(PageToken::from_last_record(self.page.as_deref()))
            .await?;
        connector.host().check_aborted()?;
        connector.teardown().await?;

        if data.has_more() {
            info!("More data available; next page token is in the output");
        }
        println!("{}", serde_json::to_string_pretty(&data)?);
        Ok(())
    }
}
