use anyhow::Context;
use hrdesk_servers::{documents, hr_policy::HrPolicyServer, transport, ServersConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServersConfig::load().context("Failed to load configuration")?;
    hrdesk_config::init_logging(&config.logging);

    let policies = documents::load_document(
        config.documents.hr_policy.as_deref(),
        documents::DEFAULT_HR_POLICY,
    )
    .await?;

    tracing::info!("HR policy MCP server starting on stdio");
    transport::serve_stdio(HrPolicyServer::new(policies)).await
}
