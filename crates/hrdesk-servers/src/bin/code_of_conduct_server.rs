use anyhow::Context;
use hrdesk_servers::{
    code_of_conduct::CodeOfConductServer, documents, transport, ServersConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServersConfig::load().context("Failed to load configuration")?;
    hrdesk_config::init_logging(&config.logging);

    let document = documents::load_document(
        config.documents.code_of_conduct.as_deref(),
        documents::DEFAULT_CODE_OF_CONDUCT,
    )
    .await?;

    tracing::info!("code-of-conduct MCP server starting on stdio");
    transport::serve_stdio(CodeOfConductServer::new(document)).await
}
