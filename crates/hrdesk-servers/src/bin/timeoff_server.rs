use anyhow::Context;
use hrdesk_servers::{transport, ServersConfig, TimeOffDatastore, TimeoffServer};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServersConfig::load().context("Failed to load configuration")?;
    hrdesk_config::init_logging(&config.logging);

    let store = match &config.timeoff.data_file {
        Some(path) => TimeOffDatastore::open(path)
            .await
            .with_context(|| format!("Failed to open ledger {}", path.display()))?,
        None => TimeOffDatastore::new(),
    };
    let store = Arc::new(store);
    tracing::info!(employees = ?store.employee_names().await, "time-off ledger ready");

    let router = transport::streamable_http_router(
        move || Ok(TimeoffServer::new(store.clone())),
        &config.server.path,
    );

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Timeoff MCP server at http://{}{}", addr, config.server.path);

    transport::serve_streamable_http(listener, router).await
}
